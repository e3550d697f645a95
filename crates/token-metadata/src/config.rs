//! Program ids, seed tags and the edition marker divisor.
//!
//! All of these are process-wide constants in production. They are grouped in
//! [`MetadataConfig`] so a devnet fork or a test harness can swap the program
//! id without touching call sites.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

// ---------------------------------------------------------------------------
// Well-known program IDs
// ---------------------------------------------------------------------------

/// Token Metadata Program ID: `metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bGm3ntzs`
pub const TOKEN_METADATA_PROGRAM_ID: [u8; 32] = [
    0x0b, 0x70, 0x65, 0xb1, 0xe3, 0xd1, 0x7c, 0x45, 0x38, 0x9d, 0x52, 0x7f, 0x6b, 0x04, 0xc3, 0xcd,
    0x58, 0xb8, 0x6c, 0x73, 0x1a, 0xa0, 0xfd, 0xb5, 0x49, 0xb6, 0xd0, 0x83, 0x0c, 0x15, 0x7d, 0xb0,
];

/// System Program ID: `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: [u8; 32] = [0u8; 32];

/// Rent sysvar: `SysvarRent111111111111111111111111111111111`
pub const RENT_SYSVAR_ID: [u8; 32] = [
    0x06, 0xa7, 0xd5, 0x17, 0x19, 0x2c, 0x5c, 0x51, 0x21, 0x8c, 0xc9, 0x4c, 0x3d, 0x4a, 0xf1, 0x7f,
    0x58, 0xda, 0xee, 0x08, 0x9b, 0xa1, 0xfd, 0x44, 0xe3, 0xdb, 0xd9, 0x8a, 0x00, 0x00, 0x00, 0x00,
];

/// SPL Token Program ID: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM_ID: [u8; 32] = [
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79, 0xac,
    0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff, 0x00, 0xa9,
];

/// Associated Token Account Program ID: `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM_ID: [u8; 32] = [
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d, 0x83,
    0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9, 0xf8, 0x59,
];

/// Number of edition slots tracked by one edition marker account.
pub const EDITION_MARKER_BIT_SIZE: u64 = 248;

static GLOBAL: LazyLock<MetadataConfig> = LazyLock::new(MetadataConfig::default);

// ---------------------------------------------------------------------------
// MetadataConfig
// ---------------------------------------------------------------------------

/// Seed tags and program id used for every derivation and instruction.
///
/// `Default` is the mainnet deployment. JSON uses base58 for the program id;
/// every other field is optional and falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataConfig {
    #[serde(with = "base58_key")]
    pub program_id: [u8; 32],
    pub prefix: String,
    pub edition_seed: String,
    pub token_record_seed: String,
    pub collection_authority_seed: String,
    pub use_authority_seed: String,
    pub burner_seed: String,
    pub edition_marker_bit_size: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            program_id: TOKEN_METADATA_PROGRAM_ID,
            prefix: "metadata".into(),
            edition_seed: "edition".into(),
            token_record_seed: "token_record".into(),
            collection_authority_seed: "collection_authority".into(),
            use_authority_seed: "user".into(),
            burner_seed: "burn".into(),
            edition_marker_bit_size: EDITION_MARKER_BIT_SIZE,
        }
    }
}

impl MetadataConfig {
    /// The shared mainnet configuration, built on first use.
    pub fn global() -> &'static MetadataConfig {
        &GLOBAL
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        let config: MetadataConfig = serde_json::from_str(json)
            .map_err(|e| MetadataError::InvalidConfig(e.to_string()))?;
        config.validate()?;

        if config.program_id != TOKEN_METADATA_PROGRAM_ID {
            tracing::warn!(
                program_id = %program_address::bytes_to_address(&config.program_id),
                "metadata program id overridden"
            );
        }
        Ok(config)
    }

    /// Check the divisor and that every seed tag fits in a single seed.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.edition_marker_bit_size == 0 {
            return Err(MetadataError::InvalidConfig(
                "edition_marker_bit_size must be > 0".into(),
            ));
        }

        let seeds = [
            ("prefix", &self.prefix),
            ("edition_seed", &self.edition_seed),
            ("token_record_seed", &self.token_record_seed),
            ("collection_authority_seed", &self.collection_authority_seed),
            ("use_authority_seed", &self.use_authority_seed),
            ("burner_seed", &self.burner_seed),
        ];
        for (name, seed) in seeds {
            if seed.is_empty() || seed.len() > program_address::MAX_SEED_LEN {
                return Err(MetadataError::InvalidConfig(format!(
                    "{name} must be 1..={} bytes, got {}",
                    program_address::MAX_SEED_LEN,
                    seed.len()
                )));
            }
        }
        Ok(())
    }

    /// Edition marker index for a print edition number.
    pub fn edition_marker_index(&self, edition: u64) -> u64 {
        edition / self.edition_marker_bit_size.max(1)
    }
}

mod base58_key {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(key: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&program_address::bytes_to_address(key))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(d)?;
        program_address::address_to_bytes(&s).map_err(de::Error::custom)
    }
}
