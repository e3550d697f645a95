//! Bump search and single-shot derivation.
//!
//! ```text
//! address = SHA-256(seed_0 || ... || seed_n || bump || program_id || "ProgramDerivedAddress")
//! ```
//!
//! The bump is searched from 255 down to 0; the first digest that does not
//! decompress to an Ed25519 point is the canonical address.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::address::bytes_to_address;
use crate::error::AddressError;
use crate::seeds::check_seeds;

/// Domain-separation suffix hashed after the program id.
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// A canonical program derived address and the bump that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedAddress {
    pub address: [u8; 32],
    pub bump: u8,
}

impl fmt::Display for DerivedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bytes_to_address(&self.address))
    }
}

/// Find the canonical (highest-bump) program derived address for `seeds`.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &[u8; 32],
) -> Result<DerivedAddress, AddressError> {
    check_seeds(seeds, true)?;

    for bump in (0u8..=255).rev() {
        let hash = hash_seeds(seeds, Some(bump), program_id);
        if is_on_curve(&hash) {
            tracing::trace!(bump, "candidate on curve, trying next bump");
            continue;
        }

        let derived = DerivedAddress {
            address: hash,
            bump,
        };
        tracing::debug!(address = %derived, bump, seeds = seeds.len(), "derived program address");
        return Ok(derived);
    }

    Err(AddressError::NoValidAddress)
}

/// Derive an address from `seeds` as given, with no bump search. The caller
/// includes the bump as the last seed when reproducing a known PDA.
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &[u8; 32],
) -> Result<[u8; 32], AddressError> {
    check_seeds(seeds, false)?;

    let hash = hash_seeds(seeds, None, program_id);
    if is_on_curve(&hash) {
        return Err(AddressError::OnCurve);
    }
    Ok(hash)
}

/// Whether 32 bytes decompress to a valid Ed25519 point.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}

fn hash_seeds(seeds: &[&[u8]], bump: Option<u8>, program_id: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    if let Some(bump) = bump {
        hasher.update([bump]);
    }
    hasher.update(program_id);
    hasher.update(PDA_MARKER);
    hasher.finalize().into()
}
