//! Program derived addresses owned by the token metadata program.
//!
//! Every address starts from `[prefix, program_id, mint]` and appends a
//! role-specific tail. All helpers are pure; callers may memoize them by
//! their arguments.

use program_address::{find_program_address, DerivedAddress};

use crate::config::MetadataConfig;
use crate::error::MetadataError;
use crate::types::MetadataDelegateRole;

fn derive(
    config: &MetadataConfig,
    mint: &[u8; 32],
    tail: &[&[u8]],
) -> Result<DerivedAddress, MetadataError> {
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(3 + tail.len());
    seeds.push(config.prefix.as_bytes());
    seeds.push(&config.program_id);
    seeds.push(mint);
    seeds.extend_from_slice(tail);
    Ok(find_program_address(&seeds, &config.program_id)?)
}

/// `["metadata", program_id, mint]`
pub fn find_metadata_account(
    config: &MetadataConfig,
    mint: &[u8; 32],
) -> Result<DerivedAddress, MetadataError> {
    derive(config, mint, &[])
}

/// `["metadata", program_id, mint, "edition"]`
pub fn find_master_edition_account(
    config: &MetadataConfig,
    mint: &[u8; 32],
) -> Result<DerivedAddress, MetadataError> {
    derive(config, mint, &[config.edition_seed.as_bytes()])
}

/// Print editions live at the same seeds as a master edition, under their
/// own mint.
pub fn find_edition_account(
    config: &MetadataConfig,
    mint: &[u8; 32],
) -> Result<DerivedAddress, MetadataError> {
    find_master_edition_account(config, mint)
}

/// Marker account tracking print `edition` of the master edition at `mint`.
///
/// The last seed is the decimal string of `edition / edition_marker_bit_size`,
/// so editions 0..=247 share marker `"0"`, 248..=495 share `"1"`, and so on.
pub fn find_edition_marker_account(
    config: &MetadataConfig,
    mint: &[u8; 32],
    edition: u64,
) -> Result<DerivedAddress, MetadataError> {
    let marker = config.edition_marker_index(edition).to_string();
    derive(
        config,
        mint,
        &[config.edition_seed.as_bytes(), marker.as_bytes()],
    )
}

/// Token record of a programmable NFT, keyed by token account.
pub fn find_token_record_account(
    config: &MetadataConfig,
    mint: &[u8; 32],
    token: &[u8; 32],
) -> Result<DerivedAddress, MetadataError> {
    derive(config, mint, &[config.token_record_seed.as_bytes(), token])
}

/// `["metadata", program_id, mint, role_seed, update_authority, delegate]`
///
/// The role is hashed as its seed string (e.g. `"collection_delegate"`),
/// not as a numeric tag.
pub fn find_metadata_delegate_record_account(
    config: &MetadataConfig,
    mint: &[u8; 32],
    role: MetadataDelegateRole,
    update_authority: &[u8; 32],
    delegate: &[u8; 32],
) -> Result<DerivedAddress, MetadataError> {
    derive(
        config,
        mint,
        &[role.seed().as_bytes(), update_authority, delegate],
    )
}

pub fn find_collection_authority_record_account(
    config: &MetadataConfig,
    mint: &[u8; 32],
    authority: &[u8; 32],
) -> Result<DerivedAddress, MetadataError> {
    derive(
        config,
        mint,
        &[config.collection_authority_seed.as_bytes(), authority],
    )
}

pub fn find_use_authority_record_account(
    config: &MetadataConfig,
    mint: &[u8; 32],
    user: &[u8; 32],
) -> Result<DerivedAddress, MetadataError> {
    derive(config, mint, &[config.use_authority_seed.as_bytes(), user])
}

/// `["metadata", program_id, "burn"]`: the program's own signer for burning
/// used-up tokens.
pub fn find_program_as_burner_account(
    config: &MetadataConfig,
) -> Result<DerivedAddress, MetadataError> {
    let seeds: [&[u8]; 3] = [
        config.prefix.as_bytes(),
        &config.program_id,
        config.burner_seed.as_bytes(),
    ];
    Ok(find_program_address(&seeds, &config.program_id)?)
}
