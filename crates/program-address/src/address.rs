//! Base58 text form of 32-byte account addresses.

use crate::error::AddressError;

/// Encode 32 bytes as a Base58 address string.
pub fn bytes_to_address(bytes: &[u8; 32]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode a Base58 address string to its 32 raw bytes.
pub fn address_to_bytes(address: &str) -> Result<[u8; 32], AddressError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| AddressError::InvalidAddress(format!("base58 decode failed: {e}")))?;

    bytes.try_into().map_err(|v: Vec<u8>| {
        AddressError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
    })
}

/// Check that `address` is Base58 for exactly 32 bytes.
pub fn validate_address(address: &str) -> Result<(), AddressError> {
    address_to_bytes(address).map(|_| ())
}
