use thiserror::Error;

/// Address derivation and parsing errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("no bump seed in 0..=255 yields an off-curve address")]
    NoValidAddress,

    #[error("derived address lies on the ed25519 curve")]
    OnCurve,

    #[error("seed of {0} bytes exceeds the 32-byte limit")]
    MaxSeedLengthExceeded(usize),

    #[error("{0} seeds exceed the 16-seed limit")]
    TooManySeeds(usize),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
