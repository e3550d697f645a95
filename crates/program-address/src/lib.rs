//! Program derived addresses for Solana programs.
//!
//! A program derived address (PDA) is the SHA-256 digest of a seed list, a
//! bump byte, the owning program id and the `"ProgramDerivedAddress"` marker,
//! chosen so that it is NOT a valid Ed25519 point. No private key can sign for
//! such an address; only the owning program can, via its seeds.
//!
//! Everything here is a pure function of its inputs and safe to call from any
//! number of threads.

pub mod address;
pub mod derive;
pub mod error;
pub mod seeds;

pub use address::{address_to_bytes, bytes_to_address, validate_address};
pub use derive::{
    create_program_address, find_program_address, is_on_curve, DerivedAddress, PDA_MARKER,
};
pub use error::AddressError;
pub use seeds::{SeedSet, MAX_SEEDS, MAX_SEED_LEN};
