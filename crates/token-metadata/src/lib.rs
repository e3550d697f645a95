//! Client-side instruction construction for the Metaplex token metadata
//! program.
//!
//! This crate builds binary-exact instruction payloads and the ordered
//! account lists that accompany them, and derives the program-owned
//! addresses (metadata, editions, authority records) those lists reference.
//! Signing and submission belong to the caller.
//!
//! The per-instruction account tables are static data ([`schema`]); one
//! generic builder ([`build_instruction`]) walks a table, fills in the
//! caller's addresses and encodes the arguments with [`wire_codec`].
//!
//! ```text
//! caller ─► AccountInputs + args ─► build_instruction ─► Instruction
//!                 ▲                        │
//!                 └── pda::find_* ◄────────┘ (addresses not already known)
//! ```

pub mod args;
pub mod builder;
pub mod config;
pub mod error;
pub mod instruction;
pub mod pda;
pub mod schema;
pub mod types;

pub use args::{
    ApproveUseAuthorityArgs, CreateMasterEditionArgs, CreateMetadataAccountArgs,
    CreateMetadataAccountArgsV2, CreateMetadataAccountArgsV3, InstructionArgs,
    LegacyCreateMasterEditionArgs, MintNewEditionFromMasterEditionViaTokenArgs,
    SetCollectionSizeArgs, UpdateMetadataAccountArgs, UpdateMetadataAccountArgsV2, UtilizeArgs,
};
pub use builder::{
    build, build_instruction, decode_args, decode_instruction_data, AccountInputs, AccountMeta,
    Instruction,
};
pub use config::{
    MetadataConfig, ASSOCIATED_TOKEN_PROGRAM_ID, EDITION_MARKER_BIT_SIZE, RENT_SYSVAR_ID,
    SYSTEM_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
pub use error::MetadataError;
pub use instruction::MetadataInstruction;
pub use pda::{
    find_collection_authority_record_account, find_edition_account, find_edition_marker_account,
    find_master_edition_account, find_metadata_account, find_metadata_delegate_record_account,
    find_program_as_burner_account, find_token_record_account, find_use_authority_record_account,
};
pub use schema::{schema, AccountSource, AccountSpec, InstructionSchema, SignerRule};
pub use types::{
    Collection, CollectionDetails, Creator, Data, DataV2, MetadataDelegateRole, UseMethod, Uses,
    WireValue,
};

pub use program_address::DerivedAddress;
pub use wire_codec::Value;
