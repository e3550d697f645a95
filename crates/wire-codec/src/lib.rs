//! Schema-driven binary codec for on-chain instruction payloads.
//!
//! The wire format is the little-endian, length-prefixed layout the token
//! metadata program deserializes its instruction arguments from:
//!
//! ```text
//! u8/u16/u32/u64/u128/i*   fixed width, little-endian
//! bool                     1 byte, 0 or 1
//! pubkey                   32 raw bytes
//! Option<T>                presence byte (0 | 1), then T if present
//! Vec<T>                   u32 LE length, then each T
//! String                   u32 LE byte length, then UTF-8 bytes
//! enum                     u8 variant tag, then the variant's fields
//! struct                   fields in declared order, no padding
//! ```
//!
//! Schemas are plain `const` data ([`FieldKind`], [`Field`], [`Variant`]) so
//! callers can keep whole instruction tables in statics. Values travel as a
//! dynamic [`Value`] tree that mirrors the schema.

pub mod decode;
pub mod encode;
pub mod error;
pub mod schema;
pub mod value;

pub use decode::{decode, decode_prefix, Reader};
pub use encode::{encode, encode_into};
pub use error::CodecError;
pub use schema::{Field, FieldKind, Variant};
pub use value::Value;
