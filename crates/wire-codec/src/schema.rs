//! Static schema description for the binary codec.
//!
//! Every type here is `Copy` and constructible in `const` context, so a
//! program's whole instruction table can live in `static` items.

/// The wire shape of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    Bool,
    /// 32 raw bytes, no length prefix.
    Pubkey,
    /// UTF-8, u32 LE byte-length prefix, no terminator.
    String,
    /// Opaque bytes, u32 LE length prefix.
    Bytes,
    /// Presence byte followed by the inner value when present.
    Option(&'static FieldKind),
    /// u32 LE element count followed by each element.
    Vec(&'static FieldKind),
    /// Fields back to back in declared order.
    Struct(&'static [Field]),
    /// u8 variant tag followed by the variant's fields.
    Enum(&'static [Variant]),
}

/// A named field within a struct, variant, or payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// One alternative of a tagged union. Its position in the variant slice is
/// its wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Variant {
    pub const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Self { name, fields }
    }
}

impl FieldKind {
    /// Short human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::U8 => "u8",
            FieldKind::U16 => "u16",
            FieldKind::U32 => "u32",
            FieldKind::U64 => "u64",
            FieldKind::U128 => "u128",
            FieldKind::I8 => "i8",
            FieldKind::I16 => "i16",
            FieldKind::I32 => "i32",
            FieldKind::I64 => "i64",
            FieldKind::Bool => "bool",
            FieldKind::Pubkey => "pubkey",
            FieldKind::String => "string",
            FieldKind::Bytes => "bytes",
            FieldKind::Option(_) => "option",
            FieldKind::Vec(_) => "vec",
            FieldKind::Struct(_) => "struct",
            FieldKind::Enum(_) => "enum",
        }
    }

    /// Smallest number of bytes any value of this kind can occupy.
    pub fn min_encoded_len(&self) -> usize {
        match self {
            FieldKind::U8 | FieldKind::I8 | FieldKind::Bool => 1,
            FieldKind::U16 | FieldKind::I16 => 2,
            FieldKind::U32 | FieldKind::I32 => 4,
            FieldKind::U64 | FieldKind::I64 => 8,
            FieldKind::U128 => 16,
            FieldKind::Pubkey => 32,
            FieldKind::String | FieldKind::Bytes | FieldKind::Vec(_) => 4,
            FieldKind::Option(_) => 1,
            FieldKind::Struct(fields) => fields.iter().map(|f| f.kind.min_encoded_len()).sum(),
            FieldKind::Enum(variants) => {
                1 + variants
                    .iter()
                    .map(|v| v.fields.iter().map(|f| f.kind.min_encoded_len()).sum::<usize>())
                    .min()
                    .unwrap_or(0)
            }
        }
    }

    /// Encoded size when it does not depend on the value.
    pub fn fixed_encoded_len(&self) -> Option<usize> {
        match self {
            FieldKind::String
            | FieldKind::Bytes
            | FieldKind::Vec(_)
            | FieldKind::Option(_)
            | FieldKind::Enum(_) => None,
            FieldKind::Struct(fields) => fields
                .iter()
                .map(|f| f.kind.fixed_encoded_len())
                .sum::<Option<usize>>(),
            _ => Some(self.min_encoded_len()),
        }
    }
}
