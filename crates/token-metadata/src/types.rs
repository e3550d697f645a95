//! Domain types carried in instruction payloads, with their wire schemas.
//!
//! Each type has a `*_FIELDS` (or `*_VARIANTS`) table and a `*_KIND` used
//! when the type is nested inside another field. [`WireValue`] converts
//! between the typed form and the codec's [`Value`] tree.

use serde::{Deserialize, Serialize};
use wire_codec::{CodecError, Field, FieldKind, Value, Variant};

// ---------------------------------------------------------------------------
// Wire schemas
// ---------------------------------------------------------------------------

pub const CREATOR_FIELDS: &[Field] = &[
    Field::new("address", FieldKind::Pubkey),
    Field::new("verified", FieldKind::Bool),
    Field::new("share", FieldKind::U8),
];
pub const CREATOR_KIND: FieldKind = FieldKind::Struct(CREATOR_FIELDS);
pub const CREATORS_KIND: FieldKind = FieldKind::Option(&FieldKind::Vec(&CREATOR_KIND));

pub const DATA_FIELDS: &[Field] = &[
    Field::new("name", FieldKind::String),
    Field::new("symbol", FieldKind::String),
    Field::new("uri", FieldKind::String),
    Field::new("seller_fee_basis_points", FieldKind::U16),
    Field::new("creators", CREATORS_KIND),
];
pub const DATA_KIND: FieldKind = FieldKind::Struct(DATA_FIELDS);

pub const COLLECTION_FIELDS: &[Field] = &[
    Field::new("verified", FieldKind::Bool),
    Field::new("key", FieldKind::Pubkey),
];
pub const COLLECTION_KIND: FieldKind = FieldKind::Struct(COLLECTION_FIELDS);

pub const USE_METHOD_VARIANTS: &[Variant] = &[
    Variant::new("Burn", &[]),
    Variant::new("Multiple", &[]),
    Variant::new("Single", &[]),
];
pub const USE_METHOD_KIND: FieldKind = FieldKind::Enum(USE_METHOD_VARIANTS);

pub const USES_FIELDS: &[Field] = &[
    Field::new("use_method", USE_METHOD_KIND),
    Field::new("remaining", FieldKind::U64),
    Field::new("total", FieldKind::U64),
];
pub const USES_KIND: FieldKind = FieldKind::Struct(USES_FIELDS);

pub const DATA_V2_FIELDS: &[Field] = &[
    Field::new("name", FieldKind::String),
    Field::new("symbol", FieldKind::String),
    Field::new("uri", FieldKind::String),
    Field::new("seller_fee_basis_points", FieldKind::U16),
    Field::new("creators", CREATORS_KIND),
    Field::new("collection", FieldKind::Option(&COLLECTION_KIND)),
    Field::new("uses", FieldKind::Option(&USES_KIND)),
];
pub const DATA_V2_KIND: FieldKind = FieldKind::Struct(DATA_V2_FIELDS);

const COLLECTION_DETAILS_V1_FIELDS: &[Field] = &[Field::new("size", FieldKind::U64)];
pub const COLLECTION_DETAILS_VARIANTS: &[Variant] =
    &[Variant::new("V1", COLLECTION_DETAILS_V1_FIELDS)];
pub const COLLECTION_DETAILS_KIND: FieldKind = FieldKind::Enum(COLLECTION_DETAILS_VARIANTS);

// ---------------------------------------------------------------------------
// Value conversion
// ---------------------------------------------------------------------------

/// Conversion between a typed value and the codec's dynamic [`Value`].
///
/// `from_value` fails with [`CodecError::UnsupportedField`] when the tree
/// does not have the shape the type's schema declares; trees produced by
/// `wire_codec::decode` against that schema always convert.
pub trait WireValue: Sized {
    fn to_value(&self) -> Value;
    fn from_value(value: &Value) -> Result<Self, CodecError>;
}

pub(crate) fn mismatch(expected: &str, found: &Value) -> CodecError {
    CodecError::UnsupportedField(format!("expected {expected}, found {}", found.kind_name()))
}

/// Fields of a struct value, checked for arity.
pub(crate) fn struct_fields<'a>(
    value: &'a Value,
    name: &str,
    arity: usize,
) -> Result<&'a [Value], CodecError> {
    match value.as_struct() {
        Some(fields) if fields.len() == arity => Ok(fields),
        Some(fields) => Err(CodecError::UnsupportedField(format!(
            "{name}: expected {arity} fields, got {}",
            fields.len()
        ))),
        None => Err(mismatch(name, value)),
    }
}

macro_rules! wire_scalar {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl WireValue for $ty {
            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }

            fn from_value(value: &Value) -> Result<Self, CodecError> {
                match value {
                    Value::$variant(v) => Ok(v.clone()),
                    other => Err(mismatch($name, other)),
                }
            }
        }
    };
}

wire_scalar!(u8, U8, "u8");
wire_scalar!(u16, U16, "u16");
wire_scalar!(u64, U64, "u64");
wire_scalar!(bool, Bool, "bool");
wire_scalar!([u8; 32], Pubkey, "pubkey");
wire_scalar!(String, String, "string");

impl<T: WireValue> WireValue for Option<T> {
    fn to_value(&self) -> Value {
        Value::from_option(self.as_ref(), T::to_value)
    }

    fn from_value(value: &Value) -> Result<Self, CodecError> {
        match value.as_option() {
            Some(None) => Ok(None),
            Some(Some(inner)) => T::from_value(inner).map(Some),
            None => Err(mismatch("option", value)),
        }
    }
}

impl<T: WireValue> WireValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Vec(self.iter().map(T::to_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, CodecError> {
        value
            .as_vec()
            .ok_or_else(|| mismatch("vec", value))?
            .iter()
            .map(T::from_value)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub address: [u8; 32],
    pub verified: bool,
    /// Percentage of royalties, all creators summing to 100.
    pub share: u8,
}

impl WireValue for Creator {
    fn to_value(&self) -> Value {
        Value::Struct(vec![
            self.address.to_value(),
            self.verified.to_value(),
            self.share.to_value(),
        ])
    }

    fn from_value(value: &Value) -> Result<Self, CodecError> {
        let f = struct_fields(value, "Creator", 3)?;
        Ok(Self {
            address: WireValue::from_value(&f[0])?,
            verified: WireValue::from_value(&f[1])?,
            share: WireValue::from_value(&f[2])?,
        })
    }
}

/// Metadata fields accepted by the V1 instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
}

impl WireValue for Data {
    fn to_value(&self) -> Value {
        Value::Struct(vec![
            self.name.to_value(),
            self.symbol.to_value(),
            self.uri.to_value(),
            self.seller_fee_basis_points.to_value(),
            self.creators.to_value(),
        ])
    }

    fn from_value(value: &Value) -> Result<Self, CodecError> {
        let f = struct_fields(value, "Data", 5)?;
        Ok(Self {
            name: WireValue::from_value(&f[0])?,
            symbol: WireValue::from_value(&f[1])?,
            uri: WireValue::from_value(&f[2])?,
            seller_fee_basis_points: WireValue::from_value(&f[3])?,
            creators: WireValue::from_value(&f[4])?,
        })
    }
}

/// [`Data`] plus the collection and uses extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataV2 {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub collection: Option<Collection>,
    pub uses: Option<Uses>,
}

impl WireValue for DataV2 {
    fn to_value(&self) -> Value {
        Value::Struct(vec![
            self.name.to_value(),
            self.symbol.to_value(),
            self.uri.to_value(),
            self.seller_fee_basis_points.to_value(),
            self.creators.to_value(),
            self.collection.to_value(),
            self.uses.to_value(),
        ])
    }

    fn from_value(value: &Value) -> Result<Self, CodecError> {
        let f = struct_fields(value, "DataV2", 7)?;
        Ok(Self {
            name: WireValue::from_value(&f[0])?,
            symbol: WireValue::from_value(&f[1])?,
            uri: WireValue::from_value(&f[2])?,
            seller_fee_basis_points: WireValue::from_value(&f[3])?,
            creators: WireValue::from_value(&f[4])?,
            collection: WireValue::from_value(&f[5])?,
            uses: WireValue::from_value(&f[6])?,
        })
    }
}

impl From<Data> for DataV2 {
    fn from(data: Data) -> Self {
        Self {
            name: data.name,
            symbol: data.symbol,
            uri: data.uri,
            seller_fee_basis_points: data.seller_fee_basis_points,
            creators: data.creators,
            collection: None,
            uses: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub verified: bool,
    /// Mint of the collection NFT.
    pub key: [u8; 32],
}

impl WireValue for Collection {
    fn to_value(&self) -> Value {
        Value::Struct(vec![self.verified.to_value(), self.key.to_value()])
    }

    fn from_value(value: &Value) -> Result<Self, CodecError> {
        let f = struct_fields(value, "Collection", 2)?;
        Ok(Self {
            verified: WireValue::from_value(&f[0])?,
            key: WireValue::from_value(&f[1])?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum UseMethod {
    Burn = 0,
    Multiple = 1,
    Single = 2,
}

impl WireValue for UseMethod {
    fn to_value(&self) -> Value {
        Value::Enum {
            variant: *self as u8,
            fields: Vec::new(),
        }
    }

    fn from_value(value: &Value) -> Result<Self, CodecError> {
        match value.as_enum() {
            Some((0, [])) => Ok(Self::Burn),
            Some((1, [])) => Ok(Self::Multiple),
            Some((2, [])) => Ok(Self::Single),
            Some((tag, _)) => Err(CodecError::UnsupportedField(format!(
                "UseMethod: unexpected variant {tag}"
            ))),
            None => Err(mismatch("UseMethod", value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uses {
    pub use_method: UseMethod,
    pub remaining: u64,
    pub total: u64,
}

impl WireValue for Uses {
    fn to_value(&self) -> Value {
        Value::Struct(vec![
            self.use_method.to_value(),
            self.remaining.to_value(),
            self.total.to_value(),
        ])
    }

    fn from_value(value: &Value) -> Result<Self, CodecError> {
        let f = struct_fields(value, "Uses", 3)?;
        Ok(Self {
            use_method: WireValue::from_value(&f[0])?,
            remaining: WireValue::from_value(&f[1])?,
            total: WireValue::from_value(&f[2])?,
        })
    }
}

/// Marks a collection parent NFT and tracks how many items it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionDetails {
    V1 { size: u64 },
}

impl WireValue for CollectionDetails {
    fn to_value(&self) -> Value {
        match self {
            Self::V1 { size } => Value::Enum {
                variant: 0,
                fields: vec![size.to_value()],
            },
        }
    }

    fn from_value(value: &Value) -> Result<Self, CodecError> {
        match value.as_enum() {
            Some((0, [size])) => Ok(Self::V1 {
                size: WireValue::from_value(size)?,
            }),
            Some((tag, _)) => Err(CodecError::UnsupportedField(format!(
                "CollectionDetails: unexpected variant {tag}"
            ))),
            None => Err(mismatch("CollectionDetails", value)),
        }
    }
}

/// Role of a metadata delegate record. Only used as a derivation seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataDelegateRole {
    AuthorityItem,
    Collection,
    Use,
    Data,
    ProgrammableConfig,
    DataItem,
    CollectionItem,
    ProgrammableConfigItem,
}

impl MetadataDelegateRole {
    /// Seed string the program hashes for this role.
    pub fn seed(self) -> &'static str {
        match self {
            Self::AuthorityItem => "authority_item_delegate",
            Self::Collection => "collection_delegate",
            Self::Use => "use_delegate",
            Self::Data => "data_delegate",
            Self::ProgrammableConfig => "programmable_config_delegate",
            Self::DataItem => "data_item_delegate",
            Self::CollectionItem => "collection_item_delegate",
            Self::ProgrammableConfigItem => "prog_config_item_delegate",
        }
    }
}
