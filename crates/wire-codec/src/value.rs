//! Dynamic value tree mirroring [`FieldKind`](crate::FieldKind).

/// A decoded (or to-be-encoded) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Bool(bool),
    Pubkey([u8; 32]),
    String(String),
    Bytes(Vec<u8>),
    Option(Option<Box<Value>>),
    Vec(Vec<Value>),
    Struct(Vec<Value>),
    Enum { variant: u8, fields: Vec<Value> },
}

impl Value {
    pub fn none() -> Self {
        Value::Option(None)
    }

    pub fn some(inner: Value) -> Self {
        Value::Option(Some(Box::new(inner)))
    }

    /// Wrap an optional value, mapping the inner value with `f`.
    pub fn from_option<T>(opt: Option<T>, f: impl FnOnce(T) -> Value) -> Self {
        Value::Option(opt.map(|v| Box::new(f(v))))
    }

    /// Name of the variant, matching [`FieldKind::name`](crate::FieldKind::name).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::U128(_) => "u128",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::Bool(_) => "bool",
            Value::Pubkey(_) => "pubkey",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Option(_) => "option",
            Value::Vec(_) => "vec",
            Value::Struct(_) => "struct",
            Value::Enum { .. } => "enum",
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Value::U8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Value::U16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_pubkey(&self) -> Option<&[u8; 32]> {
        match self {
            Value::Pubkey(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// `Some(None)` for an absent option, `Some(Some(inner))` for a present
    /// one, `None` if this is not an option at all.
    pub fn as_option(&self) -> Option<Option<&Value>> {
        match self {
            Value::Option(v) => Some(v.as_deref()),
            _ => None,
        }
    }

    pub fn as_vec(&self) -> Option<&[Value]> {
        match self {
            Value::Vec(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&[Value]> {
        match self {
            Value::Struct(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<(u8, &[Value])> {
        match self {
            Value::Enum { variant, fields } => Some((*variant, fields)),
            _ => None,
        }
    }
}
