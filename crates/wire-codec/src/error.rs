use thiserror::Error;

/// Codec failures. Both are local to a single encode/decode call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The byte stream is truncated, carries an out-of-range tag, or has
    /// bytes left over after the last field.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A value does not have the shape its schema field declares.
    #[error("unsupported field: {0}")]
    UnsupportedField(String),
}
