//! Bytes → value.

use crate::error::CodecError;
use crate::schema::{Field, FieldKind};
use crate::value::Value;

/// Cursor over an input slice that reports offsets in its errors.
#[derive(Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::MalformedPayload(format!(
                "need {n} bytes at offset {}, {} left",
                self.pos,
                self.remaining()
            )));
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read one value of `kind`.
    pub fn read_value(&mut self, kind: &FieldKind) -> Result<Value, CodecError> {
        let value = match kind {
            FieldKind::U8 => Value::U8(self.read_u8()?),
            FieldKind::U16 => Value::U16(u16::from_le_bytes(self.read_array()?)),
            FieldKind::U32 => Value::U32(self.read_u32()?),
            FieldKind::U64 => Value::U64(u64::from_le_bytes(self.read_array()?)),
            FieldKind::U128 => Value::U128(u128::from_le_bytes(self.read_array()?)),
            FieldKind::I8 => Value::I8(i8::from_le_bytes(self.read_array()?)),
            FieldKind::I16 => Value::I16(i16::from_le_bytes(self.read_array()?)),
            FieldKind::I32 => Value::I32(i32::from_le_bytes(self.read_array()?)),
            FieldKind::I64 => Value::I64(i64::from_le_bytes(self.read_array()?)),
            FieldKind::Bool => Value::Bool(self.read_flag("bool")?),
            FieldKind::Pubkey => Value::Pubkey(self.read_array()?),
            FieldKind::String => {
                let at = self.pos;
                let bytes = self.read_len_prefixed()?;
                let s = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    CodecError::MalformedPayload(format!("invalid utf-8 string at offset {at}: {e}"))
                })?;
                Value::String(s)
            }
            FieldKind::Bytes => Value::Bytes(self.read_len_prefixed()?.to_vec()),
            FieldKind::Option(inner) => {
                if self.read_flag("option presence")? {
                    Value::some(self.read_value(inner)?)
                } else {
                    Value::none()
                }
            }
            FieldKind::Vec(inner) => {
                let at = self.pos;
                let len = self.read_u32()? as usize;
                // Zero-sized elements occupy no bytes, so only sized ones bound the count.
                let min = inner.min_encoded_len();
                if min > 0 && len.saturating_mul(min) > self.remaining() {
                    return Err(CodecError::MalformedPayload(format!(
                        "vector length {len} at offset {at} exceeds remaining {} bytes",
                        self.remaining()
                    )));
                }
                let mut items = Vec::with_capacity(len.min(self.remaining()));
                for _ in 0..len {
                    items.push(self.read_value(inner)?);
                }
                Value::Vec(items)
            }
            FieldKind::Struct(fields) => Value::Struct(self.read_fields(fields)?),
            FieldKind::Enum(variants) => {
                let at = self.pos;
                let tag = self.read_u8()?;
                let variant = variants.get(tag as usize).ok_or_else(|| {
                    CodecError::MalformedPayload(format!(
                        "enum tag {tag} at offset {at} out of range ({} variants)",
                        variants.len()
                    ))
                })?;
                Value::Enum {
                    variant: tag,
                    fields: self.read_fields(variant.fields)?,
                }
            }
        };

        Ok(value)
    }

    /// Read each of `fields` in order.
    pub fn read_fields(&mut self, fields: &[Field]) -> Result<Vec<Value>, CodecError> {
        fields.iter().map(|f| self.read_value(&f.kind)).collect()
    }

    fn read_flag(&mut self, what: &str) -> Result<bool, CodecError> {
        let at = self.pos;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::MalformedPayload(format!(
                "invalid {what} byte {other} at offset {at}"
            ))),
        }
    }

    fn read_len_prefixed(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.read_u32()? as usize;
        self.take(len)
    }
}

/// Decode a complete payload. Every byte must be consumed.
pub fn decode(bytes: &[u8], fields: &[Field]) -> Result<Vec<Value>, CodecError> {
    let (values, consumed) = decode_prefix(bytes, fields)?;
    if consumed != bytes.len() {
        return Err(CodecError::MalformedPayload(format!(
            "{} trailing bytes after offset {consumed}",
            bytes.len() - consumed
        )));
    }
    Ok(values)
}

/// Decode `fields` from the front of `bytes`, returning the values and the
/// number of bytes consumed. Trailing bytes are left untouched.
pub fn decode_prefix(bytes: &[u8], fields: &[Field]) -> Result<(Vec<Value>, usize), CodecError> {
    let mut reader = Reader::new(bytes);
    let values = reader.read_fields(fields)?;
    tracing::trace!(fields = fields.len(), consumed = reader.position(), "decoded payload");
    Ok((values, reader.position()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use crate::schema::Variant;
    use rand::Rng;

    const CREATOR: &[Field] = &[
        Field::new("address", FieldKind::Pubkey),
        Field::new("verified", FieldKind::Bool),
        Field::new("share", FieldKind::U8),
    ];

    const DETAILS: &[Variant] = &[Variant::new("V1", &[Field::new("size", FieldKind::U64)])];

    const PAYLOAD: &[Field] = &[
        Field::new("name", FieldKind::String),
        Field::new("fee", FieldKind::U16),
        Field::new("creators", FieldKind::Option(&FieldKind::Vec(&FieldKind::Struct(CREATOR)))),
        Field::new("details", FieldKind::Option(&FieldKind::Enum(DETAILS))),
        Field::new("delta", FieldKind::I32),
        Field::new("blob", FieldKind::Bytes),
    ];

    // -- Happy path ----------------------------------------------------------

    #[test]
    fn decodes_known_bytes() {
        let bytes = [
            1, 0, 0, 0, b'A', // name
            0xF4, 0x01, // fee = 500
            0,    // creators: None
            1, 0, 0x10, 0x27, 0, 0, 0, 0, 0, 0, // details: Some(V1 { size: 10_000 })
            0xFF, 0xFF, 0xFF, 0xFF, // delta = -1
            0, 0, 0, 0, // blob = []
        ];
        let values = decode(&bytes, PAYLOAD).unwrap();
        assert_eq!(values[0], Value::String("A".into()));
        assert_eq!(values[1], Value::U16(500));
        assert_eq!(values[2], Value::none());
        assert_eq!(
            values[3],
            Value::some(Value::Enum {
                variant: 0,
                fields: vec![Value::U64(10_000)]
            })
        );
        assert_eq!(values[4], Value::I32(-1));
        assert_eq!(values[5], Value::Bytes(vec![]));
    }

    #[test]
    fn decode_prefix_reports_consumed_and_ignores_tail() {
        let fields = [Field::new("tag", FieldKind::U8)];
        let (values, consumed) = decode_prefix(&[33, 0xAA, 0xBB], &fields).unwrap();
        assert_eq!(values, vec![Value::U8(33)]);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn roundtrip_randomised_payloads() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let name: String = (0..rng.gen_range(0..40))
                .map(|_| rng.gen_range(b'a'..=b'z') as char)
                .collect();
            let creators = if rng.gen_bool(0.5) {
                let n = rng.gen_range(0..5);
                Value::some(Value::Vec(
                    (0..n)
                        .map(|_| {
                            Value::Struct(vec![
                                Value::Pubkey(rng.gen()),
                                Value::Bool(rng.gen()),
                                Value::U8(rng.gen()),
                            ])
                        })
                        .collect(),
                ))
            } else {
                Value::none()
            };
            let details = if rng.gen_bool(0.5) {
                Value::some(Value::Enum {
                    variant: 0,
                    fields: vec![Value::U64(rng.gen())],
                })
            } else {
                Value::none()
            };
            let blob: Vec<u8> = (0..rng.gen_range(0..16)).map(|_| rng.gen()).collect();
            let values = vec![
                Value::String(name),
                Value::U16(rng.gen()),
                creators,
                details,
                Value::I32(rng.gen()),
                Value::Bytes(blob),
            ];

            let bytes = encode(&values, PAYLOAD).unwrap();
            assert_eq!(decode(&bytes, PAYLOAD).unwrap(), values);
        }
    }

    #[test]
    fn roundtrip_vector_of_empty_structs() {
        const UNITS: &[Field] = &[Field::new("units", FieldKind::Vec(&FieldKind::Struct(&[])))];
        let values = vec![Value::Vec(vec![Value::Struct(vec![]); 3])];

        let bytes = encode(&values, UNITS).unwrap();
        assert_eq!(bytes, vec![3, 0, 0, 0]);
        assert_eq!(decode(&bytes, UNITS).unwrap(), values);
    }

    // -- Malformed input -----------------------------------------------------

    #[test]
    fn empty_input_is_truncated() {
        let err = decode(&[], &[Field::new("x", FieldKind::U8)]).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedPayload("need 1 bytes at offset 0, 0 left".into())
        );
    }

    #[test]
    fn truncated_integer() {
        let err = decode(&[1, 2, 3], &[Field::new("x", FieldKind::U64)]).unwrap_err();
        assert!(matches!(err, CodecError::MalformedPayload(_)));
    }

    #[test]
    fn truncated_string_body() {
        let err = decode(&[5, 0, 0, 0, b'a'], &[Field::new("s", FieldKind::String)]).unwrap_err();
        assert!(err.to_string().contains("need 5 bytes at offset 4"));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let err = decode(&[1, 2], &[Field::new("x", FieldKind::U8)]).unwrap_err();
        assert!(err.to_string().contains("1 trailing bytes"));
    }

    #[test]
    fn option_presence_byte_must_be_zero_or_one() {
        let err = decode(&[2], &[Field::new("o", FieldKind::Option(&FieldKind::U8))]).unwrap_err();
        assert!(err.to_string().contains("invalid option presence byte 2 at offset 0"));
    }

    #[test]
    fn bool_byte_must_be_zero_or_one() {
        let err = decode(&[0xFF], &[Field::new("b", FieldKind::Bool)]).unwrap_err();
        assert!(err.to_string().contains("invalid bool byte 255"));
    }

    #[test]
    fn enum_tag_out_of_range() {
        let err = decode(&[1, 0, 0, 0, 0, 0, 0, 0, 0], &[Field::new("d", FieldKind::Enum(DETAILS))])
            .unwrap_err();
        assert!(err.to_string().contains("enum tag 1 at offset 0 out of range"));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = decode(&[2, 0, 0, 0, 0xC3, 0x28], &[Field::new("s", FieldKind::String)])
            .unwrap_err();
        assert!(err.to_string().contains("invalid utf-8"));
    }

    #[test]
    fn oversized_vector_length_fails_before_allocating() {
        let err = decode(
            &[0xFF, 0xFF, 0xFF, 0xFF],
            &[Field::new("v", FieldKind::Vec(&FieldKind::Struct(CREATOR)))],
        )
        .unwrap_err();
        assert!(err.to_string().contains("vector length 4294967295"));
    }

    // -- Reader --------------------------------------------------------------

    #[test]
    fn reader_tracks_position() {
        let mut reader = Reader::new(&[1, 2, 0, 0, 0, 9]);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.read_u32().unwrap(), 2);
        assert_eq!(reader.position(), 5);
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.take(1).unwrap(), &[9]);
        assert!(reader.take(1).is_err());
    }
}
