//! Value → bytes.

use crate::error::CodecError;
use crate::schema::{Field, FieldKind};
use crate::value::Value;

/// Encode `values` against the ordered `fields` of a payload schema.
///
/// Encoding is total for well-shaped input; a value whose shape disagrees
/// with its field is a programming error reported as
/// [`CodecError::UnsupportedField`] with the path of the offending field.
pub fn encode(values: &[Value], fields: &[Field]) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::with_capacity(64);
    write_fields(&mut buf, values, fields, "")?;
    tracing::trace!(fields = fields.len(), bytes = buf.len(), "encoded payload");
    Ok(buf)
}

/// Append the encoding of a single `value` of `kind` to `buf`.
pub fn encode_into(buf: &mut Vec<u8>, value: &Value, kind: &FieldKind) -> Result<(), CodecError> {
    write_value(buf, value, kind, "value")
}

fn write_fields(
    buf: &mut Vec<u8>,
    values: &[Value],
    fields: &[Field],
    parent: &str,
) -> Result<(), CodecError> {
    if values.len() != fields.len() {
        return Err(CodecError::UnsupportedField(format!(
            "{}: expected {} fields, got {}",
            if parent.is_empty() { "payload" } else { parent },
            fields.len(),
            values.len()
        )));
    }

    for (value, field) in values.iter().zip(fields) {
        let path = if parent.is_empty() {
            field.name.to_string()
        } else {
            format!("{parent}.{}", field.name)
        };
        write_value(buf, value, &field.kind, &path)?;
    }

    Ok(())
}

fn write_value(
    buf: &mut Vec<u8>,
    value: &Value,
    kind: &FieldKind,
    path: &str,
) -> Result<(), CodecError> {
    match (kind, value) {
        (FieldKind::U8, Value::U8(v)) => buf.push(*v),
        (FieldKind::U16, Value::U16(v)) => buf.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::U32, Value::U32(v)) => buf.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::U64, Value::U64(v)) => buf.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::U128, Value::U128(v)) => buf.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::I8, Value::I8(v)) => buf.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::I16, Value::I16(v)) => buf.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::I32, Value::I32(v)) => buf.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::I64, Value::I64(v)) => buf.extend_from_slice(&v.to_le_bytes()),
        (FieldKind::Bool, Value::Bool(v)) => buf.push(u8::from(*v)),
        (FieldKind::Pubkey, Value::Pubkey(v)) => buf.extend_from_slice(v),
        (FieldKind::String, Value::String(v)) => write_bytes(buf, v.as_bytes(), path)?,
        (FieldKind::Bytes, Value::Bytes(v)) => write_bytes(buf, v, path)?,
        (FieldKind::Option(_), Value::Option(None)) => buf.push(0),
        (FieldKind::Option(inner), Value::Option(Some(v))) => {
            buf.push(1);
            write_value(buf, v, inner, path)?;
        }
        (FieldKind::Vec(inner), Value::Vec(items)) => {
            write_len(buf, items.len(), path)?;
            for (i, item) in items.iter().enumerate() {
                write_value(buf, item, inner, &format!("{path}[{i}]"))?;
            }
        }
        (FieldKind::Struct(fields), Value::Struct(values)) => {
            write_fields(buf, values, fields, path)?;
        }
        (FieldKind::Enum(variants), Value::Enum { variant, fields }) => {
            let spec = variants.get(*variant as usize).ok_or_else(|| {
                CodecError::UnsupportedField(format!(
                    "{path}: variant {variant} out of range ({} variants)",
                    variants.len()
                ))
            })?;
            buf.push(*variant);
            write_fields(buf, fields, spec.fields, &format!("{path}::{}", spec.name))?;
        }
        _ => {
            return Err(CodecError::UnsupportedField(format!(
                "{path}: expected {}, found {}",
                kind.name(),
                value.kind_name()
            )))
        }
    }

    Ok(())
}

fn write_len(buf: &mut Vec<u8>, len: usize, path: &str) -> Result<(), CodecError> {
    let len = u32::try_from(len).map_err(|_| {
        CodecError::UnsupportedField(format!("{path}: length {len} exceeds u32 prefix"))
    })?;
    buf.extend_from_slice(&len.to_le_bytes());
    Ok(())
}

fn write_bytes(buf: &mut Vec<u8>, bytes: &[u8], path: &str) -> Result<(), CodecError> {
    write_len(buf, bytes.len(), path)?;
    buf.extend_from_slice(bytes);
    Ok(())
}
