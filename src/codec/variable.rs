//! Variable-width values: binary, string and symbol.
//!
//! Layout: `[code][len:1|4][bytes:len]`. The 8-bit length form is used
//! whenever the byte length fits in a `u8`; empty values still carry a
//! zero length.

use bytes::BufMut;

use super::format_code::{self, *};
use super::primitive::unexpected_code;
use super::reader::Reader;
use super::registry::FormatRegistry;
use crate::error::{CodecError, Result};
use crate::types::{Symbol, Value, ValueKind};

/// Narrow/wide format codes for a variable-width kind.
pub(crate) fn codes_for(kind: ValueKind) -> Option<(u8, u8)> {
    match kind {
        ValueKind::Binary => Some((VBIN8, VBIN32)),
        ValueKind::String => Some((STR8, STR32)),
        ValueKind::Symbol => Some((SYM8, SYM32)),
        _ => None,
    }
}

/// Raw bytes of a variable-width value.
pub(crate) fn payload_bytes(value: &Value) -> Option<&[u8]> {
    match value {
        Value::Binary(b) => Some(b),
        Value::String(s) => Some(s.as_bytes()),
        Value::Symbol(s) => Some(s.as_str().as_bytes()),
        _ => None,
    }
}

/// Narrowest code for a payload of `len` bytes.
#[inline]
pub(crate) fn code_for_len(narrow: u8, wide: u8, len: usize) -> u8 {
    if len <= NARROW_MAX {
        narrow
    } else {
        wide
    }
}

#[inline]
pub(crate) fn prefix_width(code: u8) -> usize {
    if format_code::is_narrow(code) {
        1
    } else {
        4
    }
}

/// Write a 1- or 4-byte length/size/count prefix for `code`.
///
/// Callers check that `n` fits: narrow codes are only chosen for values
/// up to 255 and encoders reject totals above `u32::MAX`.
#[inline]
pub(crate) fn put_prefix<B: BufMut>(buf: &mut B, code: u8, n: usize) {
    if format_code::is_narrow(code) {
        buf.put_u8(n as u8);
    } else {
        buf.put_u32(n as u32);
    }
}

pub(crate) fn payload_size(code: u8, len: usize) -> usize {
    prefix_width(code) + len
}

pub(crate) fn write_payload<B: BufMut>(code: u8, bytes: &[u8], buf: &mut B) {
    put_prefix(buf, code, bytes.len());
    buf.put_slice(bytes);
}

fn read_payload<'a>(r: &mut Reader<'a>, code: u8) -> Result<&'a [u8]> {
    let len = r.read_length(format_code::is_narrow(code))?;
    r.check_value_len(len)?;
    r.read_slice(len)
}

fn decode_binary(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    if !matches!(code, VBIN8 | VBIN32) {
        return Err(unexpected_code(code, ValueKind::Binary));
    }
    Ok(Value::Binary(read_payload(r, code)?.to_vec()))
}

fn decode_string(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    if !matches!(code, STR8 | STR32) {
        return Err(unexpected_code(code, ValueKind::String));
    }
    let text = std::str::from_utf8(read_payload(r, code)?)
        .map_err(|e| CodecError::MalformedData(format!("invalid UTF-8 in string: {}", e)))?;
    Ok(Value::String(text.to_owned()))
}

fn decode_symbol(r: &mut Reader<'_>, code: u8) -> Result<Value> {
    if !matches!(code, SYM8 | SYM32) {
        return Err(unexpected_code(code, ValueKind::Symbol));
    }
    let text = std::str::from_utf8(read_payload(r, code)?)
        .map_err(|e| CodecError::MalformedData(format!("invalid UTF-8 in symbol: {}", e)))?;
    Ok(Value::Symbol(Symbol::new(text)))
}

pub(crate) fn register(registry: &mut FormatRegistry) {
    registry.register(VBIN8, ValueKind::Binary, decode_binary);
    registry.register(VBIN32, ValueKind::Binary, decode_binary);
    registry.register(STR8, ValueKind::String, decode_string);
    registry.register(STR32, ValueKind::String, decode_string);
    registry.register(SYM8, ValueKind::Symbol, decode_symbol);
    registry.register(SYM32, ValueKind::Symbol, decode_symbol);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, Decoder, Encoder};
    use crate::config::DecoderConfig;

    #[test]
    fn test_string_narrow_form() {
        let bytes = Encoder::encode_to_vec(&Value::from("hi")).unwrap();
        assert_eq!(bytes, vec![STR8, 0x02, b'h', b'i']);
    }

    #[test]
    fn test_empty_values_keep_length_field() {
        assert_eq!(
            Encoder::encode_to_vec(&Value::Binary(vec![])).unwrap(),
            vec![VBIN8, 0x00]
        );
        assert_eq!(
            Encoder::encode_to_vec(&Value::from("")).unwrap(),
            vec![STR8, 0x00]
        );
        assert_eq!(
            Encoder::encode_to_vec(&Value::Symbol(Symbol::new(""))).unwrap(),
            vec![SYM8, 0x00]
        );
    }

    #[test]
    fn test_length_boundary() {
        let at_limit = Value::Binary(vec![0xAA; 255]);
        let bytes = Encoder::encode_to_vec(&at_limit).unwrap();
        assert_eq!(bytes[0], VBIN8);
        assert_eq!(bytes.len(), 2 + 255);

        let over_limit = Value::Binary(vec![0xAA; 256]);
        let bytes = Encoder::encode_to_vec(&over_limit).unwrap();
        assert_eq!(&bytes[..5], &[VBIN32, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(bytes.len(), 5 + 256);
        assert_eq!(decode(&bytes, 0).unwrap(), (over_limit, 261));
    }

    #[test]
    fn test_str32_roundtrip() {
        let value = Value::from("s".repeat(256));
        let bytes = Encoder::encode_to_vec(&value).unwrap();

        assert_eq!(&bytes[..5], &[STR32, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(bytes.len(), 5 + 256);
        assert_eq!(decode(&bytes, 0).unwrap(), (value, 261));
    }

    #[test]
    fn test_sym32_roundtrip() {
        let value = Value::Symbol(Symbol::new("y".repeat(300)));
        let bytes = Encoder::encode_to_vec(&value).unwrap();

        assert_eq!(bytes[0], SYM32);
        assert_eq!(&bytes[1..5], &300u32.to_be_bytes());
        assert_eq!(decode(&bytes, 0).unwrap(), (value, 305));
    }

    #[test]
    fn test_utf8_length_is_bytes_not_chars() {
        let bytes = Encoder::encode_to_vec(&Value::from("é")).unwrap();
        assert_eq!(bytes, vec![STR8, 0x02, 0xc3, 0xa9]);
    }

    #[test]
    fn test_symbol_roundtrip() {
        let value = Value::Symbol(Symbol::from("amqp:link:detach-forced"));
        let bytes = Encoder::encode_to_vec(&value).unwrap();
        assert_eq!(bytes[0], SYM8);
        assert_eq!(decode(&bytes, 0).unwrap(), (value, bytes.len()));
    }

    #[test]
    fn test_declared_length_exceeds_buffer() {
        let err = decode(&[STR8, 0x05, b'h', b'i'], 0).unwrap_err();
        assert!(matches!(err, CodecError::MalformedData(_)));

        let err = decode(&[VBIN32, 0x00, 0x00, 0x10, 0x00, 0x01], 0).unwrap_err();
        assert!(matches!(err, CodecError::MalformedData(_)));
    }

    #[test]
    fn test_truncated_length_prefix() {
        let err = decode(&[STR32, 0x00, 0x00], 0).unwrap_err();
        assert!(matches!(err, CodecError::MalformedData(_)));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = decode(&[STR8, 0x02, 0xff, 0xfe], 0).unwrap_err();
        assert!(err.to_string().contains("invalid UTF-8 in string"));

        let err = decode(&[SYM8, 0x01, 0x80], 0).unwrap_err();
        assert!(err.to_string().contains("invalid UTF-8 in symbol"));
    }

    #[test]
    fn test_value_len_limit() {
        let decoder = Decoder::new().with_config(DecoderConfig::default().with_max_value_len(3));

        assert!(decoder.decode(&[VBIN8, 0x03, 1, 2, 3], 0).is_ok());
        let err = decoder.decode(&[VBIN8, 0x04, 1, 2, 3, 4], 0).unwrap_err();
        assert!(matches!(err, CodecError::LimitExceeded(_)));
    }
}
