//! Encoder and size calculator.
//!
//! Encoding is a two-step process: the exact size is computed first, the
//! target region is checked, and only then are bytes written. A failed
//! [`Encoder::encode`] therefore never touches the buffer.
//!
//! # Example
//!
//! ```
//! use amqp_types::codec::Encoder;
//! use amqp_types::Value;
//!
//! let value = Value::from("hi");
//! let mut buf = [0u8; 16];
//!
//! let written = Encoder::encode(&value, &mut buf, 2, 16).unwrap();
//! assert_eq!(written, value.encoded_size());
//! assert_eq!(&buf[2..6], &[0xa1, 0x02, b'h', b'i']);
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use super::{compound, primitive, variable};
use crate::error::{CodecError, Result};
use crate::types::Value;

/// Stateless AMQP value encoder.
///
/// Marker struct with static methods, like the other codecs in this crate.
pub struct Encoder;

impl Encoder {
    /// Exact number of bytes [`encode`](Self::encode) writes for `value`.
    #[inline]
    pub fn encoded_size(value: &Value) -> usize {
        value.encoded_size()
    }

    /// Encode `value` into `buf` starting at `offset`.
    ///
    /// `capacity` is the exclusive end of the writable region (clamped to
    /// `buf.len()`). Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// - `InsufficientCapacity` if fewer than `encoded_size()` bytes are
    ///   available between `offset` and `capacity`; the buffer is untouched.
    /// - `InvalidValue` if the value exceeds the 32-bit size limit.
    pub fn encode(value: &Value, buf: &mut [u8], offset: usize, capacity: usize) -> Result<usize> {
        let size = checked_size(value)?;

        let limit = capacity.min(buf.len());
        let available = limit.saturating_sub(offset);
        if available < size {
            return Err(CodecError::InsufficientCapacity {
                needed: size,
                available,
            });
        }

        let mut target = &mut buf[offset..offset + size];
        value.write_to(&mut target);
        debug_assert!(target.is_empty(), "encoded_size disagrees with write_to");
        Ok(size)
    }

    /// Encode `value` into a new vector.
    pub fn encode_to_vec(value: &Value) -> Result<Vec<u8>> {
        let size = checked_size(value)?;
        let mut buf = Vec::with_capacity(size);
        value.write_to(&mut buf);
        Ok(buf)
    }

    /// Encode `value` into a new `Bytes`.
    pub fn encode_to_bytes(value: &Value) -> Result<Bytes> {
        let size = checked_size(value)?;
        let mut buf = BytesMut::with_capacity(size);
        value.write_to(&mut buf);
        Ok(buf.freeze())
    }

    /// Append `value` to `buf`, returning the number of bytes written.
    pub fn encode_append<B: BufMut>(value: &Value, buf: &mut B) -> Result<usize> {
        let size = checked_size(value)?;
        if buf.remaining_mut() < size {
            return Err(CodecError::InsufficientCapacity {
                needed: size,
                available: buf.remaining_mut(),
            });
        }
        value.write_to(buf);
        Ok(size)
    }
}

/// Size of `value`, rejecting values whose size fields would overflow.
///
/// Every nested size is smaller than the total, so checking the total
/// covers all of them.
fn checked_size(value: &Value) -> Result<usize> {
    let size = value.encoded_size();
    if u32::try_from(size).is_err() {
        return Err(CodecError::InvalidValue(format!(
            "encoded size {} exceeds the 32-bit limit",
            size
        )));
    }
    Ok(size)
}

impl Value {
    /// Total encoded size: format code, prefixes and payload.
    pub fn encoded_size(&self) -> usize {
        1 + self.layout().1
    }

    /// The narrowest format code for this value and its payload size.
    pub(crate) fn layout(&self) -> (u8, usize) {
        match self {
            Self::List(items) => compound::list_layout(items),
            Self::Map(entries) => compound::map_layout(entries),
            Self::Array(array) => compound::array_layout(array),
            Self::Described(described) => compound::described_layout(described),
            _ => {
                let code = self.scalar_code();
                (code, self.payload_size(code))
            }
        }
    }

    /// Standalone code of a fixed- or variable-width value.
    fn scalar_code(&self) -> u8 {
        use super::format_code::*;

        match self {
            Self::Null => NULL,
            Self::Boolean(true) => BOOLEAN_TRUE,
            Self::Boolean(false) => BOOLEAN_FALSE,
            Self::UByte(_) => UBYTE,
            Self::UShort(_) => USHORT,
            Self::UInt(v) => primitive::uint_code(*v),
            Self::ULong(v) => primitive::ulong_code(*v),
            Self::Byte(_) => BYTE,
            Self::Short(_) => SHORT,
            Self::Int(v) => primitive::int_code(*v),
            Self::Long(v) => primitive::long_code(*v),
            Self::Float(_) => FLOAT,
            Self::Double(_) => DOUBLE,
            Self::Char(_) => CHAR,
            Self::Timestamp(_) => TIMESTAMP,
            Self::Uuid(_) => UUID,
            Self::Binary(b) => variable::code_for_len(VBIN8, VBIN32, b.len()),
            Self::String(s) => variable::code_for_len(STR8, STR32, s.len()),
            Self::Symbol(s) => variable::code_for_len(SYM8, SYM32, s.as_str().len()),
            Self::List(_) | Self::Map(_) | Self::Array(_) => self.layout().0,
            Self::Described(_) => DESCRIBED,
        }
    }

    /// Payload size when written with `code` (standalone or as an array
    /// element).
    pub(crate) fn payload_size(&self, code: u8) -> usize {
        match self {
            Self::Binary(_) | Self::String(_) | Self::Symbol(_) => {
                let len = variable::payload_bytes(self).map_or(0, <[u8]>::len);
                variable::payload_size(code, len)
            }
            Self::List(items) => compound::list_payload_size(code, items),
            Self::Map(entries) => compound::map_payload_size(code, entries),
            Self::Array(array) => compound::array_payload_size(code, array),
            Self::Described(described) => compound::described_layout(described).1,
            _ => primitive::fixed_width(code),
        }
    }

    /// Write the payload for `code`, without the format code itself.
    pub(crate) fn write_payload<B: BufMut>(&self, code: u8, buf: &mut B) {
        match self {
            Self::Binary(_) | Self::String(_) | Self::Symbol(_) => {
                let bytes = variable::payload_bytes(self).unwrap_or_default();
                variable::write_payload(code, bytes, buf);
            }
            Self::List(items) => compound::write_list(code, items, buf),
            Self::Map(entries) => compound::write_map(code, entries, buf),
            Self::Array(array) => compound::write_array(code, array, buf),
            Self::Described(described) => compound::write_described(described, buf),
            _ => primitive::write_payload(self, code, buf),
        }
    }

    /// Write format code and payload.
    pub(crate) fn write_to<B: BufMut>(&self, buf: &mut B) {
        let (code, _) = self.layout();
        buf.put_u8(code);
        self.write_payload(code, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Array, Described, Symbol, Timestamp};

    fn sample_values() -> Vec<Value> {
        vec![
            Value::Null,
            Value::Boolean(false),
            Value::UInt(0),
            Value::UInt(42),
            Value::UInt(u32::MAX),
            Value::ULong(u64::MAX),
            Value::Long(i64::MIN),
            Value::Double(-0.5),
            Value::Timestamp(Timestamp::from_millis(-1)),
            Value::from("x".repeat(300)),
            Value::Symbol(Symbol::from("sym")),
            Value::List(vec![Value::Int(1), Value::List(vec![])]),
            Value::Map(vec![(Value::from("k"), Value::Binary(vec![1; 260]))]),
            Value::Array(Array::from_values(vec![Value::Short(1), Value::Short(2)]).unwrap()),
            Value::Described(Described::new(Value::ULong(1), Value::Null)),
        ]
    }

    #[test]
    fn test_size_matches_written_bytes() {
        for value in sample_values() {
            let bytes = Encoder::encode_to_vec(&value).unwrap();
            assert_eq!(bytes.len(), value.encoded_size(), "{:?}", value);
        }
    }

    #[test]
    fn test_encode_at_offset() {
        let value = Value::UInt(300);
        let mut buf = [0xEEu8; 8];

        let written = Encoder::encode(&value, &mut buf, 3, 8).unwrap();

        assert_eq!(written, 5);
        assert_eq!(buf, [0xEE, 0xEE, 0xEE, 0x70, 0x00, 0x00, 0x01, 0x2c]);
    }

    #[test]
    fn test_insufficient_capacity_leaves_buffer_untouched() {
        let value = Value::List(vec![Value::from("hello"), Value::UInt(7)]);
        let mut buf = [0xEEu8; 16];

        let err = Encoder::encode(&value, &mut buf, 10, 16).unwrap_err();

        assert_eq!(
            err,
            CodecError::InsufficientCapacity {
                needed: value.encoded_size(),
                available: 6,
            }
        );
        assert_eq!(buf, [0xEE; 16]);
    }

    #[test]
    fn test_capacity_clamped_to_buffer() {
        let mut buf = [0u8; 2];
        let err = Encoder::encode(&Value::UInt(300), &mut buf, 0, 100).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InsufficientCapacity { needed: 5, available: 2 }
        ));
    }

    #[test]
    fn test_offset_past_capacity() {
        let mut buf = [0u8; 4];
        let err = Encoder::encode(&Value::Null, &mut buf, 5, 4).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InsufficientCapacity { needed: 1, available: 0 }
        ));
    }

    #[test]
    fn test_exact_fit() {
        let value = Value::from("hi");
        let mut buf = [0u8; 4];
        assert_eq!(Encoder::encode(&value, &mut buf, 0, 4).unwrap(), 4);
        assert_eq!(buf, [0xa1, 0x02, b'h', b'i']);
    }

    #[test]
    fn test_encode_to_bytes_matches_vec() {
        for value in sample_values() {
            let vec = Encoder::encode_to_vec(&value).unwrap();
            let bytes = Encoder::encode_to_bytes(&value).unwrap();
            assert_eq!(&bytes[..], &vec[..]);
        }
    }

    #[test]
    fn test_encode_append_sequence() {
        let mut buf = Vec::new();
        let a = Encoder::encode_append(&Value::Boolean(true), &mut buf).unwrap();
        let b = Encoder::encode_append(&Value::UInt(0), &mut buf).unwrap();

        assert_eq!((a, b), (1, 1));
        assert_eq!(buf, vec![0x41, 0x43]);
    }

    #[test]
    fn test_encode_append_into_short_slice() {
        let mut storage = [0u8; 3];
        let mut slice = &mut storage[..];
        let err = Encoder::encode_append(&Value::from("hello"), &mut slice).unwrap_err();
        assert!(matches!(err, CodecError::InsufficientCapacity { .. }));
        assert_eq!(storage, [0; 3]);
    }
}
