//! Codec module - AMQP 1.0 primitive and compound type encoding.
//!
//! This module turns [`Value`]s into their exact wire encoding and back:
//!
//! - [`Encoder`] - writes a value into a caller buffer (or a new one)
//! - [`Decoder`] - reads values through a [`FormatRegistry`]
//! - [`FormatRegistry`] - maps each format code to its decode routine
//! - [`format_code`] - the format code constants
//!
//! # Design
//!
//! Values are a closed enum; the registry is a fixed 256-entry table of
//! plain function pointers built once and shared read-only. Encoding picks
//! the narrowest form for every integer, length, size and count.
//!
//! # Example
//!
//! ```
//! use amqp_types::codec::{decode, encode};
//! use amqp_types::Value;
//!
//! let value = Value::List(vec![Value::Boolean(true), Value::Int(5)]);
//! let mut buf = [0u8; 32];
//!
//! let len = buf.len();
//! let written = encode(&value, &mut buf, 0, len).unwrap();
//! assert_eq!(&buf[..written], &[0xc0, 0x04, 0x02, 0x41, 0x54, 0x05]);
//!
//! let (decoded, consumed) = decode(&buf[..written], 0).unwrap();
//! assert_eq!(decoded, value);
//! assert_eq!(consumed, written);
//! ```

mod compound;
mod decoder;
mod encoder;
pub mod format_code;
mod primitive;
mod reader;
mod registry;
mod variable;


pub use decoder::Decoder;
pub use encoder::Encoder;
pub use reader::Reader;
pub use registry::{Constructor, Entry, FormatRegistry};

use crate::error::Result;
use crate::types::Value;

/// Exact encoded size of `value` (standalone function).
#[inline]
pub fn encoded_size(value: &Value) -> usize {
    value.encoded_size()
}

/// Encode `value` into `buf[offset..capacity]` (standalone function).
#[inline]
pub fn encode(value: &Value, buf: &mut [u8], offset: usize, capacity: usize) -> Result<usize> {
    Encoder::encode(value, buf, offset, capacity)
}

/// Encode `value` into a new vector (standalone function).
#[inline]
pub fn encode_to_vec(value: &Value) -> Result<Vec<u8>> {
    Encoder::encode_to_vec(value)
}

/// Decode the value at `offset` with the global registry and default
/// limits (standalone function).
#[inline]
pub fn decode(buf: &[u8], offset: usize) -> Result<(Value, usize)> {
    Decoder::new().decode(buf, offset)
}
