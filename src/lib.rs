//! # amqp-types
//!
//! AMQP 1.0 type system codec.
//!
//! This crate converts between in-memory [`Value`]s and the exact AMQP 1.0
//! binary encoding of primitive and compound types.
//!
//! ## Architecture
//!
//! - **Values** ([`types`]): closed enum of every supported AMQP type
//! - **Codec** ([`codec`]): narrowest-form encoder, registry-driven decoder
//! - **Limits** ([`config`]): depth, length and count bounds for untrusted input
//!
//! ## Example
//!
//! ```
//! use amqp_types::{decode, encode, Value};
//!
//! let value = Value::Map(vec![(Value::from("count"), Value::UInt(300))]);
//! let mut buf = vec![0u8; value.encoded_size()];
//!
//! let len = buf.len();
//! let written = encode(&value, &mut buf, 0, len).unwrap();
//! let (decoded, consumed) = decode(&buf, 0).unwrap();
//!
//! assert_eq!(decoded, value);
//! assert_eq!(consumed, written);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod types;

pub use codec::{decode, encode, encode_to_vec, encoded_size, Decoder, Encoder, FormatRegistry};
pub use config::DecoderConfig;
pub use error::{CodecError, Result};
pub use types::{Array, Described, Symbol, Timestamp, Value, ValueKind};
