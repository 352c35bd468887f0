//! Decoder dispatching through a [`FormatRegistry`].
//!
//! # Example
//!
//! ```
//! use amqp_types::codec::Decoder;
//! use amqp_types::Value;
//!
//! let decoder = Decoder::new();
//! let (value, consumed) = decoder.decode(&[0x00, 0xa1, 0x02, b'h', b'i'], 1).unwrap();
//! assert_eq!(value, Value::from("hi"));
//! assert_eq!(consumed, 4);
//! ```

use super::reader::Reader;
use super::registry::FormatRegistry;
use crate::config::DecoderConfig;
use crate::error::{CodecError, Result};
use crate::types::Value;

/// Decodes values with a registry and a set of limits.
///
/// Cheap to construct; holds only a registry reference and a copy of the
/// configuration.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'r> {
    registry: &'r FormatRegistry,
    config: DecoderConfig,
}

impl Decoder<'static> {
    /// Decoder using the global registry and default limits.
    pub fn new() -> Self {
        Self::with_registry(FormatRegistry::global())
    }
}

impl Default for Decoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Decoder<'r> {
    /// Decoder using a custom registry and default limits.
    pub fn with_registry(registry: &'r FormatRegistry) -> Self {
        Self {
            registry,
            config: DecoderConfig::default(),
        }
    }

    /// Replace the decoding limits.
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// The limits in effect.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode the value starting at `offset`.
    ///
    /// Returns the value and the number of bytes it occupies (format code,
    /// prefixes and payload), so callers can advance their cursor.
    ///
    /// # Errors
    ///
    /// - `MalformedData` if `offset` is at or past the end of `buf`, or if
    ///   the encoding is truncated or inconsistent.
    /// - `UnknownFormatCode` if a format code is not registered.
    /// - `LimitExceeded` if the input breaks a configured limit.
    pub fn decode(&self, buf: &[u8], offset: usize) -> Result<(Value, usize)> {
        if offset >= buf.len() {
            return Err(CodecError::MalformedData(format!(
                "no value at offset {} in a {}-byte buffer",
                offset,
                buf.len()
            )));
        }

        let mut reader = Reader::new(buf, offset, self.registry, &self.config);
        let value = reader.decode_value()?;
        Ok((value, reader.position() - offset))
    }

    /// Decode back-to-back values filling the whole of `buf`.
    pub fn decode_all(&self, buf: &[u8]) -> Result<Vec<Value>> {
        let mut values = Vec::new();
        let mut offset = 0;
        while offset < buf.len() {
            let (value, consumed) = self.decode(buf, offset)?;
            values.push(value);
            offset += consumed;
        }
        Ok(values)
    }
}
