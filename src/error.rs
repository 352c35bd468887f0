//! Error types for amqp-types.

use thiserror::Error;

/// Main error type for all encode/decode operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Decode met a format code that is not in the registry.
    #[error("Unknown format code: 0x{0:02x}")]
    UnknownFormatCode(u8),

    /// Input bytes do not form a valid encoding (truncated, inconsistent
    /// prefixes, invalid payload content).
    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// Target buffer is too small for the encoded value.
    #[error("Insufficient capacity: need {needed} bytes, {available} available")]
    InsufficientCapacity {
        /// Bytes the value needs.
        needed: usize,
        /// Bytes left between offset and capacity.
        available: usize,
    },

    /// The value cannot be represented on the wire.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Decoding stopped at a configured resource limit.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
}

impl CodecError {
    pub(crate) fn truncated(needed: usize, offset: usize, remaining: usize) -> Self {
        Self::MalformedData(format!(
            "need {} bytes at offset {}, only {} remain",
            needed, offset, remaining
        ))
    }
}

/// Result type alias using CodecError.
pub type Result<T> = std::result::Result<T, CodecError>;
