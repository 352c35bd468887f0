//! Decoder configuration.
//!
//! Limits applied while decoding untrusted input. Encoding needs no
//! configuration: its output is fully determined by the value.
//!
//! # Example
//!
//! ```
//! use amqp_types::DecoderConfig;
//!
//! let config = DecoderConfig::default().with_max_depth(8);
//! assert_eq!(config.max_depth, 8);
//! ```

use serde::{Deserialize, Serialize};

/// Default maximum nesting depth of compound and described values.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum declared length of a single payload (1 GB).
pub const DEFAULT_MAX_VALUE_LEN: u32 = 1_073_741_824;

/// Default maximum element count of a single list, map or array.
pub const DEFAULT_MAX_ELEMENT_COUNT: u32 = 16 * 1024 * 1024;

/// Default maximum number of compound elements in one decoded value.
pub const DEFAULT_MAX_TOTAL_ELEMENTS: u32 = 1024 * 1024;

/// Limits enforced by [`Decoder`](crate::codec::Decoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Maximum nesting depth (a top-level scalar has depth 0).
    pub max_depth: usize,
    /// Maximum declared byte length of binary/string/symbol payloads and
    /// of compound size fields.
    pub max_value_len: u32,
    /// Maximum declared element count of a compound value.
    pub max_element_count: u32,
    /// Maximum sum of declared element counts over every list, map and
    /// array in one decoded value. Bounds arrays of zero-width elements,
    /// which consume no input per element.
    pub max_total_elements: u32,
}

impl DecoderConfig {
    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum declared payload length.
    pub fn with_max_value_len(mut self, max_value_len: u32) -> Self {
        self.max_value_len = max_value_len;
        self
    }

    /// Set the maximum declared element count.
    pub fn with_max_element_count(mut self, max_element_count: u32) -> Self {
        self.max_element_count = max_element_count;
        self
    }

    /// Set the per-value element budget.
    pub fn with_max_total_elements(mut self, max_total_elements: u32) -> Self {
        self.max_total_elements = max_total_elements;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_value_len: DEFAULT_MAX_VALUE_LEN,
            max_element_count: DEFAULT_MAX_ELEMENT_COUNT,
            max_total_elements: DEFAULT_MAX_TOTAL_ELEMENTS,
        }
    }
}
