//! Format registry mapping format codes to decode routines.
//!
//! The registry is a 256-slot table indexed by format code. It is filled
//! once and then only read, so a shared `&FormatRegistry` can be used from
//! any number of threads without locking.
//!
//! # Example
//!
//! ```
//! use amqp_types::codec::{format_code, FormatRegistry};
//! use amqp_types::ValueKind;
//!
//! let registry = FormatRegistry::global();
//! assert_eq!(registry.lookup(format_code::STR8).unwrap().kind, ValueKind::String);
//! assert!(registry.lookup(0x74).is_err()); // decimal32
//! ```

use std::fmt;
use std::sync::OnceLock;

use super::reader::Reader;
use super::{compound, primitive, variable};
use crate::error::{CodecError, Result};
use crate::types::{Value, ValueKind};

/// Decode routine for one or more format codes.
///
/// Called with the reader positioned just after the format code, which is
/// passed as the second argument.
pub type Constructor = fn(&mut Reader<'_>, u8) -> Result<Value>;

/// A registered format code.
#[derive(Clone, Copy)]
pub struct Entry {
    /// Kind of the values this code produces.
    pub kind: ValueKind,
    /// Routine that decodes the payload.
    pub constructor: Constructor,
}

/// Table of all decodable format codes.
pub struct FormatRegistry {
    entries: [Option<Entry>; 256],
}

static GLOBAL: OnceLock<FormatRegistry> = OnceLock::new();

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: [None; 256],
        }
    }

    /// Create a registry holding every AMQP 1.0 code this crate supports.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        primitive::register(&mut registry);
        variable::register(&mut registry);
        compound::register(&mut registry);
        registry
    }

    /// The process-wide standard registry, built on first use.
    pub fn global() -> &'static FormatRegistry {
        GLOBAL.get_or_init(|| {
            let registry = Self::standard();
            tracing::debug!(codes = registry.len(), "format registry initialized");
            registry
        })
    }

    /// Register a decode routine for `code`.
    ///
    /// Registering a code twice replaces the earlier routine.
    pub fn register(&mut self, code: u8, kind: ValueKind, constructor: Constructor) {
        self.entries[usize::from(code)] = Some(Entry { kind, constructor });
    }

    /// Look up the routine for `code`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFormatCode` if `code` was never registered.
    pub fn lookup(&self, code: u8) -> Result<Entry> {
        self.entries[usize::from(code)].ok_or(CodecError::UnknownFormatCode(code))
    }

    /// Check if `code` is registered.
    #[inline]
    pub fn contains(&self, code: u8) -> bool {
        self.entries[usize::from(code)].is_some()
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Check if no code is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("kind", &self.kind).finish_non_exhaustive()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<String> = (0..=u8::MAX)
            .filter(|&c| self.contains(c))
            .map(|c| format!("0x{:02x}", c))
            .collect();
        f.debug_struct("FormatRegistry").field("codes", &codes).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::format_code;

    fn decode_always_null(_: &mut Reader<'_>, _: u8) -> Result<Value> {
        Ok(Value::Null)
    }

    #[test]
    fn test_empty_registry() {
        let registry = FormatRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(
            registry.lookup(format_code::NULL).unwrap_err(),
            CodecError::UnknownFormatCode(format_code::NULL)
        );
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = FormatRegistry::new();
        registry.register(0x30, ValueKind::Null, decode_always_null);

        let entry = registry.lookup(0x30).unwrap();
        assert_eq!(entry.kind, ValueKind::Null);
        assert!(registry.contains(0x30));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = FormatRegistry::new();
        registry.register(0x30, ValueKind::Null, decode_always_null);
        registry.register(0x30, ValueKind::Boolean, decode_always_null);

        assert_eq!(registry.lookup(0x30).unwrap().kind, ValueKind::Boolean);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_standard_codes() {
        let registry = FormatRegistry::standard();

        for code in [
            format_code::DESCRIBED,
            format_code::NULL,
            format_code::BOOLEAN,
            format_code::BOOLEAN_TRUE,
            format_code::BOOLEAN_FALSE,
            format_code::UINT0,
            format_code::SMALL_UINT,
            format_code::UINT,
            format_code::UUID,
            format_code::SYM32,
            format_code::LIST0,
            format_code::MAP32,
            format_code::ARRAY8,
        ] {
            assert!(registry.contains(code), "0x{:02x} missing", code);
        }
        assert_eq!(registry.len(), 37);
    }

    #[test]
    fn test_every_named_code_is_registered() {
        let registry = FormatRegistry::global();
        for code in 0..=u8::MAX {
            assert_eq!(
                format_code::name(code).is_some(),
                registry.contains(code),
                "0x{:02x}",
                code
            );
        }
    }

    #[test]
    fn test_global_is_shared() {
        let a = FormatRegistry::global() as *const FormatRegistry;
        let b = FormatRegistry::global() as *const FormatRegistry;
        assert_eq!(a, b);
    }
}
