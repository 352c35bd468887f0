//! Bounds-checked cursor over an input buffer.
//!
//! Every read checks the remaining length first and fails with
//! `MalformedData` instead of panicking. Compound values narrow the
//! readable window to their declared size with [`Reader::with_span`], so an
//! element can never read past the end of its parent.

use super::registry::{Entry, FormatRegistry};
use crate::config::DecoderConfig;
use crate::error::{CodecError, Result};
use crate::types::Value;

/// Decoding cursor handed to every registered constructor.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    /// Exclusive end of the current window.
    end: usize,
    depth: usize,
    /// Element budget left for this decode.
    elements_left: usize,
    registry: &'a FormatRegistry,
    config: &'a DecoderConfig,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(
        buf: &'a [u8],
        offset: usize,
        registry: &'a FormatRegistry,
        config: &'a DecoderConfig,
    ) -> Self {
        Self {
            buf,
            pos: offset.min(buf.len()),
            end: buf.len(),
            depth: 0,
            elements_left: config.max_total_elements as usize,
            registry,
            config,
        }
    }

    /// Absolute position in the underlying buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left in the current window.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Limits in effect for this decode.
    #[inline]
    pub fn config(&self) -> &DecoderConfig {
        self.config
    }

    /// Read exactly `len` bytes.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(CodecError::truncated(len, self.pos, self.remaining()));
        }
        let buf = self.buf;
        let slice = &buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read a fixed number of bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// Read a length, size or count prefix: 1 byte if `narrow`, else 4
    /// bytes big-endian.
    pub fn read_length(&mut self, narrow: bool) -> Result<usize> {
        if narrow {
            Ok(usize::from(self.read_u8()?))
        } else {
            let len = u32::from_be_bytes(self.read_array::<4>()?);
            usize::try_from(len)
                .map_err(|_| CodecError::LimitExceeded(format!("length {} exceeds usize", len)))
        }
    }

    /// Read a format code and decode the value it introduces.
    pub fn decode_value(&mut self) -> Result<Value> {
        let code = self.read_u8()?;
        let entry = self.lookup(code)?;
        (entry.constructor)(self, code)
    }

    /// Look up a code in the registry this reader decodes with.
    pub fn lookup(&self, code: u8) -> Result<Entry> {
        self.registry.lookup(code).map_err(|e| {
            tracing::debug!(code, offset = self.pos.saturating_sub(1), "unknown format code");
            e
        })
    }

    /// Run `f` inside a window of exactly `len` bytes.
    ///
    /// Fails if the window exceeds the remaining input or if `f` leaves
    /// bytes of the window unread.
    pub fn with_span<T>(
        &mut self,
        len: usize,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if self.remaining() < len {
            return Err(CodecError::truncated(len, self.pos, self.remaining()));
        }

        let outer_end = self.end;
        self.end = self.pos + len;
        let result = f(self);
        let leftover = self.end - self.pos;
        self.end = outer_end;

        let value = result?;
        if leftover != 0 {
            return Err(CodecError::MalformedData(format!(
                "{} unread bytes at end of {}-byte span",
                leftover, len
            )));
        }
        Ok(value)
    }

    /// Enter one level of nesting.
    pub fn enter(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            tracing::debug!(depth = self.depth, "nesting limit reached");
            return Err(CodecError::LimitExceeded(format!(
                "nesting deeper than {} levels",
                self.config.max_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one level of nesting.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Check a declared payload length against the configured limit.
    pub fn check_value_len(&self, len: usize) -> Result<()> {
        if len > self.config.max_value_len as usize {
            tracing::debug!(len, "declared length over limit");
            return Err(CodecError::LimitExceeded(format!(
                "declared length {} exceeds maximum {}",
                len, self.config.max_value_len
            )));
        }
        Ok(())
    }

    /// Check a declared element count against the configured limit.
    pub fn check_element_count(&self, count: usize) -> Result<()> {
        if count > self.config.max_element_count as usize {
            tracing::debug!(count, "declared element count over limit");
            return Err(CodecError::LimitExceeded(format!(
                "element count {} exceeds maximum {}",
                count, self.config.max_element_count
            )));
        }
        Ok(())
    }

    /// Take `count` elements from the per-decode element budget.
    ///
    /// Called before any element is decoded, so a rejected compound
    /// allocates nothing.
    pub fn reserve_elements(&mut self, count: usize) -> Result<()> {
        if count > self.elements_left {
            tracing::debug!(count, left = self.elements_left, "element budget exhausted");
            return Err(CodecError::LimitExceeded(format!(
                "more than {} elements in one value",
                self.config.max_total_elements
            )));
        }
        self.elements_left -= count;
        Ok(())
    }
}
