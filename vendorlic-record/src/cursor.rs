//! Bounded read cursor over a decode buffer.

use crate::error::{RecordError, RecordResult};

/// Reads fixed-width fields from a byte slice, failing closed with
/// [`RecordError::Truncated`] when the slice runs out.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Reads exactly `n` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Truncated`] naming `field` if fewer than `n`
    /// bytes remain. The cursor does not advance on failure.
    pub fn read_fixed_bytes(&mut self, n: usize, field: &'static str) -> RecordResult<&'a [u8]> {
        let remaining = self.remaining();
        if remaining < n {
            return Err(RecordError::Truncated {
                field,
                needed: n,
                remaining,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> RecordResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_fixed_bytes(N, field)?);
        Ok(out)
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64(&mut self, field: &'static str) -> RecordResult<u64> {
        self.read_array::<8>(field).map(u64::from_le_bytes)
    }

    /// Reads a little-endian `i64`.
    pub fn read_i64(&mut self, field: &'static str) -> RecordResult<i64> {
        self.read_array::<8>(field).map(i64::from_le_bytes)
    }
}
