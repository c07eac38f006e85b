//! Big-endian primitives and the compact length convention.
//!
//! Reads go through [`ByteReader`], a bounds-checked cursor over a frame
//! payload: every accessor reports `Truncated` instead of slicing past the
//! end. Writes append to a `BytesMut` via `BufMut` plus the compact helpers
//! below. Compact strings/arrays store `N + 1` in the length byte, with a
//! stored 0 meaning null/empty.

use crate::error::{Result, ShoalError};
use bytes::{BufMut, BytesMut};

/// Bounds-checked cursor over one frame payload.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ByteReader { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Take `n` raw bytes, advancing the cursor.
    pub fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(ShoalError::Truncated(what));
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn get_u8(&mut self, what: &'static str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    pub fn get_i16(&mut self, what: &'static str) -> Result<i16> {
        let b = self.take(2, what)?;
        Ok(i16::from_be_bytes([b[0], b[1]]))
    }

    pub fn get_u32(&mut self, what: &'static str) -> Result<u32> {
        let b = self.take(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a compact string: one length byte holding `N + 1` (0 = null),
    /// then `N` utf8 bytes.
    pub fn get_compact_string(&mut self, what: &'static str) -> Result<String> {
        let stored = self.get_u8(what)?;
        if stored == 0 {
            return Ok(String::new());
        }
        let bytes = self.take(stored as usize - 1, what)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Consume one tagged-field marker byte. Non-empty tagged fields are not
    /// supported; rejecting them keeps every later offset trustworthy.
    pub fn skip_tag_buffer(&mut self) -> Result<()> {
        let tag = self.get_u8("tagged-field marker")?;
        if tag != 0 {
            return Err(ShoalError::Protocol(format!(
                "unsupported non-empty tagged fields (count {})",
                tag
            )));
        }
        Ok(())
    }
}

/// Write a compact length byte for `n` real elements (stored as `n + 1`).
pub fn put_compact_len(dst: &mut BytesMut, n: usize) {
    dst.put_u8((n + 1) as u8);
}

/// Write a compact string: length byte `len + 1`, then the utf8 bytes.
pub fn put_compact_string(dst: &mut BytesMut, s: &str) {
    put_compact_len(dst, s.len());
    dst.extend_from_slice(s.as_bytes());
}

/// Write an empty tagged-field marker.
pub fn put_tag_buffer(dst: &mut BytesMut) {
    dst.put_u8(0);
}
