//! Positioned byte reading with explicit endianness.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{ShpError, ShpResult};

/// Byte order applied by [`ByteCursor`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// A positioned reader over a byte slice.
///
/// Shapefile records flip byte order mid-stream (big-endian record headers,
/// little-endian geometry), so the active order is cursor state, switched
/// explicitly with [`big_endian`](Self::big_endian) and
/// [`little_endian`](Self::little_endian). A fresh cursor reads big-endian.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ByteCursor {
            buf,
            pos: 0,
            endian: Endian::Big,
        }
    }

    /// The full underlying slice, independent of the current position.
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to an absolute offset. Seeking past the end is allowed; the
    /// next read reports the overrun.
    pub fn seek(&mut self, pos: usize) -> &mut Self {
        self.pos = pos;
        self
    }

    /// Advance the position by `n` bytes without reading.
    pub fn skip(&mut self, n: usize) -> &mut Self {
        self.pos += n;
        self
    }

    pub fn big_endian(&mut self) -> &mut Self {
        self.endian = Endian::Big;
        self
    }

    pub fn little_endian(&mut self) -> &mut Self {
        self.endian = Endian::Little;
        self
    }

    fn take(&mut self, n: usize) -> ShpResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(ShpError::UnexpectedEof { offset: self.pos })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u32(&mut self) -> ShpResult<u32> {
        let b = self.take(4)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_u32(b),
            Endian::Little => LittleEndian::read_u32(b),
        })
    }

    pub fn read_f64(&mut self) -> ShpResult<f64> {
        let b = self.take(8)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_f64(b),
            Endian::Little => LittleEndian::read_f64(b),
        })
    }

    /// Read `n` consecutive doubles in the active byte order.
    pub fn read_f64_array(&mut self, n: usize) -> ShpResult<Vec<f64>> {
        let b = self.take(n * 8)?;
        let mut out = vec![0.0; n];
        match self.endian {
            Endian::Big => BigEndian::read_f64_into(b, &mut out),
            Endian::Little => LittleEndian::read_f64_into(b, &mut out),
        }
        Ok(out)
    }
}
