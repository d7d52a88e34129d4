//! Whole-file record iteration.
//!
//! Parses the fixed 100-byte `.shp` main file header and walks the
//! concatenated records behind it. File I/O stays with the caller; this
//! module only ever sees an in-memory buffer.

use serde::Serialize;

use super::cursor::ByteCursor;
use super::record::{ShpRecord, ShpRecordReader};
use super::types::ShapeType;
use crate::error::{ShpError, ShpResult};
use crate::geom::Bounds;

/// Length of the fixed `.shp` main file header.
pub const FILE_HEADER_BYTES: usize = 100;

const FILE_CODE: u32 = 9994;
const FILE_VERSION: u32 = 1000;

/// Decoded `.shp` main file header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShpHeader {
    /// Total file length in bytes as stated by the header.
    pub file_length: u64,
    pub shape_type: ShapeType,
    pub bounds: Bounds,
    pub z_range: (f64, f64),
    pub m_range: (f64, f64),
}

impl ShpHeader {
    /// Decode and validate the header at the start of `buf`.
    pub fn decode(buf: &[u8]) -> ShpResult<ShpHeader> {
        let mut cur = ByteCursor::new(buf);
        let file_code = cur.read_u32()?;
        if file_code != FILE_CODE {
            return Err(ShpError::BadFileHeader(format!(
                "bad file code {file_code}"
            )));
        }
        let file_length = cur.seek(24).read_u32()? as u64 * 2;
        cur.little_endian();
        let version = cur.read_u32()?;
        if version != FILE_VERSION {
            return Err(ShpError::BadFileHeader(format!(
                "unsupported version {version}"
            )));
        }
        let shape_type = ShapeType::from_code(cur.read_u32()?)?;
        let v = cur.read_f64_array(8)?;
        Ok(ShpHeader {
            file_length,
            shape_type,
            bounds: Bounds::new(v[0], v[1], v[2], v[3]),
            z_range: (v[4], v[5]),
            m_range: (v[6], v[7]),
        })
    }
}

/// Iterates the records of an in-memory `.shp` buffer.
///
/// Yields one result per record. Iteration ends at the stated file length
/// or the buffer end, whichever comes first, and stops permanently after
/// the first decode error. Record payloads stay lazy; only headers are
/// decoded while iterating.
#[derive(Debug)]
pub struct ShpReader<'a> {
    buf: &'a [u8],
    header: ShpHeader,
    record_reader: ShpRecordReader,
    pos: usize,
    end: usize,
    failed: bool,
}

impl<'a> ShpReader<'a> {
    pub fn new(buf: &'a [u8]) -> ShpResult<Self> {
        let header = ShpHeader::decode(buf)?;
        let end = (header.file_length as usize).min(buf.len());
        Ok(ShpReader {
            buf,
            record_reader: ShpRecordReader::new(header.shape_type),
            header,
            pos: FILE_HEADER_BYTES,
            end,
            failed: false,
        })
    }

    pub fn header(&self) -> &ShpHeader {
        &self.header
    }
}

impl<'a> Iterator for ShpReader<'a> {
    type Item = ShpResult<ShpRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        // 12 bytes is the smallest possible record
        if self.failed || self.pos + 12 > self.end {
            return None;
        }
        let mut cur = ByteCursor::new(self.buf);
        cur.seek(self.pos);
        match self.record_reader.read_record(&mut cur) {
            Ok(rec) => {
                self.pos += rec.byte_length as usize;
                Some(Ok(rec))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
