//! Shape record decoding.
//!
//! Record layout (offsets from record start):
//!
//! ```text
//! [record number: u32 BE][content length in 16-bit words: u32 BE]
//! [shape type: u32 LE]
//! [bounding box: 4 x f64 LE]            multi-coordinate types only
//! [part count: u32 LE]                  multi-part types only
//! [point count: u32 LE]                 multi-coordinate types only
//! [part index: part count x u32 LE]     multi-part types only
//! [x/y pairs: point count x 2 x f64 LE]
//! [z range + z values]                  Z types
//! [m range + m values]                  optional, inferred from length
//! ```
//!
//! Header fields are decoded eagerly; everything after is read on demand by
//! seeking from the stored record start, so accessors can run in any order
//! and repeatedly without copying the payload up front.

use serde::Serialize;

use super::cursor::ByteCursor;
use super::types::{ShapeType, TypeFlags};
use crate::error::{ShpError, ShpResult};
use crate::geom::{Bounds, Point};

/// One decoded coordinate. Z and M are present only when the record
/// carries those dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShpPoint {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub m: Option<f64>,
}

/// The payload of one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DecodedShape {
    Null,
    Point(ShpPoint),
    /// Paths or rings in file order. Ring winding is preserved as stored.
    Parts(Vec<Vec<ShpPoint>>),
}

impl DecodedShape {
    /// 2D coordinate paths, dropping Z and M values.
    pub fn xy_paths(&self) -> Vec<Vec<Point>> {
        match self {
            DecodedShape::Null => Vec::new(),
            DecodedShape::Point(p) => vec![vec![Point::new(p.x, p.y)]],
            DecodedShape::Parts(parts) => parts
                .iter()
                .map(|part| part.iter().map(|p| Point::new(p.x, p.y)).collect())
                .collect(),
        }
    }
}

/// Builds record decoders for one shape type.
///
/// A `.shp` file carries a single shape type, so the capability flags are
/// derived once and reused for every record.
#[derive(Debug, Clone, Copy)]
pub struct ShpRecordReader {
    shape_type: ShapeType,
    flags: TypeFlags,
}

impl ShpRecordReader {
    pub fn new(shape_type: ShapeType) -> Self {
        ShpRecordReader {
            shape_type,
            flags: shape_type.flags(),
        }
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// Decode the record header at the cursor's position.
    ///
    /// Leaves the cursor just past the decoded header fields; callers that
    /// walk multiple records should advance by [`ShpRecord::byte_length`]
    /// from the record start instead.
    pub fn read_record<'a>(&self, cur: &mut ByteCursor<'a>) -> ShpResult<ShpRecord<'a>> {
        let start = cur.position();
        cur.big_endian();
        let id = cur.read_u32()?;
        let byte_length = cur.read_u32()? as i64 * 2 + 8;
        let type_code = cur.little_endian().read_u32()?;
        let is_null = type_code == 0;
        if byte_length <= 0 || (!is_null && type_code != self.shape_type.code()) {
            return Err(ShpError::BadRecordHeader { id });
        }

        let (part_count, point_count) = if is_null {
            (0, 0)
        } else if self.flags.single_point {
            (1, 1)
        } else {
            cur.skip(32); // bounding box, read on demand
            let parts = if self.flags.has_parts { cur.read_u32()? } else { 1 };
            let points = cur.read_u32()?;
            (parts, points)
        };

        Ok(ShpRecord {
            buf: cur.buffer(),
            start,
            shape_type: self.shape_type,
            flags: self.flags,
            id,
            byte_length: byte_length as u64,
            is_null,
            point_count,
            part_count,
        })
    }
}

/// One decoded record header with lazy payload accessors.
#[derive(Debug, Clone)]
pub struct ShpRecord<'a> {
    buf: &'a [u8],
    start: usize,
    shape_type: ShapeType,
    flags: TypeFlags,
    /// 1-based record number.
    pub id: u32,
    /// Total record length: stated content length doubled, plus the
    /// 8-byte record header.
    pub byte_length: u64,
    pub is_null: bool,
    pub point_count: u32,
    pub part_count: u32,
}

impl<'a> ShpRecord<'a> {
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    fn cursor_at(&self, offset: usize) -> ByteCursor<'a> {
        let mut cur = ByteCursor::new(self.buf);
        cur.seek(self.start + offset).little_endian();
        cur
    }

    /// Offset of the interleaved X/Y block from the record start.
    fn xy_pos(&self) -> usize {
        let mut offs = 12;
        if !self.flags.single_point {
            offs += 4; // point count
        }
        if self.flags.has_bounds {
            offs += 32;
        }
        if self.flags.has_parts {
            offs += 4 * self.part_count as usize + 4;
        }
        offs
    }

    fn z_pos(&self) -> usize {
        self.xy_pos() + self.point_count as usize * 16
    }

    fn m_pos(&self) -> usize {
        let mut pos = self.z_pos();
        if self.flags.has_z {
            pos += self.point_count as usize * 8 + self.flags.mz_range_bytes();
        }
        pos
    }

    /// The bounding box stored in the record header. `None` for null and
    /// single-point records, which carry no box.
    pub fn read_bounds(&self) -> ShpResult<Option<Bounds>> {
        if self.is_null || self.flags.single_point {
            return Ok(None);
        }
        let v = self.cursor_at(12).read_f64_array(4)?;
        Ok(Some(Bounds::new(v[0], v[1], v[2], v[3])))
    }

    /// The number of points in each part.
    ///
    /// The file stores exclusive-prefix start offsets; sizes are the
    /// differences between consecutive offsets, the last computed against
    /// the record's point count. A non-positive size is corruption.
    pub fn read_part_sizes(&self) -> ShpResult<Vec<u32>> {
        if self.point_count == 0 {
            return Ok(Vec::new());
        }
        if self.part_count == 1 {
            return Ok(vec![self.point_count]);
        }
        // second entry of the part index; the first is always zero
        let mut cur = self.cursor_at(56);
        let mut sizes = Vec::with_capacity(self.part_count as usize);
        let mut start_id: i64 = 0;
        for i in 0..self.part_count {
            let part_len = if i < self.part_count - 1 {
                cur.read_u32()? as i64 - start_id
            } else {
                self.point_count as i64 - start_id
            };
            if part_len <= 0 {
                return Err(ShpError::CorruptPartTable { id: self.id });
            }
            sizes.push(part_len as u32);
            start_id += part_len;
        }
        Ok(sizes)
    }

    /// Interleaved X/Y doubles, `point_count * 2` long.
    pub fn read_xy(&self) -> ShpResult<Vec<f64>> {
        if self.point_count == 0 {
            return Ok(Vec::new());
        }
        self.cursor_at(self.xy_pos())
            .read_f64_array(self.point_count as usize * 2)
    }

    /// Z values, `None` when the type has no Z dimension.
    pub fn read_z(&self) -> ShpResult<Option<Vec<f64>>> {
        if !self.flags.has_z || self.point_count == 0 {
            return Ok(None);
        }
        let vals = self
            .cursor_at(self.z_pos() + self.flags.mz_range_bytes())
            .read_f64_array(self.point_count as usize)?;
        Ok(Some(vals))
    }

    /// The stored (zmin, zmax) range. Single-point records store Z inline
    /// with no range prefix, so this is `None` for them.
    pub fn read_z_bounds(&self) -> ShpResult<Option<(f64, f64)>> {
        if !self.flags.has_z || self.flags.single_point || self.point_count == 0 {
            return Ok(None);
        }
        let v = self.cursor_at(self.z_pos()).read_f64_array(2)?;
        Ok(Some((v[0], v[1])))
    }

    /// Whether this record carries the optional M block.
    ///
    /// M presence is not flagged anywhere in the file; the only evidence is
    /// the record length, which must match exactly one of the two possible
    /// layouts.
    pub fn has_m(&self) -> ShpResult<bool> {
        if !self.flags.has_m || self.is_null {
            return Ok(false);
        }
        let without_m = self.m_pos() as u64;
        let with_m =
            without_m + self.point_count as u64 * 8 + self.flags.mz_range_bytes() as u64;
        if self.byte_length == without_m {
            Ok(false)
        } else if self.byte_length == with_m {
            Ok(true)
        } else {
            Err(ShpError::AmbiguousMeasureLength { id: self.id })
        }
    }

    /// M values, `None` when the record carries no M block.
    pub fn read_m(&self) -> ShpResult<Option<Vec<f64>>> {
        if self.point_count == 0 || !self.has_m()? {
            return Ok(None);
        }
        let vals = self
            .cursor_at(self.m_pos() + self.flags.mz_range_bytes())
            .read_f64_array(self.point_count as usize)?;
        Ok(Some(vals))
    }

    /// The stored (mmin, mmax) range, `None` when absent.
    pub fn read_m_bounds(&self) -> ShpResult<Option<(f64, f64)>> {
        if self.flags.single_point || !self.has_m()? {
            return Ok(None);
        }
        let v = self.cursor_at(self.m_pos()).read_f64_array(2)?;
        Ok(Some((v[0], v[1])))
    }

    /// All points in file order with optional Z and M components attached.
    pub fn read_points(&self) -> ShpResult<Vec<ShpPoint>> {
        let xy = self.read_xy()?;
        let zz = self.read_z()?;
        let mm = self.read_m()?;
        let n = xy.len() / 2;
        let mut points = Vec::with_capacity(n);
        for i in 0..n {
            points.push(ShpPoint {
                x: xy[i * 2],
                y: xy[i * 2 + 1],
                z: zz.as_ref().map(|z| z[i]),
                m: mm.as_ref().map(|m| m[i]),
            });
        }
        Ok(points)
    }

    /// Decode the full payload: one point for single-point types, parts in
    /// file order otherwise, `Null` for null records.
    pub fn read(&self) -> ShpResult<DecodedShape> {
        if self.is_null {
            return Ok(DecodedShape::Null);
        }
        let mut points = self.read_points()?;
        if self.flags.single_point {
            return Ok(DecodedShape::Point(points.remove(0)));
        }
        let sizes = self.read_part_sizes()?;
        let mut parts = Vec::with_capacity(sizes.len());
        for size in sizes {
            let rest = points.split_off(size as usize);
            parts.push(points);
            points = rest;
        }
        Ok(DecodedShape::Parts(parts))
    }
}
