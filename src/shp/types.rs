//! Shape type codes and their decoding capabilities.

use serde::Serialize;

use crate::error::{ShpError, ShpResult};

/// ESRI shape type codes understood by this crate.
///
/// Z-capable types may also carry per-point M values; M presence is decided
/// per record from its length, not from the type code. MultiPatch (code 31)
/// is not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShapeType {
    Null,
    Point,
    PolyLine,
    Polygon,
    MultiPoint,
    PointZ,
    PolyLineZ,
    PolygonZ,
    MultiPointZ,
    PointM,
    PolyLineM,
    PolygonM,
    MultiPointM,
}

impl ShapeType {
    /// Decode a type code as stored in the file.
    pub fn from_code(code: u32) -> ShpResult<ShapeType> {
        use ShapeType::*;
        Ok(match code {
            0 => Null,
            1 => Point,
            3 => PolyLine,
            5 => Polygon,
            8 => MultiPoint,
            11 => PointZ,
            13 => PolyLineZ,
            15 => PolygonZ,
            18 => MultiPointZ,
            21 => PointM,
            23 => PolyLineM,
            25 => PolygonM,
            28 => MultiPointM,
            other => return Err(ShpError::UnknownShapeType(other)),
        })
    }

    pub fn code(self) -> u32 {
        use ShapeType::*;
        match self {
            Null => 0,
            Point => 1,
            PolyLine => 3,
            Polygon => 5,
            MultiPoint => 8,
            PointZ => 11,
            PolyLineZ => 13,
            PolygonZ => 15,
            MultiPointZ => 18,
            PointM => 21,
            PolyLineM => 23,
            PolygonM => 25,
            MultiPointM => 28,
        }
    }

    /// Derive the capability flags that drive record decoding.
    pub fn flags(self) -> TypeFlags {
        use ShapeType::*;
        let has_parts = matches!(
            self,
            PolyLine | Polygon | PolyLineZ | PolygonZ | PolyLineM | PolygonM
        );
        let multipoint = matches!(self, MultiPoint | MultiPointZ | MultiPointM);
        let has_bounds = has_parts || multipoint;
        let has_z = matches!(self, PointZ | PolyLineZ | PolygonZ | MultiPointZ);
        let has_m = has_z || matches!(self, PointM | PolyLineM | PolygonM | MultiPointM);
        TypeFlags {
            has_bounds,
            has_parts,
            has_z,
            has_m,
            single_point: !has_bounds,
        }
    }
}

/// Capability flags computed once per shape type.
///
/// The record decoder branches on these, never on the runtime shape of the
/// decoded data.
#[derive(Debug, Clone, Copy)]
pub struct TypeFlags {
    /// The record stores a bounding box after the type field.
    pub has_bounds: bool,
    /// The record stores a part count and part index table.
    pub has_parts: bool,
    pub has_z: bool,
    /// The type may carry per-point M values.
    pub has_m: bool,
    /// Point/PointZ/PointM and Null: one coordinate, no box, no counts.
    pub single_point: bool,
}

impl TypeFlags {
    /// Size of a Z or M min/max prefix. Single-point records store their Z
    /// and M values inline with no range.
    pub fn mz_range_bytes(&self) -> usize {
        if self.single_point {
            0
        } else {
            16
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for code in [0u32, 1, 3, 5, 8, 11, 13, 15, 18, 21, 23, 25, 28] {
            assert_eq!(ShapeType::from_code(code).unwrap().code(), code);
        }
    }

    #[test]
    fn test_unknown_codes_rejected() {
        for code in [2u32, 31, 99] {
            assert_eq!(
                ShapeType::from_code(code),
                Err(ShpError::UnknownShapeType(code))
            );
        }
    }

    #[test]
    fn test_polygon_flags() {
        let f = ShapeType::Polygon.flags();
        assert!(f.has_bounds && f.has_parts);
        assert!(!f.has_z && !f.has_m && !f.single_point);
        assert_eq!(f.mz_range_bytes(), 16);
    }

    #[test]
    fn test_point_z_flags() {
        let f = ShapeType::PointZ.flags();
        assert!(f.single_point && f.has_z && f.has_m);
        assert!(!f.has_bounds && !f.has_parts);
        assert_eq!(f.mz_range_bytes(), 0);
    }

    #[test]
    fn test_multipoint_m_flags() {
        let f = ShapeType::MultiPointM.flags();
        assert!(f.has_bounds && f.has_m);
        assert!(!f.has_parts && !f.has_z && !f.single_point);
    }
}
