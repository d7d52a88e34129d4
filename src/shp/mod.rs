//! Shapefile (`.shp`) geometry decoding.
//!
//! Byte-offset-exact readers for the ESRI shapefile geometry format. The
//! record header mixes byte orders (big-endian record number and length,
//! little-endian everything after), which [`ByteCursor`] models as explicit
//! cursor state.
//!
//! # Submodules
//! - `cursor` - positioned, endian-explicit byte reading
//! - `types` - shape type codes and capability flags
//! - `record` - single-record header decoding and lazy payload access
//! - `reader` - file header parsing and record iteration

mod cursor;
mod reader;
mod record;
mod types;

pub use cursor::{ByteCursor, Endian};
pub use reader::{ShpHeader, ShpReader, FILE_HEADER_BYTES};
pub use record::{DecodedShape, ShpPoint, ShpRecord, ShpRecordReader};
pub use types::{ShapeType, TypeFlags};
