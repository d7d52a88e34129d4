//! Error types for shapefile decoding.

use thiserror::Error;

/// Result alias for shapefile decoding operations.
pub type ShpResult<T> = Result<T, ShpError>;

/// Hard decoding failures.
///
/// Only unrecoverable conditions live here: a record that cannot be decoded
/// aborts with one of these variants and no partial result is returned.
/// Degenerate geometry (empty shapes, zero-area rings, failed interior-point
/// searches) is never an error; those paths return `None` or empty values so
/// callers can tell corrupt input from valid-but-empty results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShpError {
    /// The buffer does not start with a valid `.shp` main file header.
    #[error("not a shapefile: {0}")]
    BadFileHeader(String),

    /// A shape type code this crate does not decode (includes MultiPatch).
    #[error("unsupported shape type code {0}")]
    UnknownShapeType(u32),

    /// Record header with a non-positive length or a type that is neither
    /// null nor the file's shape type.
    #[error("unable to read shape record {id}, the .shp file may be corrupted")]
    BadRecordHeader { id: u32 },

    /// A part index entry that yields a non-positive part size.
    #[error("shape record {id} has a corrupted part table")]
    CorruptPartTable { id: u32 },

    /// The record length matches neither the with-M nor the without-M
    /// layout, so M presence cannot be inferred.
    #[error("shape record {id} has an ambiguous content length")]
    AmbiguousMeasureLength { id: u32 },

    /// A typed read ran past the end of the buffer.
    #[error("unexpected end of buffer at offset {offset}")]
    UnexpectedEof { offset: usize },
}
