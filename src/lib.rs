//! Shapefile geometry decoding and polygon label points.
//!
//! Decodes ESRI `.shp` record bytes into typed shapes and derives a
//! representative interior point per polygon, for label placement and
//! attribute anchoring in vector-processing pipelines.
//!
//! Decoding hands back borrowed views with lazy payload accessors, so a
//! caller can walk a large buffer and only materialize the records it
//! needs. Decoded parts feed the geometry engine through
//! [`geom::ArcCollection::from_paths`].
//!
//! # Modules
//! - `shp` - byte-exact record and file-header decoding
//! - `geom` - arc topology, centroids, and the interior-point search
//! - `error` - hard decode failures, distinct from degenerate-geometry results

pub mod error;
pub mod geom;
pub mod shp;

pub use error::{ShpError, ShpResult};
