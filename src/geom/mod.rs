//! Geometry engine: arc topology, centroids, and interior-point search.
//!
//! Shapes are read-only views over an [`ArcCollection`]; nothing in this
//! module mutates topology. Degenerate inputs (empty shapes, zero-area
//! rings) produce `None` or empty results, never errors.
//!
//! # Submodules
//! - `types` - `Point` and `Bounds` value types
//! - `arcs` - shared-arc coordinate storage and path iteration
//! - `segment` - ray casting, containment and distance predicates
//! - `centroid` - area-weighted centroids and path areas
//! - `simplify` - fast vertex-thinning pre-pass
//! - `interior` - the label-point search

mod arcs;
mod centroid;
mod interior;
mod segment;
mod simplify;
mod types;

pub use arcs::{ArcCollection, Path, SegmentIter, Shape, ShapeIter};
pub use centroid::{max_path, path_centroid, planar_path_area, shape_centroid};
pub use interior::{find_interior_point, find_interior_points};
pub use segment::{
    find_ray_ring_intersections, find_ray_shape_intersections, point_in_polygon,
    point_segment_distance, point_to_shape_distance, ray_segment_intersection,
};
pub use simplify::simplify_shape_fast;
pub use types::{Bounds, Point};
