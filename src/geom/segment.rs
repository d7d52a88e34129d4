//! Segment-level predicates and distances.
//!
//! Contains the vertical ray casting used by the interior-point search,
//! point-in-polygon testing, and point-to-edge distance calculations.

use super::arcs::{ArcCollection, Path};
use super::types::Point;

/// Y value where an upward vertical ray from (x, y) crosses the segment,
/// `None` when the ray misses.
///
/// An endpoint exactly on the ray's X counts for one of its two segments
/// only (half-open rule), keeping crossing counts consistent at shared
/// vertices. Vertical segments never register.
pub fn ray_segment_intersection(x: f64, y: f64, a: Point, b: Point) -> Option<f64> {
    if (x < a.x) != (x < b.x) {
        let y_int = a.y + (x - a.x) * (b.y - a.y) / (b.x - a.x);
        if y_int > y {
            return Some(y_int);
        }
    }
    None
}

/// Y values where the ray crosses one ring.
///
/// An odd crossing count means the ray grazed the ring instead of passing
/// through it; the whole result is discarded in that case.
pub fn find_ray_ring_intersections(
    x: f64,
    y: f64,
    path: &[i32],
    arcs: &ArcCollection,
) -> Vec<f64> {
    let mut yints = Vec::new();
    for (a, b) in arcs.segments(path) {
        if let Some(y_int) = ray_segment_intersection(x, y, a, b) {
            yints.push(y_int);
        }
    }
    if yints.len() % 2 == 1 {
        yints.clear();
    }
    yints
}

/// Y values where the ray crosses any ring of a shape.
pub fn find_ray_shape_intersections(
    x: f64,
    y: f64,
    shape: &[Path],
    arcs: &ArcCollection,
) -> Vec<f64> {
    let mut yints = Vec::new();
    for path in shape {
        yints.extend(find_ray_ring_intersections(x, y, path, arcs));
    }
    yints
}

/// Even-odd containment test across every ring of a shape, so points
/// inside a hole ring count as outside.
pub fn point_in_polygon(x: f64, y: f64, shape: &[Path], arcs: &ArcCollection) -> bool {
    let mut inside = false;
    for path in shape {
        // a point outside the ring's box cannot be inside the ring
        if !arcs.simple_shape_bounds(path).contains(x, y) {
            continue;
        }
        let crossings = arcs
            .segments(path)
            .filter(|&(a, b)| ray_segment_intersection(x, y, a, b).is_some())
            .count();
        if crossings % 2 == 1 {
            inside = !inside;
        }
    }
    inside
}

/// Minimum distance from (x, y) to a segment.
pub fn point_segment_distance(x: f64, y: f64, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return ((x - a.x).powi(2) + (y - a.y).powi(2)).sqrt();
    }
    let t = (((x - a.x) * dx + (y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let px = a.x + t * dx;
    let py = a.y + t * dy;
    ((x - px).powi(2) + (y - py).powi(2)).sqrt()
}

/// Minimum distance from (x, y) to any edge of a shape. Infinite for a
/// shape with no segments.
pub fn point_to_shape_distance(x: f64, y: f64, shape: &[Path], arcs: &ArcCollection) -> f64 {
    let mut min_dist = f64::INFINITY;
    for path in shape {
        for (a, b) in arcs.segments(path) {
            let d = point_segment_distance(x, y, a, b);
            if d < min_dist {
                min_dist = d;
            }
        }
    }
    min_dist
}
