//! Fast vertex-thinning simplification.
//!
//! A low-quality reduction pass that collapses runs of near-duplicate
//! vertices ahead of the interior-point search. It is not a substitute for
//! a proper line simplifier; it only cuts the segment count the search has
//! to scan.

use super::arcs::{ArcCollection, Path, Shape};
use super::types::Point;

/// Rebuild a shape keeping only vertices spaced more than `dist` apart.
///
/// The first vertex of each path always survives, and the final vertex is
/// kept whenever it differs from the last kept one so a closed ring still
/// ends where it started. Each surviving path becomes a single arc of the
/// returned collection; paths that keep nothing are dropped.
pub fn simplify_shape_fast(
    shape: &[Path],
    arcs: &ArcCollection,
    dist: f64,
) -> (Shape, ArcCollection) {
    let mut nn = Vec::new();
    let mut xx = Vec::new();
    let mut yy = Vec::new();
    let mut shape2: Shape = Vec::new();
    for path in shape {
        let n = simplify_path_fast(path, arcs, dist, &mut xx, &mut yy);
        if n > 0 {
            shape2.push(vec![nn.len() as i32]);
            nn.push(n);
        }
    }
    (shape2, ArcCollection::new(nn, xx, yy))
}

fn simplify_path_fast(
    path: &[i32],
    arcs: &ArcCollection,
    dist: f64,
    xx: &mut Vec<f64>,
    yy: &mut Vec<f64>,
) -> u32 {
    let mut count = 0u32;
    let mut kept: Option<Point> = None;
    let mut last: Option<Point> = None;
    for p in arcs.shape_iter(path) {
        let keep = match kept {
            None => true,
            Some(q) => p.distance_to(q) > dist,
        };
        if keep {
            xx.push(p.x);
            yy.push(p.y);
            kept = Some(p);
            count += 1;
        }
        last = Some(p);
    }
    if let (Some(p), Some(q)) = (last, kept) {
        if p.x != q.x || p.y != q.y {
            xx.push(p.x);
            yy.push(p.y);
            count += 1;
        }
    }
    count
}
