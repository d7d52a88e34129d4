//! Interior point search for polygon labeling.
//!
//! Method:
//! - take the largest ring of the polygon
//! - cast vertical rays at x-positions spread around the centroid and cut
//!   the polygon into interior segments
//! - rank segment midpoints by their weighted half-length and push each
//!   vertically to a local maximum of weighted edge distance
//! - run one finer pass around the winner
//!
//! Distances are weighted to slightly favor points near the centroid, so
//! label points stay visually anchored even in sprawling shapes.

use rayon::prelude::*;

use super::arcs::{ArcCollection, Path, Shape};
use super::centroid::{max_path, path_centroid, planar_path_area};
use super::segment::{find_ray_shape_intersections, point_in_polygon, point_to_shape_distance};
use super::simplify::simplify_shape_fast;
use super::types::{Bounds, Point};

/// Midpoint of one interior segment cut by a vertical ray. `interval` is
/// half the segment's vertical span, an upper bound on any edge distance
/// reachable from the segment.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    x: f64,
    y: f64,
    interval: f64,
}

#[derive(Debug, Clone, Copy)]
struct ScoredPoint {
    x: f64,
    y: f64,
    distance: f64,
}

/// Find a point inside a polygon, located away from the polygon edge.
///
/// Returns `None` when the shape has no positive-area bounds. When the ray
/// sweep produces no usable candidate (every ray degenerate), the shape
/// centroid is returned instead and a diagnostic goes to stderr.
pub fn find_interior_point(shape: &[Path], arcs: &ArcCollection) -> Option<Point> {
    find_interior_point_at(shape, arcs, false)
}

/// Interior points for a batch of shapes sharing one topology.
///
/// Each per-shape search is independent, so the batch fans out across
/// threads; results keep the input order.
pub fn find_interior_points(shapes: &[Shape], arcs: &ArcCollection) -> Vec<Option<Point>> {
    shapes
        .par_iter()
        .map(|shape| find_interior_point(shape, arcs))
        .collect()
}

fn find_interior_point_at(shape: &[Path], arcs: &ArcCollection, exact: bool) -> Option<Point> {
    let max = max_path(shape, arcs)?;
    let path_bounds = arcs.simple_shape_bounds(max);
    if !path_bounds.has_bounds() || path_bounds.area() == 0.0 {
        return None;
    }

    if !exact {
        // thin out near-duplicate vertices, then search the reduced shape
        let thresh = path_bounds.area().sqrt() * 0.01;
        let (simple_shape, simple_arcs) = simplify_shape_fast(shape, arcs, thresh);
        return find_interior_point_at(&simple_shape, &simple_arcs, true);
    }

    let centroid = path_centroid(max, arcs)?;
    let area = planar_path_area(max, arcs).abs();
    let half_width = path_bounds.width() / 2.0;

    // compact squarish shapes need few samples; irregular or multi-ring
    // shapes get a wider and denser sweep
    let (htics, focus) = if shape.len() == 1 && area * 1.2 > path_bounds.area() {
        (5usize, 0.2)
    } else if shape.len() == 1 && area * 1.7 > path_bounds.area() {
        (7, 0.4)
    } else {
        (11, 0.5)
    };
    let vtics = htics;
    let lbound = centroid.x - half_width * focus;
    let rbound = centroid.x + half_width * focus;

    let tics = inner_tics(lbound, rbound, htics);
    let cands = find_interior_point_candidates(shape, arcs, &tics);

    let Some(best) = find_best_interior_point(cands, shape, arcs, &path_bounds, centroid, vtics)
    else {
        eprintln!("[find_interior_point] no usable ray candidate, falling back to centroid");
        return Some(centroid);
    };

    // look for an even better fit close to the best point
    let xres = tics[1] - tics[0];
    let retics = vec![best.x - xres / 2.0, best.x + xres / 2.0];
    let recands = find_interior_point_candidates(shape, arcs, &retics);
    let refined = find_best_interior_point(recands, shape, arcs, &path_bounds, centroid, vtics * 2);

    let winner = match refined {
        Some(p2) if p2.distance > best.distance => p2,
        _ => best,
    };
    Some(Point::new(winner.x, winner.y))
}

/// Evenly spaced sample positions strictly inside (min, max).
fn inner_tics(min: f64, max: f64, steps: usize) -> Vec<f64> {
    let step = (max - min) / (steps as f64 + 1.0);
    (1..=steps).map(|i| min + step * i as f64).collect()
}

fn find_interior_point_candidates(
    shape: &[Path],
    arcs: &ArcCollection,
    xx: &[f64],
) -> Vec<Candidate> {
    // start every ray below everything the topology covers
    let ymin = arcs.bounds().ymin - 1.0;
    let mut cands = Vec::new();
    for &x in xx {
        find_hit_candidates(x, ymin, shape, arcs, &mut cands);
    }
    cands
}

/// Midpoints of the interior segments cut by a vertical ray at `x`.
fn find_hit_candidates(
    x: f64,
    y: f64,
    shape: &[Path],
    arcs: &ArcCollection,
    out: &mut Vec<Candidate>,
) {
    let mut yy = find_ray_shape_intersections(x, y, shape, arcs);
    // sorting organizes the y-intercepts into interior segments
    yy.sort_by(|a, b| a.total_cmp(b));
    for pair in yy.chunks_exact(2) {
        let (y1, y2) = (pair[0], pair[1]);
        let interval = (y2 - y1) / 2.0;
        if interval > 0.0 {
            out.push(Candidate {
                x,
                y: (y1 + y2) / 2.0,
                interval,
            });
        }
    }
}

fn find_best_interior_point(
    mut candidates: Vec<Candidate>,
    shape: &[Path],
    arcs: &ArcCollection,
    path_bounds: &Bounds,
    centroid: Point,
    vtics: usize,
) -> Option<ScoredPoint> {
    let vstep = path_bounds.height() / vtics as f64;
    let reference_dist = path_bounds.width().max(path_bounds.height()) / 2.0;

    // points closer to the centroid are slightly preferred; the penalty is
    // capped at 25%
    let weight = |x: f64, y: f64| -> f64 {
        let offset = centroid.distance_to(Point::new(x, y));
        1.0 - (0.6 * offset / reference_dist).min(0.25)
    };

    // try the centers of long, central segments first
    for c in candidates.iter_mut() {
        c.interval *= weight(c.x, c.y);
    }
    candidates.sort_by(|a, b| b.interval.total_cmp(&a.interval));

    let mut best: Option<ScoredPoint> = None;
    for cand in &candidates {
        // remaining candidates cannot beat the committed best: a segment's
        // weighted half-length bounds any distance reachable from it
        if let Some(b) = best {
            if b.distance > cand.interval {
                break;
            }
        }
        let adjusted = adjusted_point(cand.x, cand.y, shape, arcs, vstep, &weight);
        match best {
            Some(b) if adjusted.distance <= b.distance => {}
            _ => best = Some(adjusted),
        }
    }
    best
}

/// Score (x, y) by weighted edge distance, then push it vertically in both
/// directions to a local maximum.
fn adjusted_point(
    x: f64,
    y: f64,
    shape: &[Path],
    arcs: &ArcCollection,
    vstep: f64,
    weight: &impl Fn(f64, f64) -> f64,
) -> ScoredPoint {
    let mut p = ScoredPoint {
        x,
        y,
        distance: point_to_shape_distance(x, y, shape, arcs) * weight(x, y),
    };
    scan_for_better_point(&mut p, shape, arcs, vstep, weight); // scan up
    scan_for_better_point(&mut p, shape, arcs, -vstep, weight); // scan down
    p
}

/// Walk vertically from `p`, committing strict improvements only. The walk
/// tolerates a dip to 90% of the best seen so a shallow local minimum does
/// not stop it, and ends on a deeper dip or on stepping outside the
/// polygon; the polygon's extent bounds the number of steps.
fn scan_for_better_point(
    p: &mut ScoredPoint,
    shape: &[Path],
    arcs: &ArcCollection,
    vstep: f64,
    weight: &impl Fn(f64, f64) -> f64,
) {
    let x = p.x;
    let mut y = p.y;
    let mut dmax = p.distance;
    loop {
        y += vstep;
        let d = point_to_shape_distance(x, y, shape, arcs) * weight(x, y);
        if d > dmax * 0.90 && point_in_polygon(x, y, shape, arcs) {
            if d > dmax {
                dmax = d;
                p.distance = d;
                p.y = y;
            }
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_ring(xx: Vec<f64>, yy: Vec<f64>) -> (Vec<Path>, ArcCollection) {
        let n = xx.len() as u32;
        (vec![vec![0]], ArcCollection::new(vec![n], xx, yy))
    }

    #[test]
    fn test_square_interior_point() {
        let (shape, arcs) = one_ring(
            vec![0.0, 10.0, 10.0, 0.0],
            vec![0.0, 0.0, 10.0, 10.0],
        );
        let p = find_interior_point(&shape, &arcs).unwrap();
        assert!(p.x > 0.0 && p.x < 10.0);
        assert!(p.y > 0.0 && p.y < 10.0);
        assert!(point_in_polygon(p.x, p.y, &shape, &arcs));
        assert!(point_to_shape_distance(p.x, p.y, &shape, &arcs) > 0.0);
    }

    #[test]
    fn test_u_shape_avoids_notch() {
        // the centroid of this U sits inside the notch, outside the shape
        let (shape, arcs) = one_ring(
            vec![0.0, 10.0, 10.0, 8.0, 8.0, 2.0, 2.0, 0.0],
            vec![0.0, 0.0, 10.0, 10.0, 2.0, 2.0, 10.0, 10.0],
        );
        let p = find_interior_point(&shape, &arcs).unwrap();
        assert!(point_in_polygon(p.x, p.y, &shape, &arcs));
        assert!(point_to_shape_distance(p.x, p.y, &shape, &arcs) > 0.0);
    }

    #[test]
    fn test_donut_point_lands_in_annulus() {
        let arcs = ArcCollection::new(
            vec![4, 4],
            vec![0.0, 10.0, 10.0, 0.0, 3.0, 7.0, 7.0, 3.0],
            vec![0.0, 0.0, 10.0, 10.0, 3.0, 3.0, 7.0, 7.0],
        );
        let shape = vec![vec![0], vec![1]];
        let p = find_interior_point(&shape, &arcs).unwrap();
        assert!(point_in_polygon(p.x, p.y, &shape, &arcs));
    }

    #[test]
    fn test_degenerate_shape_returns_none() {
        // collinear ring: bounds have zero area
        let (shape, arcs) = one_ring(vec![0.0, 1.0, 2.0], vec![5.0, 5.0, 5.0]);
        assert_eq!(find_interior_point(&shape, &arcs), None);
    }

    #[test]
    fn test_empty_shape_returns_none() {
        let arcs = ArcCollection::new(vec![], vec![], vec![]);
        assert_eq!(find_interior_point(&[], &arcs), None);
    }

    #[test]
    fn test_thin_triangle_stays_inside() {
        let (shape, arcs) = one_ring(
            vec![0.0, 20.0, 0.0],
            vec![0.0, 0.5, 1.0],
        );
        let p = find_interior_point(&shape, &arcs).unwrap();
        assert!(point_in_polygon(p.x, p.y, &shape, &arcs));
    }

    #[test]
    fn test_batch_matches_single() {
        let arcs = ArcCollection::new(
            vec![4, 3],
            vec![0.0, 10.0, 10.0, 0.0, 20.0, 24.0, 22.0],
            vec![0.0, 0.0, 10.0, 10.0, 0.0, 0.0, 4.0],
        );
        let shapes: Vec<Shape> = vec![vec![vec![0]], vec![vec![1]]];
        let batch = find_interior_points(&shapes, &arcs);
        assert_eq!(batch.len(), 2);
        for (i, shape) in shapes.iter().enumerate() {
            assert_eq!(batch[i], find_interior_point(shape, &arcs));
        }
    }

    #[test]
    fn test_inner_tics_spacing() {
        let tics = inner_tics(0.0, 12.0, 5);
        assert_eq!(tics.len(), 5);
        assert_eq!(tics[0], 2.0);
        assert_eq!(tics[4], 10.0);
    }

    #[test]
    fn test_hill_climb_terminates_on_flat_distance() {
        // long squat rectangle: the vertical scan finds no improvement past
        // the first step and must stop rather than oscillate
        let (shape, arcs) = one_ring(
            vec![0.0, 100.0, 100.0, 0.0],
            vec![0.0, 0.0, 2.0, 2.0],
        );
        let p = find_interior_point(&shape, &arcs).unwrap();
        assert!(point_in_polygon(p.x, p.y, &shape, &arcs));
    }
}
