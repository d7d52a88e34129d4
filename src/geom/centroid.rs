//! Area-weighted centroids and path areas.

use super::arcs::{ArcCollection, Path};
use super::types::Point;

/// Area-weighted centroid of one ring (shoelace summation).
///
/// Rings may be stored open; the summation closes them implicitly. When the
/// signed area is exactly zero (collinear or duplicated vertices) the
/// centroid is undefined, so the arithmetic vertex mean is returned
/// instead. `None` for an empty ring.
pub fn path_centroid(path: &[i32], arcs: &ArcCollection) -> Option<Point> {
    let mut iter = arcs.shape_iter(path);
    let first = iter.next()?;
    let mut sum = 0.0;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let (mut ax, mut ay) = (first.x, first.y);
    for p in iter {
        let cross = ax * p.y - ay * p.x;
        sum += cross;
        sum_x += cross * (p.x + ax);
        sum_y += cross * (p.y + ay);
        ax = p.x;
        ay = p.y;
    }
    // close the ring; a zero-length closing edge contributes nothing
    let cross = ax * first.y - ay * first.x;
    sum += cross;
    sum_x += cross * (first.x + ax);
    sum_y += cross * (first.y + ay);

    let area = sum / 2.0;
    if area == 0.0 {
        return avg_path_point(path, arcs);
    }
    Some(Point::new(sum_x / (6.0 * area), sum_y / (6.0 * area)))
}

/// Arithmetic mean of a ring's vertices, a repeated closing vertex
/// counted once.
fn avg_path_point(path: &[i32], arcs: &ArcCollection) -> Option<Point> {
    let mut points: Vec<Point> = arcs.shape_iter(path).collect();
    if points.len() > 1 {
        let (first, last) = (points[0], points[points.len() - 1]);
        if first.x == last.x && first.y == last.y {
            points.pop();
        }
    }
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sx: f64 = points.iter().map(|p| p.x).sum();
    let sy: f64 = points.iter().map(|p| p.y).sum();
    Some(Point::new(sx / n, sy / n))
}

/// Signed shoelace area of one ring, closing it implicitly.
pub fn planar_path_area(path: &[i32], arcs: &ArcCollection) -> f64 {
    let mut iter = arcs.shape_iter(path);
    let Some(first) = iter.next() else {
        return 0.0;
    };
    let mut sum = 0.0;
    let (mut ax, mut ay) = (first.x, first.y);
    for p in iter {
        sum += ax * p.y - ay * p.x;
        ax = p.x;
        ay = p.y;
    }
    sum += ax * first.y - ay * first.x;
    sum / 2.0
}

/// The path whose bounding box covers the most area, `None` when every
/// path is degenerate.
pub fn max_path<'a>(shape: &'a [Path], arcs: &ArcCollection) -> Option<&'a Path> {
    let mut max_area = 0.0;
    let mut best = None;
    for path in shape {
        let area = arcs.simple_shape_bounds(path).area();
        if area > max_area {
            max_area = area;
            best = Some(path);
        }
    }
    best
}

/// Centroid of the largest ring of a polygon shape.
///
/// Holes are not subtracted from the calculation.
pub fn shape_centroid(shape: &[Path], arcs: &ArcCollection) -> Option<Point> {
    let path = max_path(shape, arcs)?;
    path_centroid(path, arcs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_ring(xx: Vec<f64>, yy: Vec<f64>) -> (Vec<Path>, ArcCollection) {
        let n = xx.len() as u32;
        (vec![vec![0]], ArcCollection::new(vec![n], xx, yy))
    }

    #[test]
    fn test_unit_square_centroid() {
        let (shape, arcs) = one_ring(
            vec![0.0, 1.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0, 1.0],
        );
        let c = path_centroid(&shape[0], &arcs).unwrap();
        assert_eq!((c.x, c.y), (0.5, 0.5));
    }

    #[test]
    fn test_closed_ring_matches_open() {
        let (shape, arcs) = one_ring(
            vec![0.0, 1.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 1.0, 0.0],
        );
        let c = path_centroid(&shape[0], &arcs).unwrap();
        assert_eq!((c.x, c.y), (0.5, 0.5));
    }

    #[test]
    fn test_winding_does_not_move_centroid() {
        // same square traversed clockwise
        let (shape, arcs) = one_ring(
            vec![0.0, 0.0, 1.0, 1.0],
            vec![0.0, 1.0, 1.0, 0.0],
        );
        let c = path_centroid(&shape[0], &arcs).unwrap();
        assert_eq!((c.x, c.y), (0.5, 0.5));
    }

    #[test]
    fn test_collinear_ring_falls_back_to_mean() {
        let (shape, arcs) = one_ring(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]);
        let c = path_centroid(&shape[0], &arcs).unwrap();
        assert_eq!((c.x, c.y), (1.0, 1.0));
    }

    #[test]
    fn test_empty_path() {
        let arcs = ArcCollection::new(vec![], vec![], vec![]);
        let path: Path = vec![];
        assert_eq!(path_centroid(&path, &arcs), None);
    }

    #[test]
    fn test_signed_area() {
        let (shape, arcs) = one_ring(
            vec![0.0, 2.0, 2.0, 0.0],
            vec![0.0, 0.0, 2.0, 2.0],
        );
        assert_eq!(planar_path_area(&shape[0], &arcs), 4.0);
        // clockwise traversal flips the sign
        let (shape_cw, arcs_cw) = one_ring(
            vec![0.0, 0.0, 2.0, 2.0],
            vec![0.0, 2.0, 2.0, 0.0],
        );
        assert_eq!(planar_path_area(&shape_cw[0], &arcs_cw), -4.0);
    }

    #[test]
    fn test_shape_centroid_uses_largest_ring() {
        // small ring first, big ring second
        let arcs = ArcCollection::new(
            vec![4, 4],
            vec![10.0, 10.5, 10.5, 10.0, 0.0, 4.0, 4.0, 0.0],
            vec![10.0, 10.0, 10.5, 10.5, 0.0, 0.0, 4.0, 4.0],
        );
        let shape = vec![vec![0], vec![1]];
        let c = shape_centroid(&shape, &arcs).unwrap();
        assert_eq!((c.x, c.y), (2.0, 2.0));
    }

    #[test]
    fn test_shape_centroid_empty() {
        let arcs = ArcCollection::new(vec![], vec![], vec![]);
        assert_eq!(shape_centroid(&[], &arcs), None);
    }
}
