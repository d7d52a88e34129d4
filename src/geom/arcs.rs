//! Arc-based shape topology.
//!
//! Shapes do not own coordinates; they reference shared arcs by id, so a
//! boundary stored once can serve the shapes on both of its sides. The
//! geometry engine only ever reads through this structure.

use super::types::{Bounds, Point};

/// One part of a shape: signed arc ids in traversal order.
///
/// A non-negative id walks that arc forward; a negative id walks arc
/// `!id` (bitwise complement) in reverse.
pub type Path = Vec<i32>;

/// An ordered list of paths resolved through one [`ArcCollection`].
pub type Shape = Vec<Path>;

/// Coordinate storage for a set of arcs: per-arc vertex counts plus flat
/// X and Y arrays, with bounds precomputed per arc and overall.
#[derive(Debug, Clone)]
pub struct ArcCollection {
    nn: Vec<u32>,
    xx: Vec<f64>,
    yy: Vec<f64>,
    offsets: Vec<usize>,
    arc_bounds: Vec<Bounds>,
    bounds: Bounds,
}

impl ArcCollection {
    /// Build from per-arc vertex counts and flat coordinate arrays.
    /// `nn` must sum to the length of `xx` and `yy`.
    pub fn new(nn: Vec<u32>, xx: Vec<f64>, yy: Vec<f64>) -> Self {
        debug_assert_eq!(nn.iter().map(|&n| n as usize).sum::<usize>(), xx.len());
        debug_assert_eq!(xx.len(), yy.len());
        let mut offsets = Vec::with_capacity(nn.len());
        let mut arc_bounds = Vec::with_capacity(nn.len());
        let mut bounds = Bounds::empty();
        let mut off = 0usize;
        for &n in &nn {
            offsets.push(off);
            let mut b = Bounds::empty();
            for i in off..off + n as usize {
                b.extend(xx[i], yy[i]);
            }
            bounds.merge(&b);
            arc_bounds.push(b);
            off += n as usize;
        }
        ArcCollection {
            nn,
            xx,
            yy,
            offsets,
            arc_bounds,
            bounds,
        }
    }

    /// Build one arc per coordinate path; returns the shape referencing
    /// them. This is how decoded record parts enter the geometry engine.
    pub fn from_paths(paths: &[Vec<Point>]) -> (Shape, ArcCollection) {
        let mut nn = Vec::with_capacity(paths.len());
        let mut xx = Vec::new();
        let mut yy = Vec::new();
        let mut shape: Shape = Vec::with_capacity(paths.len());
        for (i, path) in paths.iter().enumerate() {
            nn.push(path.len() as u32);
            for p in path {
                xx.push(p.x);
                yy.push(p.y);
            }
            shape.push(vec![i as i32]);
        }
        (shape, ArcCollection::new(nn, xx, yy))
    }

    pub fn arc_count(&self) -> usize {
        self.nn.len()
    }

    fn arc_len(&self, arc: usize) -> usize {
        self.nn[arc] as usize
    }

    fn vertex(&self, arc: usize, i: usize) -> Point {
        let j = self.offsets[arc] + i;
        Point::new(self.xx[j], self.yy[j])
    }

    /// Bounds of every arc together.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Bounds of one path.
    pub fn simple_shape_bounds(&self, path: &[i32]) -> Bounds {
        let mut b = Bounds::empty();
        for &id in path {
            b.merge(&self.arc_bounds[arc_index(id)]);
        }
        b
    }

    /// Fresh coordinate iterator over a path.
    ///
    /// Consecutive arcs share their junction vertex; it is yielded once.
    pub fn shape_iter<'a>(&'a self, path: &'a [i32]) -> ShapeIter<'a> {
        ShapeIter {
            arcs: self,
            ids: path,
            arc_pos: 0,
            vert: 0,
            started: false,
        }
    }

    /// Consecutive coordinate pairs of a path, wrapping back to the first
    /// vertex when the path is stored open.
    pub fn segments<'a>(&'a self, path: &'a [i32]) -> SegmentIter<'a> {
        let mut iter = self.shape_iter(path);
        let first = iter.next();
        SegmentIter {
            iter,
            first,
            prev: first,
            wrapped: false,
        }
    }
}

fn arc_index(id: i32) -> usize {
    if id < 0 {
        (!id) as usize
    } else {
        id as usize
    }
}

/// Forward-only coordinate iterator over one path.
#[derive(Debug, Clone)]
pub struct ShapeIter<'a> {
    arcs: &'a ArcCollection,
    ids: &'a [i32],
    arc_pos: usize,
    vert: usize,
    started: bool,
}

impl<'a> Iterator for ShapeIter<'a> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while self.arc_pos < self.ids.len() {
            let id = self.ids[self.arc_pos];
            let arc = arc_index(id);
            let n = self.arcs.arc_len(arc);
            if self.vert < n {
                let i = if id < 0 { n - 1 - self.vert } else { self.vert };
                let p = self.arcs.vertex(arc, i);
                self.vert += 1;
                self.started = true;
                return Some(p);
            }
            self.arc_pos += 1;
            // skip the junction vertex shared with the previous arc
            self.vert = if self.started { 1 } else { 0 };
        }
        None
    }
}

/// Yields each edge of a path as a coordinate pair, closing an open ring
/// with one extra edge back to the first vertex.
#[derive(Debug, Clone)]
pub struct SegmentIter<'a> {
    iter: ShapeIter<'a>,
    first: Option<Point>,
    prev: Option<Point>,
    wrapped: bool,
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = (Point, Point);

    fn next(&mut self) -> Option<(Point, Point)> {
        let prev = self.prev?;
        if let Some(next) = self.iter.next() {
            self.prev = Some(next);
            return Some((prev, next));
        }
        if self.wrapped {
            return None;
        }
        self.wrapped = true;
        let first = self.first?;
        // a ring stored closed needs no extra edge
        if first.x == prev.x && first.y == prev.y {
            return None;
        }
        self.prev = Some(first);
        Some((prev, first))
    }
}
