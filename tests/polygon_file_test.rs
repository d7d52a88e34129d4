// Import the library functions
use shpgeom::geom::{self, ArcCollection};
use shpgeom::shp::{DecodedShape, ShapeType, ShpReader, FILE_HEADER_BYTES};

/// Build a complete in-memory .shp file from polygon shapes, each shape a
/// list of rings.
fn build_polygon_file(shapes: &[Vec<Vec<(f64, f64)>>]) -> Vec<u8> {
    let mut records = Vec::new();
    for (i, rings) in shapes.iter().enumerate() {
        let point_count: usize = rings.iter().map(|r| r.len()).sum();
        let content = 4 + 32 + 4 + 4 + 4 * rings.len() + 16 * point_count;
        records.extend_from_slice(&((i + 1) as u32).to_be_bytes());
        records.extend_from_slice(&((content / 2) as u32).to_be_bytes());
        records.extend_from_slice(&5u32.to_le_bytes());
        let (mut xmin, mut ymin, mut xmax, mut ymax) =
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(x, y) in rings.iter().flatten() {
            xmin = xmin.min(x);
            ymin = ymin.min(y);
            xmax = xmax.max(x);
            ymax = ymax.max(y);
        }
        for v in [xmin, ymin, xmax, ymax] {
            records.extend_from_slice(&v.to_le_bytes());
        }
        records.extend_from_slice(&(rings.len() as u32).to_le_bytes());
        records.extend_from_slice(&(point_count as u32).to_le_bytes());
        let mut start = 0u32;
        for r in rings {
            records.extend_from_slice(&start.to_le_bytes());
            start += r.len() as u32;
        }
        for &(x, y) in rings.iter().flatten() {
            records.extend_from_slice(&x.to_le_bytes());
            records.extend_from_slice(&y.to_le_bytes());
        }
    }

    let total = FILE_HEADER_BYTES + records.len();
    let mut buf = vec![0u8; FILE_HEADER_BYTES];
    buf[0..4].copy_from_slice(&9994u32.to_be_bytes());
    buf[24..28].copy_from_slice(&((total / 2) as u32).to_be_bytes());
    buf[28..32].copy_from_slice(&1000u32.to_le_bytes());
    buf[32..36].copy_from_slice(&5u32.to_le_bytes());
    buf.extend_from_slice(&records);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_file_label_points() {
        // a plain square, and an L-shape whose centroid is a poor label spot
        let shapes = vec![
            vec![vec![(0.0, 0.0), (8.0, 0.0), (8.0, 8.0), (0.0, 8.0)]],
            vec![vec![
                (20.0, 0.0),
                (30.0, 0.0),
                (30.0, 3.0),
                (23.0, 3.0),
                (23.0, 10.0),
                (20.0, 10.0),
            ]],
        ];
        let buf = build_polygon_file(&shapes);

        let reader = ShpReader::new(&buf).expect("file header should parse");
        assert_eq!(reader.header().shape_type, ShapeType::Polygon);

        let mut labeled = 0;
        for (i, result) in reader.enumerate() {
            let record = result.expect("record should decode");
            assert_eq!(record.id as usize, i + 1);

            let decoded = record.read().expect("payload should decode");
            let paths = match &decoded {
                DecodedShape::Parts(parts) => {
                    assert_eq!(parts.len(), shapes[i].len());
                    decoded.xy_paths()
                }
                other => panic!("expected parts, got {:?}", other),
            };

            let (shape, arcs) = ArcCollection::from_paths(&paths);
            let centroid = geom::shape_centroid(&shape, &arcs)
                .expect("polygon should have a centroid");
            let p = geom::find_interior_point(&shape, &arcs)
                .expect("polygon should have an interior point");

            assert!(
                geom::point_in_polygon(p.x, p.y, &shape, &arcs),
                "label point ({}, {}) is outside shape {}",
                p.x,
                p.y,
                i + 1
            );
            assert!(geom::point_to_shape_distance(p.x, p.y, &shape, &arcs) > 0.0);
            println!(
                "✓ shape {}: centroid ({:.2}, {:.2}), label point ({:.2}, {:.2})",
                i + 1,
                centroid.x,
                centroid.y,
                p.x,
                p.y
            );
            labeled += 1;
        }
        assert_eq!(labeled, 2, "expected both records to be decoded");
    }

    #[test]
    fn test_square_label_point_near_center() {
        let shapes = vec![vec![vec![(0.0, 0.0), (8.0, 0.0), (8.0, 8.0), (0.0, 8.0)]]];
        let buf = build_polygon_file(&shapes);

        let mut reader = ShpReader::new(&buf).unwrap();
        let record = reader.next().unwrap().unwrap();
        let (shape, arcs) = ArcCollection::from_paths(&record.read().unwrap().xy_paths());

        let c = geom::shape_centroid(&shape, &arcs).unwrap();
        assert!((c.x - 4.0).abs() < 1e-9 && (c.y - 4.0).abs() < 1e-9);

        // a symmetric square should get a label point at its middle
        let p = geom::find_interior_point(&shape, &arcs).unwrap();
        assert!((p.x - 4.0).abs() < 2.0);
        assert!((p.y - 4.0).abs() < 2.0);
    }
}
