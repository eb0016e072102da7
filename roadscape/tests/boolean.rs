//! Integration tests for the polygon break / union engine.

use roadscape::{Envelope, Point, Polygon, Segment};

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon::new(vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ])
}

#[test]
fn test_union_of_single_polygon_is_its_boundary() {
    let a = rect(0.0, 0.0, 40.0, 20.0);
    let out = Polygon::union(&mut [a.clone()]);
    assert_eq!(out, a.segments);
}

#[test]
fn test_union_of_disjoint_polygons_concatenates() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(100.0, 100.0, 120.0, 130.0);
    let out = Polygon::union(&mut [a.clone(), b.clone()]);
    let expected: Vec<Segment> = a.segments.iter().chain(b.segments.iter()).copied().collect();
    assert_eq!(out, expected);
}

#[test]
fn test_union_drops_contained_polygon() {
    let outer = rect(0.0, 0.0, 100.0, 100.0);
    let inner = rect(20.0, 20.0, 40.0, 40.0);
    let out = Polygon::union(&mut [outer.clone(), inner]);
    assert_eq!(out, outer.segments);
}

#[test]
fn test_union_of_crossing_roads_has_no_interior_edges() {
    let h = Envelope::new(
        Segment::new(Point::new(0.0, 0.0), Point::new(400.0, 0.0)),
        100.0,
        10,
    )
    .unwrap();
    let v = Envelope::new(
        Segment::new(Point::new(200.0, -200.0), Point::new(200.0, 200.0)),
        100.0,
        10,
    )
    .unwrap();
    let out = Polygon::union(&mut [h.poly.clone(), v.poly.clone()]);
    assert!(!out.is_empty());
    for s in &out {
        let m = s.midpoint();
        assert!(
            !(h.poly.contains_point(m) && v.poly.contains_point(m)),
            "segment {:?} lies inside both roads",
            s
        );
    }
    // The crossing square (150..250, -50..50) has no boundary left.
    assert!(out
        .iter()
        .all(|s| !(s.midpoint().x > 151.0 && s.midpoint().x < 249.0 && s.midpoint().y.abs() < 49.0)));
}

#[test]
fn test_multi_break_is_pairwise() {
    let mut polys = vec![
        rect(0.0, 0.0, 10.0, 10.0),
        rect(5.0, 3.0, 15.0, 13.0),
        rect(200.0, 200.0, 210.0, 210.0),
    ];
    Polygon::multi_break(&mut polys);
    assert_eq!(polys[0].segments.len(), 6);
    assert_eq!(polys[1].segments.len(), 6);
    assert_eq!(polys[2].segments.len(), 4);
    // Breaking keeps the outline: every piece still chains end to start.
    for poly in &polys {
        for w in poly.segments.windows(2) {
            assert_eq!(w[0].p2, w[1].p1);
        }
    }
}
