use roadscape::{Graph, GraphData, GraphError, Point, PointData, Segment, SegmentData, WorldConfig};

#[test]
fn test_json_shape_matches_saved_data() {
    let mut g = Graph::new();
    let a = Point::new(200.0, 200.0);
    let b = Point::new(500.0, 200.0);
    g.try_add_point(a);
    g.try_add_point(b);
    g.try_add_segment(Segment::new(a, b));
    let v: serde_json::Value = serde_json::from_str(&g.to_json_string()).unwrap();
    assert_eq!(v["points"][1]["x"], 500.0);
    assert_eq!(v["segments"][0]["p1"]["y"], 200.0);
    assert_eq!(v["segments"][0]["p2"]["x"], 500.0);
}

#[test]
fn test_dangling_endpoint_is_inconsistent() {
    let data = GraphData {
        points: vec![PointData { x: 0.0, y: 0.0 }],
        segments: vec![SegmentData { p1: PointData { x: 0.0, y: 0.0 }, p2: PointData { x: 9.0, y: 9.0 } }],
    };
    match Graph::load(data) {
        Err(GraphError::InconsistentData { index, x, y }) => {
            assert_eq!(index, 0);
            assert_eq!((x, y), (9.0, 9.0));
        }
        other => panic!("expected InconsistentData, got {:?}", other.map(|g| g.save())),
    }
}

#[test]
fn test_loaded_coordinates_are_rounded() {
    let json = r#"{"points":[{"x":0.00049,"y":1.23456},{"x":10,"y":0}],
                   "segments":[{"p1":{"x":0.0001,"y":1.2346},"p2":{"x":10,"y":0}}]}"#;
    let g = Graph::from_json_str(json).unwrap();
    assert_eq!(g.points()[0], Point::new(0.0, 1.235));
    assert_eq!(g.segments().len(), 1);
}

#[test]
fn test_bad_json_is_reported() {
    assert!(matches!(Graph::from_json_str("{\"points\": 3}"), Err(GraphError::Json(_))));
    assert!(WorldConfig::from_json_str("{\"road_width\": -5}").is_err());
}

#[test]
fn test_load_drops_duplicates_and_degenerate_segments() {
    let pd = |x, y| PointData { x, y };
    let data = GraphData {
        // The third point rounds onto the first.
        points: vec![pd(0.0, 0.0), pd(100.0, 0.0), pd(0.0001, 0.0)],
        segments: vec![
            SegmentData { p1: pd(0.0, 0.0), p2: pd(100.0, 0.0) },
            SegmentData { p1: pd(100.0, 0.0), p2: pd(0.0, 0.0) },
            SegmentData { p1: pd(100.0, 0.0), p2: pd(100.0, 0.0) },
        ],
    };
    let g = Graph::load(data).unwrap();
    assert_eq!(g.points(), &[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    assert_eq!(g.segments().len(), 1);
    assert_eq!(Graph::from_json_str(&g.to_json_string()).unwrap().hash(), g.hash());
}
