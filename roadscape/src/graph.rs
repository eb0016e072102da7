//! The user-edited road network: unique points joined by unique,
//! non-degenerate segments.
//!
//! Points are values, so a segment is identified by its endpoint pair and
//! stays valid as long as both endpoints are members of the point set.
//! `remove_point` cascades to incident segments and `move_point` rewrites
//! them, which keeps that invariant without any back-references.

use crate::error::GraphError;
use crate::hash::{combine_sorted, ContentHash};
use crate::primitives::{Point, PointData, Segment, SegmentData};
use serde::{Deserialize, Serialize};

/// Persisted shape of a graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub points: Vec<PointData>,
    pub segments: Vec<SegmentData>,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    points: Vec<Point>,
    segments: Vec<Segment>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw lists without checks; use [`Graph::load`] for
    /// untrusted data.
    pub fn from_parts(points: Vec<Point>, segments: Vec<Segment>) -> Self {
        Graph { points, segments }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.segments.is_empty()
    }

    // Points
    pub fn add_point(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    pub fn try_add_point(&mut self, p: Point) -> bool {
        if !p.is_finite() || self.contains_point(p) {
            return false;
        }
        self.add_point(p);
        true
    }

    /// Remove `p` and every segment touching it.
    pub fn remove_point(&mut self, p: Point) -> bool {
        let Some(idx) = self.points.iter().position(|q| *q == p) else {
            return false;
        };
        self.segments.retain(|s| !s.includes(p));
        self.points.remove(idx);
        true
    }

    /// Move a point and every segment endpoint referencing it. Refuses to
    /// merge onto an existing point.
    pub fn move_point(&mut self, from: Point, to: Point) -> bool {
        if from == to {
            return self.contains_point(from);
        }
        if !to.is_finite() || self.contains_point(to) {
            return false;
        }
        let Some(slot) = self.points.iter_mut().find(|q| **q == from) else {
            return false;
        };
        *slot = to;
        for s in self.segments.iter_mut() {
            if s.p1 == from {
                s.p1 = to;
            }
            if s.p2 == from {
                s.p2 = to;
            }
        }
        true
    }

    // Segments
    pub fn add_segment(&mut self, seg: Segment) {
        self.segments.push(seg);
    }

    pub fn contains_segment(&self, seg: &Segment) -> bool {
        self.segments.contains(seg)
    }

    /// Rejects duplicates (in either direction) and zero-length segments.
    pub fn try_add_segment(&mut self, seg: Segment) -> bool {
        if seg.is_degenerate() || self.contains_segment(&seg) {
            return false;
        }
        self.add_segment(seg);
        true
    }

    pub fn remove_segment(&mut self, seg: &Segment) -> bool {
        let Some(idx) = self.segments.iter().position(|s| s == seg) else {
            return false;
        };
        self.segments.remove(idx);
        true
    }

    pub fn segments_with_point(&self, p: Point) -> Vec<Segment> {
        self.segments.iter().filter(|s| s.includes(p)).copied().collect()
    }

    pub fn dispose(&mut self) {
        self.points.clear();
        self.segments.clear();
    }

    // Picking
    /// Closest point within `threshold` of `p`.
    pub fn nearest_point(&self, p: Point, threshold: f64) -> Option<Point> {
        nearest_by(self.points.iter().copied(), threshold, |q| {
            crate::geometry::math::distance(p, *q)
        })
    }

    /// Index of the closest segment within `threshold` of `p`.
    pub fn nearest_segment(&self, p: Point, threshold: f64) -> Option<usize> {
        nearest_by(0..self.segments.len(), threshold, |i| self.segments[*i].distance_to_point(p))
    }

    // Persistence
    /// Rebuild a graph from persisted data. Segment endpoints must be
    /// members of the point list. Duplicate or non-finite points and
    /// duplicate or zero-length segments are dropped.
    pub fn load(data: GraphData) -> Result<Self, GraphError> {
        let mut graph = Graph::new();
        let (n_points, n_segments) = (data.points.len(), data.segments.len());
        for p in data.points {
            graph.try_add_point(p.into());
        }
        for (index, s) in data.segments.into_iter().enumerate() {
            let seg = Segment::new(s.p1.into(), s.p2.into());
            for end in [seg.p1, seg.p2] {
                if !graph.contains_point(end) {
                    return Err(GraphError::InconsistentData { index, x: end.x, y: end.y });
                }
            }
            graph.try_add_segment(seg);
        }
        log::debug!(
            "graph loaded: {} points, {} segments ({} points, {} segments dropped)",
            graph.points.len(),
            graph.segments.len(),
            n_points - graph.points.len(),
            n_segments - graph.segments.len()
        );
        Ok(graph)
    }

    pub fn save(&self) -> GraphData {
        GraphData {
            points: self.points.iter().map(Point::data).collect(),
            segments: self.segments.iter().map(Segment::data).collect(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, GraphError> {
        let data: GraphData = serde_json::from_str(s)?;
        Graph::load(data)
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.save()).unwrap_or_default()
    }

    /// Order-independent digest of the graph content.
    pub fn hash(&self) -> u64 {
        self.content_hash()
    }
}

fn nearest_by<T>(items: impl Iterator<Item = T>, threshold: f64, dist: impl Fn(&T) -> f64) -> Option<T> {
    let mut best: Option<(f64, T)> = None;
    for item in items {
        let d = dist(&item);
        if d < threshold && best.as_ref().map_or(true, |(bd, _)| d < *bd) {
            best = Some((d, item));
        }
    }
    best.map(|(_, item)| item)
}

impl ContentHash for Graph {
    fn content_hash(&self) -> u64 {
        let points = combine_sorted(b"pts", self.points.iter().map(ContentHash::content_hash));
        let segments = combine_sorted(b"segs", self.segments.iter().map(ContentHash::content_hash));
        let mut h = crate::hash::Hasher64::new();
        h.write_tag(b"graph");
        h.write_u64(points);
        h.write_u64(segments);
        h.finish()
    }
}
