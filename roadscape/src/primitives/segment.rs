use super::point::{Point, PointData};
use crate::geometry::math::{add, distance, dot, magnitude, normalize, scale, subtract};
use crate::hash::{combine_sorted, ContentHash};
use serde::{Deserialize, Serialize};

/// Serialized shape of a segment: both endpoints by value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentData {
    pub p1: PointData,
    pub p2: PointData,
}

/// Result of projecting a point onto a segment's supporting line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub point: Point,
    /// Unclamped parameter: 0 at `p1`, 1 at `p2`.
    pub offset: f64,
}

/// An ordered pair of points. Equality ignores direction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Segment { p1, p2 }
    }

    pub fn length(&self) -> f64 {
        distance(self.p1, self.p2)
    }

    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    pub fn direction_vector(&self) -> Point {
        normalize(subtract(self.p2, self.p1))
    }

    pub fn includes(&self, p: Point) -> bool {
        self.p1 == p || self.p2 == p
    }

    pub fn midpoint(&self) -> Point {
        crate::geometry::math::average(self.p1, self.p2)
    }

    /// Project `p` onto the supporting line. The offset is not clamped, so
    /// callers check `0..=1` to know whether the foot lies on the segment.
    pub fn project_point(&self, p: Point) -> Projection {
        let a = subtract(p, self.p1);
        let b = subtract(self.p2, self.p1);
        let len = magnitude(b);
        if len == 0.0 {
            return Projection { point: self.p1, offset: 0.0 };
        }
        let n = normalize(b);
        let scaler = dot(a, n);
        Projection {
            point: add(self.p1, scale(n, scaler)),
            offset: scaler / len,
        }
    }

    /// Distance from `p` to the finite segment.
    pub fn distance_to_point(&self, p: Point) -> f64 {
        let proj = self.project_point(p);
        if proj.offset > 0.0 && proj.offset < 1.0 {
            return distance(p, proj.point);
        }
        distance(p, self.p1).min(distance(p, self.p2))
    }

    pub fn data(&self) -> SegmentData {
        SegmentData { p1: self.p1.data(), p2: self.p2.data() }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.includes(other.p1) && self.includes(other.p2)
    }
}

impl ContentHash for Segment {
    fn content_hash(&self) -> u64 {
        combine_sorted(b"seg", [self.p1.content_hash(), self.p2.content_hash()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn equality_is_undirected() {
        assert_eq!(seg(0.0, 0.0, 5.0, 5.0), seg(5.0, 5.0, 0.0, 0.0));
        assert_eq!(
            seg(0.0, 0.0, 5.0, 5.0).content_hash(),
            seg(5.0, 5.0, 0.0, 0.0).content_hash()
        );
        assert_ne!(seg(0.0, 0.0, 5.0, 5.0), seg(0.0, 0.0, 5.0, 6.0));
    }

    #[test]
    fn projection_offset_is_unclamped() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        let pr = s.project_point(Point::new(15.0, 3.0));
        assert_eq!(pr.point, Point::new(15.0, 0.0));
        assert!((pr.offset - 1.5).abs() < 1e-12);
        let pr = s.project_point(Point::new(-5.0, 3.0));
        assert!((pr.offset + 0.5).abs() < 1e-12);
    }

    #[test]
    fn distance_uses_endpoints_outside_range() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        assert!((s.distance_to_point(Point::new(5.0, 4.0)) - 4.0).abs() < 1e-9);
        assert!((s.distance_to_point(Point::new(13.0, 4.0)) - 5.0).abs() < 1e-9);
        assert!((s.distance_to_point(Point::new(-3.0, -4.0)) - 5.0).abs() < 1e-9);
    }
}
