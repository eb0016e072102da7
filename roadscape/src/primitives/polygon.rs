//! Polygons and the pairwise boolean engine used to merge envelopes.
//!
//! The union works in two passes:
//! 1. `multi_break` splits every pair of crossing boundary segments at their
//!    intersection point, in place, for all unordered pairs of polygons.
//! 2. `union` keeps every segment whose midpoint is not inside any *other*
//!    polygon.
//!
//! The result is the outer boundary as an unordered list of segments; it is
//! not reassembled into closed rings.

use super::point::Point;
use super::segment::Segment;
use crate::geometry::intersect::get_intersection;
use crate::geometry::tolerance::FAR_AWAY;
use crate::hash::{combine_sorted, ContentHash};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    #[serde(skip)]
    pub segments: Vec<Segment>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        let n = points.len();
        let segments = (1..=n).map(|i| Segment::new(points[i - 1], points[i % n])).collect();
        Polygon { points, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Union of `polys` as boundary segments. Splits the polygons' segment
    /// lists in place.
    pub fn union(polys: &mut [Polygon]) -> Vec<Segment> {
        Polygon::multi_break(polys);
        let mut kept = Vec::new();
        for (i, poly) in polys.iter().enumerate() {
            for seg in &poly.segments {
                let interior = polys
                    .iter()
                    .enumerate()
                    .any(|(j, other)| i != j && other.contains_segment(seg));
                if !interior {
                    kept.push(*seg);
                }
            }
        }
        kept
    }

    pub fn multi_break(polys: &mut [Polygon]) {
        let n = polys.len();
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                let (left, right) = polys.split_at_mut(j);
                Polygon::break_pair(&mut left[i], &mut right[0]);
            }
        }
    }

    /// Split both polygons' segments wherever they cross strictly inside.
    /// The lists grow while being walked; inserted pieces are visited too.
    pub fn break_pair(a: &mut Polygon, b: &mut Polygon) {
        let mut i = 0;
        while i < a.segments.len() {
            let mut j = 0;
            while j < b.segments.len() {
                let s1 = a.segments[i];
                let s2 = b.segments[j];
                if let Some(hit) = get_intersection(s1.p1, s1.p2, s2.p1, s2.p2) {
                    let point = hit.point;
                    let interior = hit.offset != 0.0
                        && hit.offset != 1.0
                        && !s1.includes(point)
                        && !s2.includes(point);
                    if interior {
                        a.segments[i].p2 = point;
                        a.segments.insert(i + 1, Segment::new(point, s1.p2));
                        b.segments[j].p2 = point;
                        b.segments.insert(j + 1, Segment::new(point, s2.p2));
                    }
                }
                j += 1;
            }
            i += 1;
        }
    }

    pub fn intersects_poly(&self, other: &Polygon) -> bool {
        self.segments.iter().any(|s| {
            other
                .segments
                .iter()
                .any(|o| get_intersection(s.p1, s.p2, o.p1, o.p2).is_some())
        })
    }

    pub fn contained_by_poly(&self, other: &Polygon) -> bool {
        self.points.iter().all(|p| other.contains_point(*p))
    }

    pub fn contains_segment(&self, seg: &Segment) -> bool {
        self.contains_point(seg.midpoint())
    }

    /// Ray-casting parity test toward a fixed far-away point.
    /// Rays passing exactly through a vertex may be miscounted.
    pub fn contains_point(&self, p: Point) -> bool {
        let outer = Point::unrounded(FAR_AWAY, FAR_AWAY);
        let crossings = self
            .segments
            .iter()
            .filter(|s| get_intersection(p, outer, s.p1, s.p2).is_some())
            .count();
        crossings % 2 == 1
    }

    pub fn distance_to_point(&self, p: Point) -> f64 {
        self.segments
            .iter()
            .map(|s| s.distance_to_point(p))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn distance_to_poly(&self, other: &Polygon) -> f64 {
        other
            .points
            .iter()
            .map(|p| self.distance_to_point(*p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Axis-aligned bounds as (minx, miny, maxx, maxy).
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        bbox_of(self.points.iter().copied())
    }
}

pub fn bbox_of(points: impl IntoIterator<Item = Point>) -> Option<(f64, f64, f64, f64)> {
    points.into_iter().fold(None, |acc, p| match acc {
        None => Some((p.x, p.y, p.x, p.y)),
        Some((x0, y0, x1, y1)) => Some((x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))),
    })
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.content_hash() == other.content_hash()
    }
}

impl ContentHash for Polygon {
    fn content_hash(&self) -> u64 {
        combine_sorted(b"poly", self.segments.iter().map(|s| s.content_hash()))
    }
}
