//! Road decals a user snaps onto the network: stop lines, pedestrian
//! crossings and start positions.
//!
//! Every marking shares the same geometry: a rectangle (roundness-1
//! envelope) centered on the snap point, `height` long along the road
//! direction and `width` across it.

pub mod crossing;
pub mod start;
pub mod stop;

pub use crossing::Crossing;
pub use start::Start;
pub use stop::Stop;

use crate::error::GeometryError;
use crate::geometry::math::{angle, translate};
use crate::hash::{ContentHash, Hasher64};
use crate::primitives::{Envelope, Point, Polygon, Segment};
use crate::render::{Canvas, Drawable};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkingKind {
    Stop,
    Crossing,
    Start,
}

/// Which segments a marking kind snaps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapTarget {
    LaneGuides,
    GraphSegments,
}

impl MarkingKind {
    pub fn snap_target(self) -> SnapTarget {
        match self {
            MarkingKind::Crossing => SnapTarget::GraphSegments,
            MarkingKind::Stop | MarkingKind::Start => SnapTarget::LaneGuides,
        }
    }

    /// `(width, height)` for a given road width.
    pub fn size(self, road_width: f64) -> (f64, f64) {
        match self {
            MarkingKind::Stop => (road_width / 2.0, road_width / 2.0),
            MarkingKind::Crossing | MarkingKind::Start => (road_width, road_width / 2.0),
        }
    }

    pub fn build(self, center: Point, direction: Point, width: f64, height: f64) -> Result<Marking, GeometryError> {
        let shape = MarkingShape::new(center, direction, width, height)?;
        Ok(match self {
            MarkingKind::Stop => Marking::Stop(Stop { shape }),
            MarkingKind::Crossing => Marking::Crossing(Crossing::from_shape(shape)),
            MarkingKind::Start => Marking::Start(Start { shape }),
        })
    }
}

/// Geometry shared by every marking.
#[derive(Clone, Debug)]
pub struct MarkingShape {
    pub center: Point,
    /// Unit vector along the road.
    pub direction: Point,
    pub width: f64,
    pub height: f64,
    pub base: Polygon,
}

impl MarkingShape {
    pub fn new(center: Point, direction: Point, width: f64, height: f64) -> Result<Self, GeometryError> {
        let a = angle(direction);
        let support = Segment::new(translate(center, a, height / 2.0), translate(center, a, -height / 2.0));
        let base = Envelope::rect(support, width)?.poly;
        Ok(MarkingShape { center, direction, width, height, base })
    }
}

#[derive(Clone, Debug)]
pub enum Marking {
    Stop(Stop),
    Crossing(Crossing),
    Start(Start),
}

impl Marking {
    pub fn kind(&self) -> MarkingKind {
        match self {
            Marking::Stop(_) => MarkingKind::Stop,
            Marking::Crossing(_) => MarkingKind::Crossing,
            Marking::Start(_) => MarkingKind::Start,
        }
    }

    pub fn shape(&self) -> &MarkingShape {
        match self {
            Marking::Stop(m) => &m.shape,
            Marking::Crossing(m) => &m.shape,
            Marking::Start(m) => &m.shape,
        }
    }

    pub fn base(&self) -> &Polygon {
        &self.shape().base
    }
}

impl ContentHash for Marking {
    fn content_hash(&self) -> u64 {
        let mut h = Hasher64::new();
        h.write_tag(match self.kind() {
            MarkingKind::Stop => b"stop",
            MarkingKind::Crossing => b"xing",
            MarkingKind::Start => b"strt",
        });
        h.write_u64(self.base().content_hash());
        h.finish()
    }
}

impl Drawable for Marking {
    fn draw(&self, canvas: &mut dyn Canvas, view_point: Point) {
        match self {
            Marking::Stop(m) => m.draw(canvas, view_point),
            Marking::Crossing(m) => m.draw(canvas, view_point),
            Marking::Start(m) => m.draw(canvas, view_point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::math::distance;

    #[test]
    fn shape_is_centered_and_oriented() {
        let m = MarkingKind::Stop.build(Point::new(100.0, 50.0), Point::new(1.0, 0.0), 50.0, 50.0).unwrap();
        let pts = &m.base().points;
        assert_eq!(pts.len(), 4);
        for p in pts {
            assert!((distance(*p, Point::new(100.0, 50.0)) - 50.0 / 2f64.sqrt()).abs() < 1e-2);
        }
        assert!(m.base().contains_point(Point::new(110.0, 60.0)));
        assert!(!m.base().contains_point(Point::new(130.0, 50.0)));
    }

    #[test]
    fn kinds_report_sizes_and_targets() {
        assert_eq!(MarkingKind::Stop.size(100.0), (50.0, 50.0));
        assert_eq!(MarkingKind::Crossing.size(100.0), (100.0, 50.0));
        assert_eq!(MarkingKind::Crossing.snap_target(), SnapTarget::GraphSegments);
        assert_eq!(MarkingKind::Start.snap_target(), SnapTarget::LaneGuides);
        let m = MarkingKind::Start.build(Point::new(0.0, 0.0), Point::new(0.0, 1.0), 100.0, 50.0).unwrap();
        assert_eq!(m.kind(), MarkingKind::Start);
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(MarkingKind::Stop.build(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 50.0, 0.0).is_err());
    }
}
