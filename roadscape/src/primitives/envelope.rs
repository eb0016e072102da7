use super::point::Point;
use super::polygon::Polygon;
use super::segment::Segment;
use crate::error::GeometryError;
use crate::geometry::math::{angle, subtract, translate};
use crate::hash::ContentHash;
use std::f64::consts::{FRAC_PI_2, PI};

/// A rounded buffer (stadium) around a skeleton segment.
///
/// Each endpoint gets a half-turn arc of `roundness + 1` points, so the
/// polygon has `2 * (roundness + 1)` points. Roundness 1 degenerates to a
/// rectangle.
#[derive(Clone, Debug)]
pub struct Envelope {
    pub skeleton: Segment,
    pub width: f64,
    pub roundness: u32,
    pub poly: Polygon,
}

impl Envelope {
    pub fn new(skeleton: Segment, width: f64, roundness: u32) -> Result<Self, GeometryError> {
        if roundness == 0 {
            return Err(GeometryError::ZeroRoundness);
        }
        if !width.is_finite() || width <= 0.0 {
            return Err(GeometryError::InvalidWidth(width));
        }
        if skeleton.is_degenerate() {
            return Err(GeometryError::DegenerateSkeleton { x: skeleton.p1.x, y: skeleton.p1.y });
        }
        let poly = Polygon::new(outline(&skeleton, width / 2.0, roundness));
        Ok(Envelope { skeleton, width, roundness, poly })
    }

    /// Rectangle-like envelope, as used for building footprints and markings.
    pub fn rect(skeleton: Segment, width: f64) -> Result<Self, GeometryError> {
        Envelope::new(skeleton, width, 1)
    }
}

fn outline(skeleton: &Segment, radius: f64, roundness: u32) -> Vec<Point> {
    let Segment { p1, p2 } = *skeleton;
    let alpha_ccw = angle(subtract(p1, p2)) - FRAC_PI_2;
    let step = PI / roundness as f64;
    let mut points = Vec::with_capacity(2 * (roundness as usize + 1));
    for k in 0..=roundness {
        points.push(translate(p1, alpha_ccw + k as f64 * step, radius));
    }
    for k in 0..=roundness {
        points.push(translate(p2, PI + alpha_ccw + k as f64 * step, radius));
    }
    points
}

impl ContentHash for Envelope {
    fn content_hash(&self) -> u64 {
        self.poly.content_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> Segment {
        Segment::new(Point::new(200.0, 200.0), Point::new(500.0, 200.0))
    }

    #[test]
    fn point_count_follows_roundness() {
        for r in [1u32, 2, 5, 30] {
            let env = Envelope::new(horizontal(), 100.0, r).unwrap();
            assert_eq!(env.poly.points.len(), 2 * (r as usize + 1));
        }
    }

    #[test]
    fn rect_corners() {
        let env = Envelope::rect(horizontal(), 100.0).unwrap();
        let pts = &env.poly.points;
        assert_eq!(pts[0], Point::new(200.0, 250.0));
        assert_eq!(pts[1], Point::new(200.0, 150.0));
        assert_eq!(pts[2], Point::new(500.0, 150.0));
        assert_eq!(pts[3], Point::new(500.0, 250.0));
    }

    #[test]
    fn invalid_parameters_fail_fast() {
        assert_eq!(Envelope::new(horizontal(), 100.0, 0).unwrap_err(), GeometryError::ZeroRoundness);
        assert!(matches!(
            Envelope::new(horizontal(), 0.0, 10),
            Err(GeometryError::InvalidWidth(_))
        ));
        let p = Point::new(1.0, 1.0);
        assert!(matches!(
            Envelope::new(Segment::new(p, p), 10.0, 10),
            Err(GeometryError::DegenerateSkeleton { .. })
        ));
    }
}
