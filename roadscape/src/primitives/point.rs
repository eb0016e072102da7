use crate::geometry::tolerance::round_coord;
use crate::hash::{ContentHash, Hasher64};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Serialized shape of a point: `{ "x": .., "y": .. }`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointData {
    pub x: f64,
    pub y: f64,
}

/// A 2D point stored at a fixed decimal precision.
///
/// Coordinates are rounded on construction so that equality and hashing are
/// exact despite floating-point drift in the generator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "PointData")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x: round_coord(x), y: round_coord(y) }
    }

    /// Bypasses rounding; only for reference points far outside the scene.
    pub(crate) const fn unrounded(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn data(&self) -> PointData {
        PointData { x: self.x, y: self.y }
    }
}

impl From<PointData> for Point {
    fn from(d: PointData) -> Self {
        Point::new(d.x, d.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

// Rounded coordinates never hold -0.0 or NaN from finite input.
impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl ContentHash for Point {
    fn content_hash(&self) -> u64 {
        let mut h = Hasher64::new();
        h.write_f64(self.x);
        h.write_f64(self.y);
        h.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_on_rounded_coordinates() {
        assert_eq!(Point::new(1.0004, 2.0), Point::new(1.0, 2.0001));
        assert_ne!(Point::new(1.001, 2.0), Point::new(1.0, 2.0));
    }

    #[test]
    fn hash_matches_equality() {
        let a = Point::new(-0.0001, 5.0);
        let b = Point::new(0.0, 5.0);
        assert_eq!(a, b);
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn deserialize_rounds() {
        let p: Point = serde_json::from_str(r#"{"x":1.23456,"y":-7.0}"#).unwrap();
        assert_eq!(p, Point::new(1.235, -7.0));
    }
}
