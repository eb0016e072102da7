use crate::geometry::math::{lerp2d, point_on_z_plane, translate};
use crate::geometry::tolerance::{kind_of_random, lerp};
use crate::hash::{ContentHash, Hasher64};
use crate::primitives::{Point, Polygon};
use crate::render::{Canvas, Color, Drawable, PolyStyle};
use std::f64::consts::PI;

const RING_POINTS: u32 = 16;
const LEVELS: u32 = 7;
const CROWN_TIP: f64 = 40.0;

#[derive(Clone, Debug)]
pub struct Tree {
    pub center: Point,
    pub radius: f64,
    pub height: f64,
    /// Jittered ground ring, used for hit tests and draw ordering.
    pub base: Polygon,
    /// Index of the nearest graph segment when the tree was placed.
    pub parent: Option<usize>,
}

impl Tree {
    pub fn new(center: Point, radius: f64, height: f64) -> Self {
        let base = ring(center.x, center, radius);
        Tree { center, radius, height, base, parent: None }
    }

    pub fn with_parent(mut self, parent: Option<usize>) -> Self {
        self.parent = parent;
        self
    }
}

/// Irregular ring of `RING_POINTS` vertices around `at`. The noise is a
/// deterministic function of the tree's x and the ring size, so a tree looks
/// the same on every frame.
fn ring(seed_x: f64, at: Point, size: f64) -> Polygon {
    let rad = size / 2.0;
    let points = (0..RING_POINTS)
        .map(|k| {
            let a = k as f64 * PI / (RING_POINTS as f64 / 2.0);
            let noise = kind_of_random((a + seed_x) * size, 17.0);
            translate(at, a, rad * lerp(0.5, 1.0, noise))
        })
        .collect();
    Polygon::new(points)
}

impl ContentHash for Tree {
    fn content_hash(&self) -> u64 {
        let mut h = Hasher64::new();
        h.write_tag(b"tree");
        h.write_u64(self.center.content_hash());
        h.write_f64(self.radius);
        h.write_f64(self.height);
        h.finish()
    }
}

impl Drawable for Tree {
    fn draw(&self, canvas: &mut dyn Canvas, view_point: Point) {
        let top = point_on_z_plane(self.center, view_point, self.height);
        for level in 0..LEVELS {
            let t = level as f64 / (LEVELS - 1) as f64;
            let at = lerp2d(self.center, top, t);
            let color = Color::rgb(30, Color::channel(lerp(50.0, 200.0, t)), 70);
            let size = lerp(self.radius, CROWN_TIP, t);
            let poly = ring(self.center.x, at, size);
            let style = PolyStyle { fill: Some(color), stroke: None, line_width: 0.0, round_join: false };
            canvas.polygon(&poly.points, &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::math::distance;
    use crate::render::recording::RecordingCanvas;

    #[test]
    fn base_ring_stays_within_half_radius() {
        let t = Tree::new(Point::new(120.0, -40.0), 100.0, 0.15);
        assert_eq!(t.base.points.len(), 16);
        for p in &t.base.points {
            let d = distance(*p, t.center);
            assert!(d <= 50.0 + 1e-2 && d >= 25.0 - 1e-2, "{d}");
        }
    }

    #[test]
    fn ring_is_deterministic() {
        let a = Tree::new(Point::new(3.5, 7.0), 100.0, 0.15);
        let b = Tree::new(Point::new(3.5, 7.0), 100.0, 0.15);
        assert_eq!(a.base.points, b.base.points);
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn draws_seven_levels_light_to_dark() {
        let t = Tree::new(Point::new(0.0, 0.0), 100.0, 0.15);
        let mut c = RecordingCanvas::default();
        t.draw(&mut c, Point::new(300.0, 300.0));
        assert_eq!(c.polygons.len(), 7);
        assert_eq!(c.polygons[0].1.fill, Some(Color::rgb(30, 50, 70)));
        assert_eq!(c.polygons[6].1.fill, Some(Color::rgb(30, 200, 70)));
    }
}
