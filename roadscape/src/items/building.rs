use crate::geometry::math::{distance, point_on_z_plane};
use crate::hash::ContentHash;
use crate::primitives::{Envelope, Point, Polygon, Segment};
use crate::render::{Canvas, Color, Drawable, PolyStyle};

const WALL: Color = Color::WHITE;
const EDGE: Color = Color::rgb(0xAA, 0xAA, 0xAA);
const GABLE: Color = Color::rgb(0xfc, 0xf3, 0xd7);
const SHINGLES: [Color; 4] = [
    Color::rgb(0xa8, 0x4a, 0x32),
    Color::rgb(0x77, 0x7e, 0xb5),
    Color::rgb(0x3e, 0x70, 0x40),
    Color::rgb(0x9c, 0x68, 0x02),
];

/// A box-shaped building with a gabled roof, extruded from a rectangular
/// footprint by the view-dependent z-plane projection.
#[derive(Clone, Debug)]
pub struct Building {
    pub base: Polygon,
    pub height: f64,
    pub roof_height: f64,
}

impl Building {
    pub fn new(base: Polygon, height: f64, roof_height: f64) -> Self {
        Building { base, height, roof_height }
    }

    fn ceiling(&self, view_point: Point) -> Vec<Point> {
        self.base.points.iter().map(|p| point_on_z_plane(*p, view_point, self.height)).collect()
    }

    /// Wall quads, farthest from the viewer first.
    fn sides(&self, ceiling: &[Point], view_point: Point) -> Vec<Polygon> {
        let pts = &self.base.points;
        let n = pts.len();
        let mut sides: Vec<Polygon> = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                Polygon::new(vec![pts[i], pts[j], ceiling[j], ceiling[i]])
            })
            .collect();
        sort_far_to_near(&mut sides, view_point);
        sides
    }

    fn draw_roof(&self, canvas: &mut dyn Canvas, ceiling: &[Point], view_point: Point) {
        let pts = &self.base.points;
        if pts.len() < 4 {
            return;
        }
        let ridge_height = self.height + self.roof_height;
        let ridge = Segment::new(
            point_on_z_plane(pts[0], view_point, ridge_height),
            point_on_z_plane(pts[1], view_point, ridge_height),
        );
        let Ok(env) = Envelope::rect(ridge, distance(pts[0], pts[3])) else {
            return;
        };
        let top1 = env.poly.points[0];
        let top2 = env.poly.points[3];

        let mut shingles = vec![
            Polygon::new(vec![ceiling[0], ceiling[1], top2, top1]),
            Polygon::new(vec![ceiling[2], ceiling[3], top1, top2]),
        ];
        sort_far_to_near(&mut shingles, view_point);

        let palette = crate::geometry::tolerance::kind_of_random(top1.x * top2.y, 17.0);
        let idx = ((palette * SHINGLES.len() as f64) as usize).min(SHINGLES.len() - 1);

        // The ceiling painted in the gable color stands in for the triangular
        // roof ends under this projection.
        canvas.polygon(ceiling, &PolyStyle::filled(GABLE, EDGE, 2.0));
        let style = PolyStyle::filled(SHINGLES[idx], EDGE, 2.0);
        for s in &shingles {
            canvas.polygon(&s.points, &style);
        }
    }
}

fn sort_far_to_near(polys: &mut [Polygon], view_point: Point) {
    polys.sort_by(|a, b| {
        b.distance_to_point(view_point).total_cmp(&a.distance_to_point(view_point))
    });
}

impl ContentHash for Building {
    fn content_hash(&self) -> u64 {
        self.base.content_hash()
    }
}

impl Drawable for Building {
    fn draw(&self, canvas: &mut dyn Canvas, view_point: Point) {
        let ceiling = self.ceiling(view_point);
        let wall = PolyStyle::filled(WALL, EDGE, 2.0);
        canvas.polygon(&self.base.points, &wall);
        for side in self.sides(&ceiling, view_point) {
            canvas.polygon(&side.points, &wall);
        }
        self.draw_roof(canvas, &ceiling, view_point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::RecordingCanvas;

    fn building() -> Building {
        let support = Segment::new(Point::new(0.0, 0.0), Point::new(200.0, 0.0));
        let env = Envelope::rect(support, 150.0).unwrap();
        Building::new(env.poly, 0.1, 0.05)
    }

    #[test]
    fn draw_emits_base_walls_and_roof() {
        let b = building();
        let mut c = RecordingCanvas::default();
        b.draw(&mut c, Point::new(100.0, 500.0));
        // base + 4 walls + ceiling + 2 shingle faces
        assert_eq!(c.polygons.len(), 8);
        assert_eq!(c.polygons[0].0, b.base.points);
        let roof = &c.polygons[7].1;
        assert!(SHINGLES.contains(&roof.fill.unwrap()));
    }

    #[test]
    fn walls_are_sorted_far_to_near() {
        let b = building();
        let vp = Point::new(100.0, 500.0);
        let sides = b.sides(&b.ceiling(vp), vp);
        let d: Vec<f64> = sides.iter().map(|s| s.distance_to_point(vp)).collect();
        assert!(d.windows(2).all(|w| w[0] >= w[1]));
    }
}
