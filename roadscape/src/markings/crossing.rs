use super::MarkingShape;
use crate::geometry::math::{add, perpendicular, scale};
use crate::primitives::{Point, Segment};
use crate::render::{Canvas, Color, Drawable, LineStyle};

/// Zebra crossing: one wide dashed stroke across the road.
#[derive(Clone, Debug)]
pub struct Crossing {
    pub shape: MarkingShape,
    /// The two base edges running across the road.
    pub borders: [Segment; 2],
}

impl Crossing {
    pub(super) fn from_shape(shape: MarkingShape) -> Self {
        let borders = [shape.base.segments[0], shape.base.segments[2]];
        Crossing { shape, borders }
    }

    /// Centerline of the stripes, perpendicular to the road.
    pub fn stripe_line(&self) -> Segment {
        let perp = perpendicular(self.shape.direction);
        let half = self.shape.width / 2.0;
        Segment::new(
            add(self.shape.center, scale(perp, half)),
            add(self.shape.center, scale(perp, -half)),
        )
    }
}

impl Drawable for Crossing {
    fn draw(&self, canvas: &mut dyn Canvas, _view_point: Point) {
        let line = self.stripe_line();
        canvas.line(line.p1, line.p2, &LineStyle::dashed(Color::WHITE, self.shape.height, &[11.0, 11.0]));
    }
}

#[cfg(test)]
mod tests {
    use crate::markings::{Marking, MarkingKind};
    use crate::primitives::Point;
    use crate::render::recording::RecordingCanvas;
    use crate::render::Drawable;

    #[test]
    fn stripes_cross_the_road() {
        let m = MarkingKind::Crossing.build(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 100.0, 50.0).unwrap();
        let Marking::Crossing(c) = &m else { panic!("not a crossing") };
        let line = c.stripe_line();
        assert_eq!(line.p1, Point::new(0.0, 50.0));
        assert_eq!(line.p2, Point::new(0.0, -50.0));
        assert!(c.borders.iter().all(|b| (b.length() - 100.0).abs() < 1e-6));
        let mut canvas = RecordingCanvas::default();
        m.draw(&mut canvas, Point::new(0.0, 0.0));
        assert_eq!(canvas.lines.len(), 1);
        assert_eq!(canvas.lines[0].2.dash, vec![11.0, 11.0]);
        assert_eq!(canvas.lines[0].2.width, 50.0);
    }
}
