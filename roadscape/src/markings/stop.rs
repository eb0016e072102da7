use super::MarkingShape;
use crate::primitives::Point;
use crate::render::{Canvas, Drawable, PolyStyle};

#[derive(Clone, Debug)]
pub struct Stop {
    pub shape: MarkingShape,
}

impl Drawable for Stop {
    fn draw(&self, canvas: &mut dyn Canvas, _view_point: Point) {
        canvas.polygon(&self.shape.base.points, &PolyStyle::default());
    }
}
