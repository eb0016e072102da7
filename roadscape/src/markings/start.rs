use super::MarkingShape;
use crate::geometry::math::angle;
use crate::primitives::Point;
use crate::render::{Canvas, Drawable};
use std::f64::consts::FRAC_PI_2;

pub const CAR_SPRITE: &str = "car";

#[derive(Clone, Debug)]
pub struct Start {
    pub shape: MarkingShape,
}

impl Drawable for Start {
    fn draw(&self, canvas: &mut dyn Canvas, _view_point: Point) {
        // The sprite points up; the road direction is measured from +x.
        canvas.sprite(CAR_SPRITE, self.shape.center, angle(self.shape.direction) - FRAC_PI_2);
    }
}
