use crate::error::GeometryError;
use crate::hash::ContentHash;
use crate::primitives::{Envelope, Point, Segment};
use crate::render::{Canvas, Color, Drawable, PolyStyle};

/// Road surface around one graph segment.
#[derive(Clone, Debug)]
pub struct Road {
    pub envelope: Envelope,
    /// Index of the source segment in the graph at generation time.
    pub segment_index: usize,
}

impl Road {
    pub fn new(skeleton: Segment, width: f64, roundness: u32, segment_index: usize) -> Result<Self, GeometryError> {
        Ok(Road { envelope: Envelope::new(skeleton, width, roundness)?, segment_index })
    }

    pub fn skeleton(&self) -> Segment {
        self.envelope.skeleton
    }
}

impl ContentHash for Road {
    fn content_hash(&self) -> u64 {
        self.envelope.content_hash()
    }
}

impl Drawable for Road {
    fn draw(&self, canvas: &mut dyn Canvas, _view_point: Point) {
        let style = PolyStyle {
            fill: Some(Color::ROAD),
            stroke: Some(Color::ROAD),
            line_width: 15.0,
            round_join: true,
        };
        canvas.polygon(&self.envelope.poly.points, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::RecordingCanvas;

    #[test]
    fn draws_its_envelope() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let road = Road::new(seg, 40.0, 4, 3).unwrap();
        assert_eq!(road.segment_index, 3);
        assert_eq!(road.skeleton(), seg);
        let mut c = RecordingCanvas::default();
        road.draw(&mut c, Point::new(0.0, 0.0));
        assert_eq!(c.polygons.len(), 1);
        assert_eq!(c.polygons[0].0.len(), 10);
        assert_eq!(c.polygons[0].1.fill, Some(Color::ROAD));
    }
}
