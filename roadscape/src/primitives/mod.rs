pub mod envelope;
pub mod point;
pub mod polygon;
pub mod segment;

pub use envelope::Envelope;
pub use point::{Point, PointData};
pub use polygon::{bbox_of, Polygon};
pub use segment::{Projection, Segment, SegmentData};
