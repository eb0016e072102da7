pub mod geometry {
    pub mod intersect;
    pub mod math;
    pub mod tolerance;
}
pub mod config;
pub mod error;
pub mod graph;
pub mod hash;
pub mod items;
pub mod markings;
pub mod primitives;
pub mod render;
pub mod svg;
pub mod world;

pub use config::WorldConfig;
pub use error::{ConfigError, Error, GeometryError, GraphError, Result};
pub use graph::{Graph, GraphData};
pub use hash::ContentHash;
pub use items::{Building, Road, Tree};
pub use markings::{Marking, MarkingKind};
pub use primitives::{Envelope, Point, PointData, Polygon, Segment, SegmentData};
pub use render::{Canvas, Color, Drawable, LineStyle, PolyStyle};
pub use svg::SvgCanvas;
pub use world::World;
