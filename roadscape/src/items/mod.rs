//! Scene entities derived from the graph by the world generator.

pub mod building;
pub mod road;
pub mod tree;

pub use building::Building;
pub use road::Road;
pub use tree::Tree;
