use thiserror::Error;

/// Invalid parameters passed to envelope construction.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeometryError {
    #[error("envelope roundness cannot be 0")]
    ZeroRoundness,
    #[error("envelope width must be finite and positive, got {0}")]
    InvalidWidth(f64),
    #[error("envelope skeleton is degenerate: both endpoints at ({x}, {y})")]
    DegenerateSkeleton { x: f64, y: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parameter '{param}' must be finite and positive, got {got}")]
    NotPositive { param: &'static str, got: f64 },
    #[error("parameter '{param}' cannot be 0")]
    Zero { param: &'static str },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum GraphError {
    /// A segment references a point missing from the loaded point list.
    #[error("inconsistent graph data: segment {index} references unknown point ({x}, {y})")]
    InconsistentData { index: usize, x: f64, y: f64 },
    #[error("invalid graph json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
