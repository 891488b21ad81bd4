use thiserror::Error;

/// Malformed polygon input. Raised before any state is touched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("polygon vertex {index} is not finite")]
    NonFinite { index: usize },
    #[error("polygon repeats vertex {index}")]
    DuplicateVertex { index: usize },
    #[error("polygon has zero area")]
    ZeroArea,
    #[error("polygon is self-intersecting (edges {first} and {second})")]
    SelfIntersecting { first: usize, second: usize },
    #[error("polygon is not convex")]
    NotConvex,
}

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("device is not movable")]
    DeviceLocked,
}
