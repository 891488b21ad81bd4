pub mod config;
pub mod cspace;
pub mod geometry;
pub mod planner;
pub mod raycast;
pub mod scene;
pub mod search;
pub mod types;
pub mod vision;

pub use config::{PlannerConfig, load_config};
pub use cspace::{ConfigurationSpace, ObstacleId};
pub use geometry::{Polygon, PolygonSet};
pub use planner::{
    NotFoundReason, Path, PathFinder, PlanOutcome, RegularPathFinder, VisionPathFinder, VisionStep,
};
pub use scene::Scene;
pub use search::{FindMethod, FindMethodKind};
pub use types::{Bounds, GeometryError, MotionError, Point, Pose2};
pub use vision::{DiscoveredObstacles, Vision, VisionConfig};
