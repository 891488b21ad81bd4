pub mod constants;
pub mod error;
pub mod geometry;

pub use constants::*;
pub use error::{GeometryError, MotionError};
pub use geometry::{Bounds, Point, Pose2};
