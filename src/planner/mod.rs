//! Path finders: full-knowledge and sensor-limited planning over the
//! configuration space.
//!
//! Failing to find a path is an ordinary outcome, reported as
//! [`PlanOutcome::NotFound`] with a reason rather than as an error.

mod path;
mod regular;
mod vision;
mod visibility;

use std::fmt;

use tracing::warn;

pub use path::{Path, PathInfo};
pub use regular::RegularPathFinder;
pub use visibility::visibility_graph;
pub use vision::{VisionPathFinder, VisionStep};

use crate::cspace::ConfigurationSpace;
use crate::search::SearchGraph;
use crate::types::Point;
use crate::vision::DiscoveredObstacles;

/// Which end of a planning request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEnd {
    Start,
    Goal,
}

impl fmt::Display for PathEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Goal => write!(f, "goal"),
        }
    }
}

/// A start or goal that is not a free placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidPlacement {
    pub end: PathEnd,
    pub point: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotFoundReason {
    InvalidPlacement(InvalidPlacement),
    /// Start and goal are not connected under the current knowledge.
    Unreachable,
    /// The sensor-limited planner stopped making progress.
    NoProgress { iterations: usize },
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlacement(InvalidPlacement { end, point }) => {
                write!(f, "{end} ({:.2}, {:.2}) is not a free placement", point.x, point.y)
            }
            Self::Unreachable => write!(f, "goal is unreachable"),
            Self::NoProgress { iterations } => {
                write!(f, "no progress after {iterations} iterations")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Found(Path),
    NotFound(NotFoundReason),
}

impl PlanOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The found path, or the empty path.
    pub fn path(&self) -> Path {
        match self {
            Self::Found(path) => path.clone(),
            Self::NotFound(_) => Path::empty(),
        }
    }

    pub fn reason(&self) -> Option<NotFoundReason> {
        match self {
            Self::Found(_) => None,
            Self::NotFound(reason) => Some(*reason),
        }
    }
}

pub trait PathFinder: fmt::Debug {
    fn name(&self) -> &'static str;

    fn compute_path(
        &mut self,
        space: &ConfigurationSpace,
        start: Point,
        goal: Point,
    ) -> PlanOutcome;

    /// Graph searched by the last request, for display.
    fn roadmap(&self) -> Option<&SearchGraph>;

    /// Sensor knowledge gathered by the last request, if the finder senses.
    fn discovered(&self) -> Option<&DiscoveredObstacles> {
        None
    }

    /// Planning iterations spent on the last request.
    fn iterations(&self) -> usize;
}

/// Both ends must be free placements in the true configuration space.
fn check_endpoints(
    space: &ConfigurationSpace,
    start: Point,
    goal: Point,
) -> Result<(), NotFoundReason> {
    for (end, point) in [(PathEnd::Start, start), (PathEnd::Goal, goal)] {
        if !space.is_placement_free(point) {
            warn!(%end, x = point.x, y = point.y, "placement is not free");
            return Err(NotFoundReason::InvalidPlacement(InvalidPlacement { end, point }));
        }
    }
    Ok(())
}
