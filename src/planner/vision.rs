use std::f64::consts::TAU;

use tracing::{debug, info, warn};

use crate::cspace::ConfigurationSpace;
use crate::planner::{
    NotFoundReason, Path, PathFinder, PlanOutcome, check_endpoints, visibility_graph,
};
use crate::search::{Dijkstra, FindMethod, SearchGraph};
use crate::types::{
    ANGLE_EPSILON, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_STALLED_ITERATIONS, LENGTH_EPSILON, Point,
};
use crate::vision::{DiscoveredObstacles, Vision, VisionConfig};

/// Result of one sense-plan-advance iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum VisionStep {
    /// The device moved from `from` to `to` following the first segment of
    /// `plan`, stopping early if it ran into geometry it had not seen.
    Advanced { from: Point, to: Point, plan: Path },
    Arrived,
    NotFound(NotFoundReason),
}

/// Plans with only what the sensor has seen, replanning after every move.
///
/// Each iteration senses from the current placement, plans over the
/// inflated discovered geometry and advances along the first segment of the
/// plan. Motion is clipped against the true inflated region, so the device
/// never passes through an obstacle it has not seen yet.
///
/// When a move is blocked the sensor turns toward the planned target, and a
/// narrow field of view then sweeps around the device. Only once every
/// direction has been sensed without discovery does an iteration count as
/// stalled.
#[derive(Debug)]
pub struct VisionPathFinder {
    method: Box<dyn FindMethod>,
    vision: Vision,
    roadmap: Option<SearchGraph>,
    max_iterations: usize,
    max_stalled_iterations: usize,
    iterations: usize,
    stalled: usize,
    goal: Option<Point>,
    /// Placement the last step moved the device to.
    expected: Option<Point>,
    last_direction: Option<Point>,
    next_heading: Option<f64>,
    /// Angle swept while blocked without discovering anything.
    swept: Option<f64>,
}

impl Default for VisionPathFinder {
    fn default() -> Self {
        Self::new(Box::new(Dijkstra), VisionConfig::default())
    }
}

impl VisionPathFinder {
    pub fn new(method: Box<dyn FindMethod>, config: VisionConfig) -> Self {
        Self {
            method,
            vision: Vision::new(config),
            roadmap: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_stalled_iterations: DEFAULT_MAX_STALLED_ITERATIONS,
            iterations: 0,
            stalled: 0,
            goal: None,
            expected: None,
            last_direction: None,
            next_heading: None,
            swept: None,
        }
    }

    /// Iteration budget per episode and how many iterations in a row may pass
    /// without movement or discovery.
    pub fn with_limits(mut self, max_iterations: usize, max_stalled_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self.max_stalled_iterations = max_stalled_iterations.max(1);
        self
    }

    pub fn method(&self) -> &dyn FindMethod {
        self.method.as_ref()
    }

    pub fn set_method(&mut self, method: Box<dyn FindMethod>) {
        self.method = method;
    }

    pub fn vision(&self) -> &Vision {
        &self.vision
    }

    /// Start a new episode: forget discovered geometry and counters.
    pub fn reset(&mut self) {
        self.vision.reset();
        self.roadmap = None;
        self.iterations = 0;
        self.stalled = 0;
        self.goal = None;
        self.expected = None;
        self.last_direction = None;
        self.next_heading = None;
        self.swept = None;
    }

    /// One sense-plan-advance iteration from `current` toward `goal`.
    ///
    /// A new goal, or a `current` other than where the previous step left
    /// the device, starts a new episode. The caller moves the device to the
    /// returned `to` before the next call.
    pub fn step(&mut self, space: &ConfigurationSpace, current: Point, goal: Point) -> VisionStep {
        let new_goal = self.goal.is_none_or(|g| g.distance(goal) > LENGTH_EPSILON);
        let relocated = self.expected.is_some_and(|e| e.distance(current) > LENGTH_EPSILON);
        if new_goal || relocated {
            self.reset();
            self.goal = Some(goal);
        }
        if current.distance(goal) <= LENGTH_EPSILON {
            return VisionStep::Arrived;
        }
        if let Err(reason) = check_endpoints(space, current, goal) {
            return VisionStep::NotFound(reason);
        }
        if self.iterations >= self.max_iterations {
            warn!(iterations = self.iterations, "iteration budget exhausted");
            return VisionStep::NotFound(NotFoundReason::NoProgress {
                iterations: self.iterations,
            });
        }
        self.iterations += 1;

        let heading = match self.next_heading.take() {
            Some(heading) => heading,
            None => heading_of(self.last_direction.unwrap_or(goal - current)),
        };
        self.vision.set_heading(heading);
        let report = self.vision.sense(current, space.obstacles());

        let known = self.vision.discovered().inflate(&space.effective_device());
        let graph = visibility_graph(&known, space.bounds(), current, goal);
        let plan = self
            .method
            .find_path(&graph, graph.start(), graph.goal())
            .map(|nodes| Path::new(graph.points(&nodes)));
        self.roadmap = Some(graph);
        let Some(plan) = plan else {
            return VisionStep::NotFound(NotFoundReason::Unreachable);
        };

        let target = plan.waypoints().get(1).copied().unwrap_or(goal);
        let to = match space.inflated_obstacles().first_contact(current, target) {
            Some(t) => current.lerp(target, t),
            None => target,
        };

        if current.distance(to) > LENGTH_EPSILON {
            self.last_direction = Some(to - current);
            self.swept = None;
            self.stalled = 0;
        } else if report.discovered_anything() {
            self.next_heading = Some(heading_of(target - current));
            self.swept = None;
            self.stalled = 0;
        } else if self.look_around(current, target) {
            warn!(iterations = self.iterations, "vision planning stalled");
            return VisionStep::NotFound(NotFoundReason::NoProgress {
                iterations: self.iterations,
            });
        }

        info!(
            iteration = self.iterations,
            from_x = current.x,
            from_y = current.y,
            to_x = to.x,
            to_y = to.y,
            "vision step"
        );
        self.expected = Some(to);
        VisionStep::Advanced {
            from: current,
            to,
            plan,
        }
    }

    /// Pick the next heading after a blocked move that revealed nothing.
    /// Returns whether the stall limit has been reached.
    fn look_around(&mut self, current: Point, target: Point) -> bool {
        let config = *self.vision.config();
        let fov = config.field_of_view.min(TAU);
        let covered = match self.swept {
            None if !config.is_full_circle() => {
                self.next_heading = Some(heading_of(target - current));
                self.swept = Some(0.0);
                return false;
            }
            None => TAU,
            Some(swept) => {
                self.next_heading = Some(self.vision.heading() + fov);
                swept + fov
            }
        };
        self.swept = Some(covered);
        if covered < TAU - ANGLE_EPSILON {
            debug!(swept = covered, "sweeping for the blocking obstacle");
            return false;
        }
        self.stalled += 1;
        self.stalled >= self.max_stalled_iterations
    }
}

fn heading_of(direction: Point) -> f64 {
    direction.y.atan2(direction.x)
}

impl PathFinder for VisionPathFinder {
    fn name(&self) -> &'static str {
        "vision"
    }

    /// Run a whole episode without touching `space`; the path is the
    /// sequence of placements the device would pass through.
    fn compute_path(
        &mut self,
        space: &ConfigurationSpace,
        start: Point,
        goal: Point,
    ) -> PlanOutcome {
        self.reset();
        if let Err(reason) = check_endpoints(space, start, goal) {
            return PlanOutcome::NotFound(reason);
        }

        let mut traveled = vec![start];
        let mut current = start;
        loop {
            match self.step(space, current, goal) {
                VisionStep::Arrived => {
                    let path = Path::new(traveled);
                    info!(
                        iterations = self.iterations,
                        waypoints = path.len(),
                        length = path.length(),
                        "vision path found"
                    );
                    return PlanOutcome::Found(path);
                }
                VisionStep::Advanced { to, .. } => {
                    if to.distance(current) > LENGTH_EPSILON {
                        traveled.push(to);
                    }
                    current = to;
                }
                VisionStep::NotFound(reason) => return PlanOutcome::NotFound(reason),
            }
        }
    }

    fn roadmap(&self) -> Option<&SearchGraph> {
        self.roadmap.as_ref()
    }

    fn discovered(&self) -> Option<&DiscoveredObstacles> {
        Some(self.vision.discovered())
    }

    fn iterations(&self) -> usize {
        self.iterations
    }
}
