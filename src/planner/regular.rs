use tracing::info;

use crate::cspace::ConfigurationSpace;
use crate::planner::{
    NotFoundReason, Path, PathFinder, PlanOutcome, check_endpoints, visibility_graph,
};
use crate::search::{Dijkstra, FindMethod, SearchGraph};
use crate::types::{LENGTH_EPSILON, Point};

/// Plans with complete knowledge of every obstacle: one visibility graph
/// over the inflated region, one search.
#[derive(Debug)]
pub struct RegularPathFinder {
    method: Box<dyn FindMethod>,
    roadmap: Option<SearchGraph>,
    iterations: usize,
}

impl Default for RegularPathFinder {
    fn default() -> Self {
        Self::new(Box::new(Dijkstra))
    }
}

impl RegularPathFinder {
    pub fn new(method: Box<dyn FindMethod>) -> Self {
        Self {
            method,
            roadmap: None,
            iterations: 0,
        }
    }

    pub fn method(&self) -> &dyn FindMethod {
        self.method.as_ref()
    }

    pub fn set_method(&mut self, method: Box<dyn FindMethod>) {
        self.method = method;
    }
}

impl PathFinder for RegularPathFinder {
    fn name(&self) -> &'static str {
        "regular"
    }

    fn compute_path(
        &mut self,
        space: &ConfigurationSpace,
        start: Point,
        goal: Point,
    ) -> PlanOutcome {
        self.roadmap = None;
        self.iterations = 0;
        if let Err(reason) = check_endpoints(space, start, goal) {
            return PlanOutcome::NotFound(reason);
        }
        if start.distance(goal) <= LENGTH_EPSILON {
            return PlanOutcome::Found(Path::new(vec![start]));
        }

        let graph = visibility_graph(space.inflated_obstacles(), space.bounds(), start, goal);
        self.iterations = 1;
        let outcome = match self.method.find_path(&graph, graph.start(), graph.goal()) {
            Some(nodes) => {
                let path = Path::new(graph.points(&nodes));
                info!(
                    method = self.method.name(),
                    waypoints = path.len(),
                    length = path.length(),
                    "path found"
                );
                PlanOutcome::Found(path)
            }
            None => PlanOutcome::NotFound(NotFoundReason::Unreachable),
        };
        self.roadmap = Some(graph);
        outcome
    }

    fn roadmap(&self) -> Option<&SearchGraph> {
        self.roadmap.as_ref()
    }

    fn iterations(&self) -> usize {
        self.iterations
    }
}
