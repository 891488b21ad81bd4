use petgraph::graph::NodeIndex;

use crate::search::{FindMethod, SearchGraph, best_first};

/// Best-first search guided by the straight-line distance to the goal.
/// Edge weights are Euclidean lengths, so the heuristic is consistent and
/// the result is as short as Dijkstra's.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl FindMethod for AStar {
    fn name(&self) -> &'static str {
        "a_star"
    }

    fn find_path(
        &self,
        graph: &SearchGraph,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Option<Vec<NodeIndex>> {
        if goal.index() >= graph.node_count() {
            return None;
        }
        let target = graph.position(goal);
        best_first(graph, start, goal, |n| graph.position(n).distance(target))
    }
}
