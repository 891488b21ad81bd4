use petgraph::graph::NodeIndex;

use crate::search::{FindMethod, SearchGraph, best_first};

/// Uniform-cost shortest path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl FindMethod for Dijkstra {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn find_path(
        &self,
        graph: &SearchGraph,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Option<Vec<NodeIndex>> {
        best_first(graph, start, goal, |_| 0.0)
    }
}
