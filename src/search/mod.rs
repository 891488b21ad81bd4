//! Pluggable graph search over waypoint graphs.
//!
//! Path finders hold a `Box<dyn FindMethod>` and never depend on a concrete
//! algorithm. Both strategies here share one best-first loop and break ties
//! the same way, so equal inputs always give equal paths:
//! - the open queue is ordered by `(priority, node index)`;
//! - a node's predecessor changes on a strictly shorter cost, or on an equal
//!   cost (within [`LENGTH_EPSILON`]) from a predecessor with a smaller index.

mod astar;
mod dijkstra;
mod graph;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use ordered_float::OrderedFloat;
use petgraph::graph::NodeIndex;
use serde::Deserialize;

pub use astar::AStar;
pub use dijkstra::Dijkstra;
pub use graph::SearchGraph;

use crate::types::LENGTH_EPSILON;

pub trait FindMethod: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Node sequence from `start` to `goal`, both included, or `None` when
    /// the goal cannot be reached.
    fn find_path(
        &self,
        graph: &SearchGraph,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Option<Vec<NodeIndex>>;
}

/// Strategy selector used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindMethodKind {
    #[default]
    Dijkstra,
    AStar,
}

impl FindMethodKind {
    pub fn build(self) -> Box<dyn FindMethod> {
        match self {
            Self::Dijkstra => Box::new(Dijkstra),
            Self::AStar => Box::new(AStar),
        }
    }
}

impl fmt::Display for FindMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dijkstra => write!(f, "dijkstra"),
            Self::AStar => write!(f, "a_star"),
        }
    }
}

/// Best-first search with a consistent `heuristic` (zero gives Dijkstra).
fn best_first(
    graph: &SearchGraph,
    start: NodeIndex,
    goal: NodeIndex,
    heuristic: impl Fn(NodeIndex) -> f64,
) -> Option<Vec<NodeIndex>> {
    let n = graph.node_count();
    if start.index() >= n || goal.index() >= n {
        return None;
    }

    let mut cost = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<NodeIndex>> = vec![None; n];
    let mut closed = vec![false; n];
    let mut open = BinaryHeap::new();

    cost[start.index()] = 0.0;
    open.push(Reverse((OrderedFloat(heuristic(start)), start.index())));

    while let Some(Reverse((_, index))) = open.pop() {
        if closed[index] {
            continue;
        }
        closed[index] = true;
        let node = NodeIndex::new(index);
        if node == goal {
            return Some(reconstruct(&parent, goal));
        }

        for (next, length) in graph.neighbors(node) {
            let j = next.index();
            if closed[j] {
                continue;
            }
            let candidate = cost[index] + length;
            let shorter = candidate < cost[j] - LENGTH_EPSILON;
            let tie = (candidate - cost[j]).abs() <= LENGTH_EPSILON
                && parent[j].is_some_and(|p| index < p.index());
            if shorter || tie {
                cost[j] = cost[j].min(candidate);
                parent[j] = Some(node);
                open.push(Reverse((OrderedFloat(cost[j] + heuristic(next)), j)));
            }
        }
    }
    None
}

fn reconstruct(parent: &[Option<NodeIndex>], goal: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = parent[current.index()] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn strategies() -> Vec<Box<dyn FindMethod>> {
        vec![FindMethodKind::Dijkstra.build(), FindMethodKind::AStar.build()]
    }

    /// Start (0,0), goal (2,2) and two equally short detours.
    fn diamond(first: Point, second: Point) -> SearchGraph {
        let mut graph = SearchGraph::new(p(0.0, 0.0), p(2.0, 2.0));
        let a = graph.add_waypoint(first);
        let b = graph.add_waypoint(second);
        for via in [a, b] {
            graph.connect(graph.start(), via);
            graph.connect(via, graph.goal());
        }
        graph
    }

    #[test]
    fn equal_paths_prefer_smaller_node_index() {
        for method in strategies() {
            let graph = diamond(p(2.0, 0.0), p(0.0, 2.0));
            let path = method.find_path(&graph, graph.start(), graph.goal()).unwrap();
            assert_eq!(graph.points(&path), vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0)]);

            let graph = diamond(p(0.0, 2.0), p(2.0, 0.0));
            let path = method.find_path(&graph, graph.start(), graph.goal()).unwrap();
            assert_eq!(
                graph.points(&path),
                vec![p(0.0, 0.0), p(0.0, 2.0), p(2.0, 2.0)],
                "{}",
                method.name()
            );
        }
    }

    #[test]
    fn shortest_detour_wins() {
        for method in strategies() {
            let mut graph = SearchGraph::new(p(0.0, 0.0), p(10.0, 0.0));
            let far = graph.add_waypoint(p(5.0, 6.0));
            let near = graph.add_waypoint(p(5.0, 1.0));
            let (s, g) = (graph.start(), graph.goal());
            graph.connect(s, far);
            graph.connect(far, g);
            graph.connect(s, near);
            graph.connect(near, g);
            let path = method.find_path(&graph, s, g).unwrap();
            assert_eq!(path, vec![s, near, g], "{}", method.name());
        }
    }

    #[test]
    fn disconnected_goal_is_not_found() {
        for method in strategies() {
            let mut graph = SearchGraph::new(p(0.0, 0.0), p(10.0, 0.0));
            let w = graph.add_waypoint(p(5.0, 5.0));
            graph.connect(graph.start(), w);
            assert!(method.find_path(&graph, graph.start(), graph.goal()).is_none());
        }
    }

    #[test]
    fn start_equal_to_goal_is_single_node() {
        for method in strategies() {
            let graph = SearchGraph::new(p(1.0, 1.0), p(2.0, 2.0));
            let path = method.find_path(&graph, graph.start(), graph.start()).unwrap();
            assert_eq!(path, vec![graph.start()]);
        }
    }

    #[test]
    fn strategies_agree_on_a_grid() {
        let mut graph = SearchGraph::new(p(0.0, 0.0), p(4.0, 3.0));
        let mut nodes = vec![graph.start()];
        for i in 0..5 {
            for j in 0..4 {
                if (i, j) != (0, 0) && (i, j) != (4, 3) {
                    nodes.push(graph.add_waypoint(p(i as f64, j as f64)));
                }
            }
        }
        nodes.push(graph.goal());
        for a in &nodes {
            for b in &nodes {
                if a < b && graph.position(*a).distance(graph.position(*b)) <= 1.5 {
                    graph.connect(*a, *b);
                }
            }
        }
        let length = |path: &[NodeIndex]| -> f64 {
            graph.points(path).windows(2).map(|w| w[0].distance(w[1])).sum()
        };
        let d = Dijkstra.find_path(&graph, graph.start(), graph.goal()).unwrap();
        let a = AStar.find_path(&graph, graph.start(), graph.goal()).unwrap();
        assert!((length(&d) - length(&a)).abs() < 1e-9);
        assert!((length(&d) - (3.0 * 2f64.sqrt() + 1.0)).abs() < 1e-9);
        assert_eq!(FindMethodKind::AStar.to_string(), "a_star");
    }
}
