use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::types::Point;

/// Waypoint graph searched by a [`FindMethod`](crate::search::FindMethod).
///
/// Nodes carry reference-point positions and edges their Euclidean length.
/// The start and goal are always nodes 0 and 1.
#[derive(Debug, Clone)]
pub struct SearchGraph {
    graph: UnGraph<Point, f64>,
    start: NodeIndex,
    goal: NodeIndex,
}

impl SearchGraph {
    pub fn new(start: Point, goal: Point) -> Self {
        let mut graph = UnGraph::new_undirected();
        let start = graph.add_node(start);
        let goal = graph.add_node(goal);
        Self { graph, start, goal }
    }

    pub fn add_waypoint(&mut self, position: Point) -> NodeIndex {
        self.graph.add_node(position)
    }

    /// Connect two nodes with an edge weighted by their distance.
    pub fn connect(&mut self, a: NodeIndex, b: NodeIndex) -> EdgeIndex {
        let weight = self.graph[a].distance(self.graph[b]);
        self.graph.add_edge(a, b, weight)
    }

    pub fn start(&self) -> NodeIndex {
        self.start
    }

    pub fn goal(&self) -> NodeIndex {
        self.goal
    }

    pub fn position(&self, node: NodeIndex) -> Point {
        self.graph[node]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn graph(&self) -> &UnGraph<Point, f64> {
        &self.graph
    }

    /// `(neighbour, length)` pairs of `node`.
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph.edges(node).map(move |e| {
            let other = if e.source() == node { e.target() } else { e.source() };
            (other, *e.weight())
        })
    }

    /// Edges as segments, for drawing the roadmap.
    pub fn segments(&self) -> Vec<(Point, Point)> {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()], self.graph[e.target()]))
            .collect()
    }

    pub fn points(&self, nodes: &[NodeIndex]) -> Vec<Point> {
        nodes.iter().map(|n| self.graph[*n]).collect()
    }
}
