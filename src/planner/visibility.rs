use tracing::debug;

use crate::geometry::PolygonSet;
use crate::search::SearchGraph;
use crate::types::{Bounds, LENGTH_EPSILON, Point};

/// Visibility graph over the vertices of `obstacles`.
///
/// Nodes are the start, the goal, then every obstacle vertex that is free and
/// inside `bounds`, in obstacle then vertex order with near-duplicates merged.
/// Two nodes are joined when the segment between them stays out of every
/// obstacle's interior; segments may run along obstacle boundaries.
pub fn visibility_graph(
    obstacles: &PolygonSet,
    bounds: Option<Bounds>,
    start: Point,
    goal: Point,
) -> SearchGraph {
    let mut graph = SearchGraph::new(start, goal);
    let mut nodes = vec![(graph.start(), start), (graph.goal(), goal)];

    for vertex in obstacles.vertices() {
        if bounds.is_some_and(|b| !b.contains(vertex))
            || obstacles.contains(vertex)
            || nodes.iter().any(|(_, p)| p.distance(vertex) <= LENGTH_EPSILON)
        {
            continue;
        }
        nodes.push((graph.add_waypoint(vertex), vertex));
    }

    for (i, (a, pa)) in nodes.iter().enumerate() {
        for (b, pb) in &nodes[i + 1..] {
            if obstacles.segment_clear(*pa, *pb) {
                graph.connect(*a, *b);
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built visibility graph"
    );
    graph
}
