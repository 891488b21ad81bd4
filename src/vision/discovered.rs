//! Obstacle geometry confirmed by the sensor so far.

use std::collections::BTreeMap;

use crate::cspace::ObstacleId;
use crate::geometry::minkowski::sweep_convex;
use crate::geometry::{Polygon, PolygonSet, decompose_convex};
use crate::types::{LENGTH_EPSILON, Point};

/// One obstacle edge and the parts of it that have been seen.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredEdge {
    start: Point,
    end: Point,
    /// Sorted, disjoint parameter ranges along the edge.
    intervals: Vec<(f64, f64)>,
}

impl DiscoveredEdge {
    fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            intervals: Vec::new(),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn intervals(&self) -> &[(f64, f64)] {
        &self.intervals
    }

    /// Visible pieces in workspace coordinates. A piece may be a single point.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.intervals
            .iter()
            .map(|(lo, hi)| (self.start.lerp(self.end, *lo), self.start.lerp(self.end, *hi)))
    }

    pub fn visible_length(&self) -> f64 {
        let len = self.start.distance(self.end);
        self.intervals.iter().map(|(lo, hi)| (hi - lo) * len).sum()
    }

    /// Union `[lo, hi]` into the visible ranges. Returns the newly covered length.
    fn insert(&mut self, lo: f64, hi: f64) -> f64 {
        let before = self.visible_length();
        let tol = LENGTH_EPSILON / self.start.distance(self.end).max(LENGTH_EPSILON);

        self.intervals.push((lo.min(hi).clamp(0.0, 1.0), hi.max(lo).clamp(0.0, 1.0)));
        self.intervals.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut merged: Vec<(f64, f64)> = Vec::with_capacity(self.intervals.len());
        for (lo, hi) in self.intervals.drain(..) {
            match merged.last_mut() {
                Some(last) if lo <= last.1 + tol => last.1 = last.1.max(hi),
                _ => merged.push((lo, hi)),
            }
        }
        self.intervals = merged;

        (self.visible_length() - before).max(0.0)
    }
}

/// Discovered knowledge, keyed by obstacle and edge index. Only grows until
/// [`DiscoveredObstacles::clear`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveredObstacles {
    edges: BTreeMap<(ObstacleId, usize), DiscoveredEdge>,
}

impl DiscoveredObstacles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = (ObstacleId, usize, &DiscoveredEdge)> + '_ {
        self.edges.iter().map(|((id, edge), e)| (*id, *edge, e))
    }

    pub fn knows_obstacle(&self, id: ObstacleId) -> bool {
        self.edges.keys().any(|(known, _)| *known == id)
    }

    /// Record a visible range of an edge. Returns the newly covered length
    /// and whether the edge had never been seen before.
    pub(crate) fn record(
        &mut self,
        obstacle: ObstacleId,
        edge: usize,
        start: Point,
        end: Point,
        lo: f64,
        hi: f64,
    ) -> (f64, bool) {
        let mut first_sighting = false;
        let entry = self.edges.entry((obstacle, edge)).or_insert_with(|| {
            first_sighting = true;
            DiscoveredEdge::new(start, end)
        });
        (entry.insert(lo, hi), first_sighting)
    }

    /// Every visible piece, for display.
    pub fn segments(&self) -> Vec<(Point, Point)> {
        self.edges.values().flat_map(|e| e.segments()).collect()
    }

    /// Obstacle vertices that have been seen.
    pub fn vertices(&self) -> Vec<Point> {
        let mut vertices: Vec<Point> = Vec::new();
        for edge in self.edges.values() {
            let tol = LENGTH_EPSILON / edge.start.distance(edge.end).max(LENGTH_EPSILON);
            for (lo, hi) in &edge.intervals {
                if *lo <= tol {
                    vertices.push(edge.start);
                }
                if *hi >= 1.0 - tol {
                    vertices.push(edge.end);
                }
            }
        }
        vertices.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        vertices.dedup_by(|a, b| a.distance(*b) <= LENGTH_EPSILON);
        vertices
    }

    pub fn total_length(&self) -> f64 {
        self.edges.values().map(DiscoveredEdge::visible_length).sum()
    }

    /// Forbidden region implied by what has been seen: every visible piece
    /// swept by the reflected device.
    pub fn inflate(&self, device: &Polygon) -> PolygonSet {
        let pieces = decompose_convex(&device.reflect());
        let mut region = PolygonSet::new();
        for (a, b) in self.edges.values().flat_map(|e| e.segments()) {
            for piece in &pieces {
                region.insert(sweep_convex(a, b, piece));
            }
        }
        region
    }
}
