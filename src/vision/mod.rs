//! Simulated range sensor.
//!
//! Rays are spread evenly over the field of view, with one extra ray aimed
//! exactly at every obstacle vertex in view. Consecutive rays that hit the
//! same edge mark the piece of edge between their hits as visible; nothing can
//! hide in between, since any occluder would put a vertex (and so a ray) there.

mod discovered;

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use tracing::debug;

pub use discovered::{DiscoveredEdge, DiscoveredObstacles};

use crate::cspace::ObstacleId;
use crate::geometry::Polygon;
use crate::raycast::cast_ray;
use crate::types::{ANGLE_EPSILON, DEFAULT_RAY_COUNT, DEFAULT_SENSOR_RANGE, LENGTH_EPSILON, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisionConfig {
    /// Opening angle centred on the heading (radians, at most a full turn).
    pub field_of_view: f64,
    pub range: f64,
    /// Evenly spread rays per sensing pass, on top of the vertex rays.
    pub ray_count: usize,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            field_of_view: TAU,
            range: DEFAULT_SENSOR_RANGE,
            ray_count: DEFAULT_RAY_COUNT,
        }
    }
}

impl VisionConfig {
    pub fn is_full_circle(&self) -> bool {
        self.field_of_view >= TAU - ANGLE_EPSILON
    }
}

/// Outcome of one sensing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SenseReport {
    pub rays: usize,
    pub hits: usize,
    /// Edges seen for the first time.
    pub new_edges: usize,
    pub newly_discovered_length: f64,
}

impl SenseReport {
    pub fn discovered_anything(&self) -> bool {
        self.new_edges > 0 || self.newly_discovered_length > LENGTH_EPSILON
    }
}

#[derive(Debug, Clone)]
pub struct Vision {
    config: VisionConfig,
    heading: f64,
    discovered: DiscoveredObstacles,
}

impl Vision {
    pub fn new(config: VisionConfig) -> Self {
        Self {
            config,
            heading: 0.0,
            discovered: DiscoveredObstacles::new(),
        }
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Direction the field of view is centred on (radians).
    pub fn set_heading(&mut self, heading: f64) {
        self.heading = heading.rem_euclid(TAU);
    }

    pub fn discovered(&self) -> &DiscoveredObstacles {
        &self.discovered
    }

    /// Forget everything; called at the start of each planning episode.
    pub fn reset(&mut self) {
        self.discovered.clear();
        self.heading = 0.0;
    }

    /// Sense from `origin` and union what is visible into the discovered
    /// knowledge.
    pub fn sense<'a>(
        &mut self,
        origin: Point,
        obstacles: impl IntoIterator<Item = (ObstacleId, &'a Polygon)>,
    ) -> SenseReport {
        let obstacles: Vec<(ObstacleId, &Polygon)> = obstacles.into_iter().collect();
        let angles = self.ray_angles(origin, &obstacles);

        // A full circle closes on itself: the first ray is cast again at the
        // end so runs crossing the seam are continued.
        let closing = self.config.is_full_circle().then(|| angles.first().copied()).flatten();

        let mut report = SenseReport {
            rays: angles.len(),
            ..SenseReport::default()
        };
        let mut open: BTreeMap<(ObstacleId, usize), (f64, f64)> = BTreeMap::new();
        let mut runs: Vec<((ObstacleId, usize), (f64, f64))> = Vec::new();
        for angle in angles.iter().copied().chain(closing) {
            let direction = Point::from_angle(angle);
            let hits = cast_ray(origin, direction, self.config.range, obstacles.iter().copied());
            report.hits += hits.len();

            open.retain(|key, run| {
                let continued = hits.iter().any(|h| (h.obstacle, h.edge) == *key);
                if !continued {
                    runs.push((*key, *run));
                }
                continued
            });
            for hit in &hits {
                let u = hit.edge_param;
                open.entry((hit.obstacle, hit.edge))
                    .and_modify(|run| *run = (run.0.min(u), run.1.max(u)))
                    .or_insert((u, u));
            }
        }
        runs.extend(open);

        for ((id, edge), (lo, hi)) in runs {
            let Some((_, polygon)) = obstacles.iter().find(|(known, _)| *known == id) else {
                continue;
            };
            let (added, first) =
                self.discovered
                    .record(id, edge, polygon.vertex(edge), polygon.vertex(edge + 1), lo, hi);
            report.newly_discovered_length += added;
            if first {
                report.new_edges += 1;
            }
        }

        debug!(
            x = origin.x,
            y = origin.y,
            rays = report.rays,
            hits = report.hits,
            new_edges = report.new_edges,
            "sensing pass"
        );
        report
    }

    /// Ray directions in sweep order.
    fn ray_angles(&self, origin: Point, obstacles: &[(ObstacleId, &Polygon)]) -> Vec<f64> {
        let full = self.config.is_full_circle();
        let fov = self.config.field_of_view.min(TAU);
        let start = if full { self.heading } else { self.heading - 0.5 * fov };
        let n = self.config.ray_count.max(2);
        let step = if full { TAU / n as f64 } else { fov / (n - 1) as f64 };

        let mut offsets: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
        for (_, polygon) in obstacles {
            for v in polygon.points() {
                let rel = *v - origin;
                let dist = rel.length();
                if dist <= LENGTH_EPSILON || dist > self.config.range + LENGTH_EPSILON {
                    continue;
                }
                let offset = (rel.y.atan2(rel.x) - start).rem_euclid(TAU);
                if full || offset <= fov + ANGLE_EPSILON {
                    offsets.push(offset);
                }
            }
        }
        offsets.sort_by(f64::total_cmp);
        offsets.dedup_by(|a, b| (*a - *b).abs() <= ANGLE_EPSILON);
        offsets.into_iter().map(|o| start + o).collect()
    }
}
