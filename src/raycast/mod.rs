//! Ray casting against polygon edges.

use crate::cspace::ObstacleId;
use crate::geometry::Polygon;
use crate::geometry::predicates::ray_segment_hit;
use crate::types::{LENGTH_EPSILON, Point};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayHit {
    pub obstacle: ObstacleId,
    /// Edge `i` runs from vertex `i` to vertex `i + 1`.
    pub edge: usize,
    /// Position of the hit along the edge, in `[0, 1]`.
    pub edge_param: f64,
    /// Distance from the ray origin (world units).
    pub distance: f64,
}

impl RayHit {
    /// Distance of the nearest hit, or `default` on a miss.
    pub fn distance_or(hits: &[Self], default: f64) -> f64 {
        hits.first().map(|h| h.distance).unwrap_or(default)
    }
}

/// Cast a ray and return every edge hit at the nearest distance within
/// `max_range`, ordered by obstacle then edge.
///
/// Several hits are returned when the ray meets a shared vertex or several
/// edges at the same distance. A ray that grazes a vertex hits it.
pub fn cast_ray<'a>(
    origin: Point,
    dir: Point,
    max_range: f64,
    obstacles: impl IntoIterator<Item = (ObstacleId, &'a Polygon)>,
) -> Vec<RayHit> {
    let Some(dir) = dir.try_normalize() else {
        return Vec::new();
    };

    let mut hits: Vec<RayHit> = Vec::new();
    for (obstacle, polygon) in obstacles {
        for (edge, (a, b)) in polygon.edges().enumerate() {
            if let Some((distance, edge_param)) = ray_segment_hit(origin, dir, a, b)
                && distance <= max_range + LENGTH_EPSILON
            {
                hits.push(RayHit {
                    obstacle,
                    edge,
                    edge_param,
                    distance,
                });
            }
        }
    }
    let nearest = hits.iter().map(|h| h.distance).fold(f64::INFINITY, f64::min);
    hits.retain(|h| h.distance <= nearest + LENGTH_EPSILON);
    hits.sort_by(|a, b| (a.obstacle, a.edge).cmp(&(b.obstacle, b.edge)));
    hits
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::cspace::ConfigurationSpace;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn space(boxes: &[(f64, f64)]) -> ConfigurationSpace {
        let mut space = ConfigurationSpace::new(Polygon::square(1.0).unwrap());
        for (x, y) in boxes {
            space.add_obstacle(Polygon::square(2.0).unwrap().translate(p(*x, *y)));
        }
        space
    }

    #[test]
    fn nearest_edge_occludes_farther_ones() {
        let space = space(&[(10.0, 0.0), (4.0, 0.0)]);
        let hits = cast_ray(p(0.0, 0.0), p(1.0, 0.0), 100.0, space.obstacles());
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].distance, 3.0, epsilon = 1e-12);
        assert_eq!(Some(hits[0].obstacle), space.obstacles().nth(1).map(|(id, _)| id));
        assert_relative_eq!(RayHit::distance_or(&hits, 100.0), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn out_of_range_is_a_miss() {
        let space = space(&[(10.0, 0.0)]);
        let hits = cast_ray(p(0.0, 0.0), p(1.0, 0.0), 5.0, space.obstacles());
        assert!(hits.is_empty());
        assert_eq!(RayHit::distance_or(&hits, 5.0), 5.0);
    }

    #[test]
    fn corner_hit_reports_both_edges() {
        let space = space(&[(5.0, 5.0)]);
        // Straight at the lower-left corner (4, 4).
        let hits = cast_ray(p(0.0, 0.0), p(1.0, 1.0), 100.0, space.obstacles());
        assert_eq!(hits.len(), 2);
        let edges: Vec<usize> = hits.iter().map(|h| h.edge).collect();
        assert_eq!(edges, vec![0, 3]);
        assert_relative_eq!(hits[0].distance, 32f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn zero_direction_hits_nothing() {
        let space = space(&[(1.0, 0.0)]);
        assert!(cast_ray(p(0.0, 0.0), Point::ZERO, 10.0, space.obstacles()).is_empty());
    }
}
