//! Configuration space of a translating polygonal device.
//!
//! The space owns the device shape, its placement and the obstacles. The
//! inflated-obstacle region (every obstacle summed with the reflected device)
//! is derived lazily and cached; every geometry mutator goes through
//! [`ConfigurationSpace::invalidate`], so the cache can never be read stale.

use std::cell::{Cell, OnceCell};
use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::geometry::{Polygon, PolygonSet, inflate};
use crate::types::{Bounds, GeometryError, Point, Pose2};

/// Handle of an obstacle inside a [`ConfigurationSpace`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObstacleId(u64);

impl ObstacleId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obstacle #{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigurationSpace {
    device: Polygon,
    placement: Pose2,
    obstacles: BTreeMap<ObstacleId, Polygon>,
    next_id: u64,
    bounds: Option<Bounds>,
    inflated: OnceCell<PolygonSet>,
    recomputes: Cell<usize>,
}

impl ConfigurationSpace {
    /// Empty, unbounded space with the device at the origin.
    pub fn new(device: Polygon) -> Self {
        Self {
            device,
            placement: Pose2::default(),
            obstacles: BTreeMap::new(),
            next_id: 0,
            bounds: None,
            inflated: OnceCell::new(),
            recomputes: Cell::new(0),
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Bounds restrict the reference point only; the inflated region is unaffected.
    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    /// Device shape relative to its reference point, before rotation.
    pub fn device(&self) -> &Polygon {
        &self.device
    }

    /// Device shape rotated by the placement yaw, still reference-point relative.
    pub fn effective_device(&self) -> Polygon {
        if self.placement.yaw == 0.0 {
            self.device.clone()
        } else {
            self.device.rotate(self.placement.yaw)
        }
    }

    /// Device outline in workspace coordinates at the current placement.
    pub fn device_outline(&self) -> Polygon {
        self.device.transform(&self.placement)
    }

    pub fn set_device(&mut self, device: Polygon) {
        self.device = device;
        self.invalidate();
    }

    /// Validate `points` and replace the device; on error nothing changes.
    pub fn try_set_device(&mut self, points: Vec<Point>) -> Result<(), GeometryError> {
        let device = Polygon::new(points)?;
        self.set_device(device);
        Ok(())
    }

    pub fn placement(&self) -> Pose2 {
        self.placement
    }

    /// Move the device. A change of yaw changes the effective device shape
    /// and drops the cached region; a pure translation keeps it.
    pub fn set_placement(&mut self, placement: Pose2) {
        let rotated = placement.yaw != self.placement.yaw;
        self.placement = placement;
        if rotated {
            self.invalidate();
        }
    }

    pub fn set_position(&mut self, position: Point) {
        self.placement.position = position;
    }

    pub fn obstacles(&self) -> impl Iterator<Item = (ObstacleId, &Polygon)> + '_ {
        self.obstacles.iter().map(|(id, p)| (*id, p))
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Polygon> {
        self.obstacles.get(&id)
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Obstacles as a plain set, in id order.
    pub fn obstacle_set(&self) -> PolygonSet {
        self.obstacles.values().cloned().collect()
    }

    /// Add an obstacle. Adding a polygon equal to an existing obstacle
    /// returns that obstacle's id and leaves the space unchanged.
    pub fn add_obstacle(&mut self, obstacle: Polygon) -> ObstacleId {
        if let Some((id, _)) = self.obstacles.iter().find(|(_, p)| **p == obstacle) {
            return *id;
        }
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        self.obstacles.insert(id, obstacle);
        self.invalidate();
        id
    }

    /// Validate `points` and add them as an obstacle; on error nothing changes.
    pub fn try_add_obstacle(&mut self, points: Vec<Point>) -> Result<ObstacleId, GeometryError> {
        let obstacle = Polygon::new(points)?;
        Ok(self.add_obstacle(obstacle))
    }

    pub fn remove_obstacle(&mut self, id: ObstacleId) -> Option<Polygon> {
        let removed = self.obstacles.remove(&id);
        if removed.is_some() {
            self.invalidate();
        }
        removed
    }

    /// Replace the whole obstacle set. Returns the new ids in set order.
    pub fn set_obstacles(&mut self, obstacles: PolygonSet) -> Vec<ObstacleId> {
        self.obstacles.clear();
        self.invalidate();
        obstacles.into_iter().map(|p| self.add_obstacle(p)).collect()
    }

    /// Validate every outline first, then replace the obstacle set. A single
    /// malformed outline leaves the space unchanged.
    pub fn try_set_obstacles(
        &mut self,
        outlines: Vec<Vec<Point>>,
    ) -> Result<Vec<ObstacleId>, GeometryError> {
        let polygons = outlines
            .into_iter()
            .map(Polygon::new)
            .collect::<Result<PolygonSet, _>>()?;
        Ok(self.set_obstacles(polygons))
    }

    pub fn clear_obstacles(&mut self) {
        if !self.obstacles.is_empty() {
            self.obstacles.clear();
            self.invalidate();
        }
    }

    /// Forbidden reference-point region for the current device shape and
    /// obstacles. Recomputed only after a geometry change.
    pub fn inflated_obstacles(&self) -> &PolygonSet {
        self.inflated.get_or_init(|| {
            self.recomputes.set(self.recomputes.get() + 1);
            self.compute_inflated()
        })
    }

    /// How many times the inflated region has been rebuilt.
    pub fn recompute_count(&self) -> usize {
        self.recomputes.get()
    }

    /// Inside the bounds (if any) and outside every inflated obstacle.
    /// Touching an inflated obstacle is free.
    pub fn is_placement_free(&self, pt: Point) -> bool {
        self.bounds.is_none_or(|b| b.contains(pt)) && !self.inflated_obstacles().contains(pt)
    }

    pub fn is_current_placement_free(&self) -> bool {
        self.is_placement_free(self.placement.position)
    }

    /// Whether the device outline at the current placement overlaps an obstacle.
    pub fn device_collides(&self) -> bool {
        let outline = self.device_outline();
        self.obstacles.values().any(|o| o.intersects(&outline))
    }

    fn invalidate(&mut self) {
        self.inflated.take();
    }

    fn compute_inflated(&self) -> PolygonSet {
        let device = self.effective_device();
        let mut region = PolygonSet::new();
        for obstacle in self.obstacles.values() {
            region.extend(inflate(obstacle, &device));
        }
        debug!(
            obstacles = self.obstacles.len(),
            pieces = region.len(),
            "recomputed inflated obstacles"
        );
        region
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn space_with_box() -> (ConfigurationSpace, ObstacleId) {
        let mut space = ConfigurationSpace::new(Polygon::square(1.0).unwrap());
        let id = space.add_obstacle(Polygon::square(2.0).unwrap().translate(p(4.5, 4.5)));
        (space, id)
    }

    #[test]
    fn inflated_region_is_cached() {
        let (space, _) = space_with_box();
        assert_eq!(space.recompute_count(), 0);
        let first = space.inflated_obstacles().clone();
        let second = space.inflated_obstacles().clone();
        assert_eq!(first, second);
        assert_eq!(space.recompute_count(), 1);
    }

    #[test]
    fn geometry_changes_invalidate_but_translation_does_not() {
        let (mut space, id) = space_with_box();
        space.inflated_obstacles();
        space.set_position(p(1.0, 1.0));
        space.set_placement(Pose2::at(p(2.0, 0.0)));
        space.inflated_obstacles();
        assert_eq!(space.recompute_count(), 1);

        space.remove_obstacle(id);
        assert!(space.inflated_obstacles().is_empty());
        assert_eq!(space.recompute_count(), 2);

        space.add_obstacle(Polygon::square(1.0).unwrap());
        space.inflated_obstacles();
        space.set_device(Polygon::square(2.0).unwrap());
        space.inflated_obstacles();
        assert_eq!(space.recompute_count(), 4);

        space.set_placement(Pose2::new(p(2.0, 0.0), FRAC_PI_2));
        space.inflated_obstacles();
        assert_eq!(space.recompute_count(), 5);
    }

    #[test]
    fn placement_freedom_follows_inflated_region() {
        let (space, _) = space_with_box();
        // Inflated box spans [3, 6] x [3, 6].
        assert!(space.is_placement_free(p(0.0, 0.0)));
        assert!(space.is_placement_free(p(3.0, 4.0)));
        assert!(!space.is_placement_free(p(3.1, 4.0)));
        assert!(!space.is_placement_free(p(5.9, 5.9)));
        assert!(space.is_current_placement_free());
        assert!(!space.device_collides());
    }

    #[test]
    fn bounds_limit_the_reference_point() {
        let (space, _) = space_with_box();
        let space = space.with_bounds(Bounds::from_size(10.0, 10.0));
        assert!(space.is_placement_free(p(0.0, 0.0)));
        assert!(space.is_placement_free(p(10.0, 2.0)));
        assert!(!space.is_placement_free(p(-0.5, 2.0)));
    }

    #[test]
    fn malformed_input_leaves_state_unchanged() {
        let (mut space, id) = space_with_box();
        let before = space.inflated_obstacles().clone();
        let err = space
            .try_set_obstacles(vec![
                vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)],
                vec![p(0.0, 0.0), p(1.0, 1.0)],
            ])
            .unwrap_err();
        assert_eq!(err, GeometryError::TooFewVertices { count: 2 });
        assert!(space.try_set_device(vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]).is_err());
        assert!(
            space
                .try_add_obstacle(vec![p(0.0, 0.0), p(2.0, 2.0), p(2.0, 0.0), p(0.0, 3.0)])
                .is_err()
        );

        assert_eq!(space.obstacle_count(), 1);
        assert!(space.obstacle(id).is_some());
        assert_eq!(space.inflated_obstacles(), &before);
        assert_eq!(space.recompute_count(), 1);
    }

    #[test]
    fn duplicate_obstacle_keeps_its_id() {
        let (mut space, id) = space_with_box();
        let again = space.add_obstacle(Polygon::square(2.0).unwrap().translate(p(4.5, 4.5)));
        assert_eq!(again, id);
        assert_eq!(space.obstacle_count(), 1);

        let ids = space.set_obstacles(PolygonSet::from_polygons([
            Polygon::square(1.0).unwrap(),
            Polygon::square(1.0).unwrap().translate(p(3.0, 0.0)),
        ]));
        assert_eq!(ids.len(), 2);
        assert!(ids.iter().all(|new| *new != id));
    }

    #[test]
    fn overlapping_device_is_not_free() {
        let (mut space, _) = space_with_box();
        space.set_position(p(4.0, 4.0));
        assert!(space.device_collides());
        assert!(!space.is_current_placement_free());
    }
}
