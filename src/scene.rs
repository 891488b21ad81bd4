//! Caller-owned planning context.
//!
//! A [`Scene`] bundles the configuration space with both path finders and
//! the switches an editing shell flips: sensor use, find method and whether
//! the device may be moved. It is what the shell talks to; nothing here is
//! global.

use tracing::info;

use crate::config::PlannerConfig;
use crate::cspace::{ConfigurationSpace, ObstacleId};
use crate::geometry::{Polygon, PolygonSet};
use crate::planner::{
    Path, PathFinder, PathInfo, PlanOutcome, RegularPathFinder, VisionPathFinder, VisionStep,
};
use crate::search::FindMethodKind;
use crate::types::{DEFAULT_DEVICE_SIDE, MotionError, Point, Pose2};
use crate::vision::DiscoveredObstacles;

#[derive(Debug)]
pub struct Scene {
    config: PlannerConfig,
    space: ConfigurationSpace,
    find_method: FindMethodKind,
    use_sensors: bool,
    device_movable: bool,
    regular: RegularPathFinder,
    vision: VisionPathFinder,
}

impl Scene {
    /// Empty scene with the default square device at the origin.
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_device(config, Self::default_device())
    }

    pub fn with_device(config: PlannerConfig, device: Polygon) -> Self {
        let space = Self::empty_space(&config, device);
        Self {
            find_method: config.find_method,
            use_sensors: config.use_sensors,
            device_movable: true,
            regular: RegularPathFinder::new(config.find_method.build()),
            vision: Self::vision_finder(&config, config.find_method),
            space,
            config,
        }
    }

    /// Square of side [`DEFAULT_DEVICE_SIDE`] centred on its reference point.
    pub fn default_device() -> Polygon {
        let h = 0.5 * DEFAULT_DEVICE_SIDE;
        Polygon::from_ccw_unchecked(vec![
            Point::new(-h, -h),
            Point::new(h, -h),
            Point::new(h, h),
            Point::new(-h, h),
        ])
    }

    /// Drop every obstacle, the placement and all planning state, keeping
    /// the switches.
    pub fn reset(&mut self, device: Polygon) {
        self.space = Self::empty_space(&self.config, device);
        self.regular = RegularPathFinder::new(self.find_method.build());
        self.vision = Self::vision_finder(&self.config, self.find_method);
        info!("scene reset");
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn space(&self) -> &ConfigurationSpace {
        &self.space
    }

    // Geometry edits end the running vision episode.

    pub fn add_obstacle(&mut self, obstacle: Polygon) -> ObstacleId {
        self.vision.reset();
        self.space.add_obstacle(obstacle)
    }

    pub fn try_add_obstacle(&mut self, points: Vec<Point>) -> Result<ObstacleId, MotionError> {
        let id = self.space.try_add_obstacle(points)?;
        self.vision.reset();
        Ok(id)
    }

    pub fn remove_obstacle(&mut self, id: ObstacleId) -> Option<Polygon> {
        self.vision.reset();
        self.space.remove_obstacle(id)
    }

    pub fn set_obstacles(&mut self, obstacles: PolygonSet) -> Vec<ObstacleId> {
        self.vision.reset();
        self.space.set_obstacles(obstacles)
    }

    pub fn obstacles(&self) -> impl Iterator<Item = (ObstacleId, &Polygon)> + '_ {
        self.space.obstacles()
    }

    pub fn reshape_device(&mut self, device: Polygon) {
        self.vision.reset();
        self.space.set_device(device);
    }

    pub fn device_polygon(&self) -> &Polygon {
        self.space.device()
    }

    pub fn device_outline(&self) -> Polygon {
        self.space.device_outline()
    }

    pub fn device_position(&self) -> Point {
        self.space.placement().position
    }

    pub fn set_device_position(&mut self, position: Point) -> Result<(), MotionError> {
        if !self.device_movable {
            return Err(MotionError::DeviceLocked);
        }
        self.space.set_position(position);
        Ok(())
    }

    /// Rotate the device in place; the inflated region follows the new shape.
    pub fn set_device_yaw(&mut self, yaw: f64) -> Result<(), MotionError> {
        if !self.device_movable {
            return Err(MotionError::DeviceLocked);
        }
        let position = self.device_position();
        self.vision.reset();
        self.space.set_placement(Pose2::new(position, yaw));
        Ok(())
    }

    /// Jump the device to the end of `path`. An empty path leaves it in place.
    pub fn move_device(&mut self, path: &Path) -> Result<(), MotionError> {
        match path.goal() {
            Some(goal) => self.set_device_position(goal),
            None => Ok(()),
        }
    }

    pub fn set_device_movable(&mut self, movable: bool) {
        self.device_movable = movable;
    }

    pub fn is_device_movable(&self) -> bool {
        self.device_movable
    }

    pub fn use_sensors(&mut self, enabled: bool) {
        self.use_sensors = enabled;
    }

    pub fn uses_sensors(&self) -> bool {
        self.use_sensors
    }

    pub fn set_find_method(&mut self, kind: FindMethodKind) {
        self.find_method = kind;
        self.regular.set_method(kind.build());
        self.vision.set_method(kind.build());
    }

    pub fn find_method(&self) -> FindMethodKind {
        self.find_method
    }

    /// Plan from the current placement to `goal` with the active finder.
    pub fn request_path(&mut self, goal: Point) -> PlanOutcome {
        let start = self.device_position();
        let finder: &mut dyn PathFinder = if self.use_sensors {
            &mut self.vision
        } else {
            &mut self.regular
        };
        finder.compute_path(&self.space, start, goal)
    }

    /// One sense-plan-advance iteration from the current placement. The
    /// caller animates the move and reports the new placement with
    /// [`Scene::set_device_position`].
    pub fn vision_step(&mut self, goal: Point) -> VisionStep {
        let current = self.device_position();
        self.vision.step(&self.space, current, goal)
    }

    pub fn inflated_obstacles(&self) -> &PolygonSet {
        self.space.inflated_obstacles()
    }

    /// Sensor knowledge of the last vision episode, while sensors are in use.
    pub fn discovered(&self) -> Option<&DiscoveredObstacles> {
        self.use_sensors.then(|| self.vision.vision().discovered())
    }

    /// Edges of the graph searched by the active finder's last request.
    pub fn roadmap_edges(&self) -> Vec<(Point, Point)> {
        let finder: &dyn PathFinder = if self.use_sensors {
            &self.vision
        } else {
            &self.regular
        };
        finder.roadmap().map(|g| g.segments()).unwrap_or_default()
    }

    pub fn path_info(&self, path: &Path) -> PathInfo {
        path.info()
    }

    fn empty_space(config: &PlannerConfig, device: Polygon) -> ConfigurationSpace {
        let mut space = ConfigurationSpace::new(device);
        space.set_bounds(config.bounds);
        space
    }

    fn vision_finder(config: &PlannerConfig, kind: FindMethodKind) -> VisionPathFinder {
        VisionPathFinder::new(kind.build(), config.vision.to_config())
            .with_limits(config.max_iterations, config.max_stalled_iterations)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bounds;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn small_scene() -> Scene {
        let config = PlannerConfig {
            bounds: Some(Bounds::from_size(10.0, 10.0)),
            ..PlannerConfig::default()
        };
        Scene::with_device(config, Polygon::square(1.0).unwrap())
    }

    #[test]
    fn default_scene_uses_workspace_and_square_device() {
        let scene = Scene::default();
        assert_eq!(
            scene.device_polygon(),
            &Polygon::square(DEFAULT_DEVICE_SIDE).unwrap()
        );
        assert!(scene.space().bounds().is_some());
        assert!(!scene.uses_sensors());
    }

    #[test]
    fn locked_device_refuses_to_move() {
        let mut scene = small_scene();
        scene.set_device_movable(false);
        assert!(matches!(
            scene.set_device_position(p(1.0, 1.0)),
            Err(MotionError::DeviceLocked)
        ));
        assert_eq!(scene.device_position(), p(0.0, 0.0));
        scene.set_device_movable(true);
        scene.move_device(&Path::new(vec![p(0.0, 0.0), p(2.0, 3.0)])).unwrap();
        assert_eq!(scene.device_position(), p(2.0, 3.0));
        scene.move_device(&Path::empty()).unwrap();
        assert_eq!(scene.device_position(), p(2.0, 3.0));
    }

    #[test]
    fn sensor_toggle_selects_finder() {
        let mut scene = small_scene();
        scene.add_obstacle(Polygon::square(2.0).unwrap().translate(p(4.5, 4.5)));
        assert!(scene.request_path(p(9.0, 9.0)).is_found());
        assert!(scene.discovered().is_none());
        assert!(!scene.roadmap_edges().is_empty());

        scene.use_sensors(true);
        scene.set_find_method(FindMethodKind::AStar);
        assert!(scene.request_path(p(9.0, 9.0)).is_found());
        assert!(scene.discovered().is_some_and(|d| !d.is_empty()));
    }

    #[test]
    fn reset_clears_obstacles_and_keeps_switches() {
        let mut scene = small_scene();
        scene.use_sensors(true);
        scene.add_obstacle(Polygon::square(2.0).unwrap().translate(p(4.5, 4.5)));
        scene.set_device_position(p(1.0, 1.0)).unwrap();
        scene.reset(Polygon::square(0.5).unwrap());
        assert_eq!(scene.obstacles().count(), 0);
        assert_eq!(scene.device_position(), p(0.0, 0.0));
        assert!(scene.uses_sensors());
        assert!(scene.inflated_obstacles().is_empty());
    }

    #[test]
    fn malformed_obstacle_is_reported() {
        let mut scene = small_scene();
        let err = scene.try_add_obstacle(vec![p(0.0, 0.0), p(1.0, 0.0)]).unwrap_err();
        assert!(matches!(err, MotionError::Geometry(_)));
        assert_eq!(scene.obstacles().count(), 0);
    }

    #[test]
    fn removing_an_obstacle_forgets_what_was_seen() {
        let mut scene = small_scene();
        scene.use_sensors(true);
        let id = scene.add_obstacle(Polygon::square(2.0).unwrap().translate(p(4.5, 4.5)));
        let goal = p(9.0, 9.0);
        assert!(matches!(scene.vision_step(goal), VisionStep::Advanced { .. }));
        assert!(scene.discovered().is_some_and(|d| d.knows_obstacle(id)));

        scene.remove_obstacle(id);
        assert!(scene.discovered().is_some_and(|d| d.is_empty()));
        let VisionStep::Advanced { plan, .. } = scene.vision_step(goal) else {
            panic!("expected to advance");
        };
        assert_eq!(plan.waypoints(), &[p(0.0, 0.0), goal]);
        assert!(!scene.discovered().is_some_and(|d| d.knows_obstacle(id)));
    }

    #[test]
    fn reshaping_the_device_ends_the_episode() {
        let mut scene = small_scene();
        scene.use_sensors(true);
        scene.add_obstacle(Polygon::square(2.0).unwrap().translate(p(4.5, 4.5)));
        scene.vision_step(p(9.0, 9.0));
        assert!(scene.discovered().is_some_and(|d| !d.is_empty()));
        scene.reshape_device(Polygon::square(0.5).unwrap());
        assert!(scene.discovered().is_some_and(|d| d.is_empty()));
    }
}
