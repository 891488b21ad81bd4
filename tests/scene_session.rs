use motion::{
    Bounds, MotionError, PlannerConfig, Point, Polygon, PolygonSet, Scene, VisionStep,
};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn scene() -> Scene {
    let config = PlannerConfig {
        bounds: Some(Bounds::from_size(10.0, 10.0)),
        ..PlannerConfig::default()
    };
    let mut scene = Scene::with_device(config, Polygon::square(1.0).unwrap());
    scene.add_obstacle(Polygon::square(2.0).unwrap().translate(p(4.5, 4.5)));
    scene
}

#[test]
fn stepping_by_hand_reaches_the_goal() {
    let mut scene = scene();
    scene.use_sensors(true);
    let goal = p(9.0, 9.0);

    let mut steps = 0;
    loop {
        match scene.vision_step(goal) {
            VisionStep::Advanced { to, .. } => {
                scene.set_device_position(to).expect("device is movable");
                steps += 1;
                assert!(steps < 100, "no arrival after {steps} steps");
            }
            VisionStep::Arrived => break,
            VisionStep::NotFound(reason) => panic!("{reason}"),
        }
    }
    assert_eq!(scene.device_position(), goal);
    let (block, _) = scene.obstacles().next().unwrap();
    assert!(scene.discovered().is_some_and(|d| d.knows_obstacle(block)));
}

#[test]
fn moving_along_a_found_path() {
    let mut scene = scene();
    let path = scene.request_path(p(9.0, 9.0)).path();
    assert_eq!(scene.path_info(&path).waypoints, 3);
    scene.move_device(&path).unwrap();
    assert_eq!(scene.device_position(), p(9.0, 9.0));

    scene.set_device_movable(false);
    assert!(matches!(scene.move_device(&path), Err(MotionError::DeviceLocked)));
}

#[test]
fn editing_obstacles_changes_the_plan() {
    let mut scene = scene();
    let direct = scene.request_path(p(9.0, 0.5)).path();
    assert_eq!(direct.len(), 2);

    let wall = scene.add_obstacle(Polygon::rectangle(0.5, 4.0).unwrap().translate(p(5.0, 1.0)));
    let detour = scene.request_path(p(9.0, 0.5)).path();
    assert!(detour.len() > 2);
    assert!(detour.length() > direct.length());

    assert!(scene.remove_obstacle(wall).is_some());
    assert_eq!(scene.request_path(p(9.0, 0.5)).path(), direct);

    let ids = scene.set_obstacles(PolygonSet::new());
    assert!(ids.is_empty());
    assert!(scene.inflated_obstacles().is_empty());
}

#[test]
fn reshaping_the_device_widens_the_margin() {
    let mut scene = scene();
    assert!(scene.request_path(p(2.9, 4.5)).is_found());
    scene.reshape_device(Polygon::square(2.0).unwrap());
    assert!(!scene.request_path(p(2.9, 4.5)).is_found());
    assert_eq!(scene.device_outline().bounding_box().width(), 2.0);
}
