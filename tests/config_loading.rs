use std::io::Write;
use std::path::Path;

use approx::assert_relative_eq;

use motion::{Bounds, FindMethodKind, MotionError, Point, Scene, load_config};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn loads_sensing_profile() {
    let config = load_config(fixture("sensing.yaml")).expect("config should load");

    assert_eq!(
        config.bounds,
        Some(Bounds::new(Point::new(0.0, 0.0), Point::new(4590.0, 2295.0)))
    );
    assert!(config.use_sensors);
    assert_eq!(config.find_method, FindMethodKind::AStar);
    assert_eq!(config.max_iterations, 200);
    assert_eq!(config.max_stalled_iterations, 4);

    let vision = config.vision.to_config();
    assert_relative_eq!(vision.field_of_view, 120f64.to_radians());
    assert_relative_eq!(vision.range, 250.0);
    assert_eq!(vision.ray_count, 360);
    assert!(!vision.is_full_circle());
}

#[test]
fn loaded_config_drives_a_scene() {
    let config = load_config(fixture("unbounded.yaml")).expect("config should load");
    assert_eq!(config.bounds, None);

    let scene = Scene::new(config);
    assert!(scene.space().bounds().is_none());
    assert!(!scene.uses_sensors());
    assert_eq!(scene.find_method(), FindMethodKind::Dijkstra);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_config(fixture("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, MotionError::Io(_)));
}

#[test]
fn invalid_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "vision:\n  range: 0").unwrap();
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, MotionError::Yaml(_)));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_iterations: 0").unwrap();
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, MotionError::InvalidConfig(_)));
}
