//! # Detour
//!
//! Plans around a handful of obstacles with full knowledge, once per find
//! method, and prints the resulting paths. Run with
//! `RUST_LOG=motion=debug` to see the inflation and graph statistics.

use std::error::Error;

use motion::{FindMethodKind, PlannerConfig, Point, Polygon, Scene};
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::new(PlannerConfig::default());
    scene.set_device_position(Point::new(150.0, 150.0))?;
    scene.add_obstacle(Polygon::rectangle(300.0, 1500.0)?.translate(Point::new(1200.0, 900.0)));
    scene.add_obstacle(Polygon::regular(6, 250.0)?.translate(Point::new(2400.0, 1500.0)));
    scene.try_add_obstacle(vec![
        Point::new(3000.0, 300.0),
        Point::new(3800.0, 300.0),
        Point::new(3800.0, 1100.0),
        Point::new(3600.0, 1100.0),
        Point::new(3600.0, 500.0),
        Point::new(3000.0, 500.0),
    ])?;

    let goal = Point::new(4300.0, 2000.0);
    for kind in [FindMethodKind::Dijkstra, FindMethodKind::AStar] {
        scene.set_find_method(kind);
        let outcome = scene.request_path(goal);
        let path = outcome.path();
        info!(method = %kind, info = %scene.path_info(&path), "planned");
        if let Some(reason) = outcome.reason() {
            println!("{kind}: {reason}");
            continue;
        }
        println!("{kind}: {}", scene.path_info(&path));
        for waypoint in path.waypoints() {
            println!("  ({:.1}, {:.1})", waypoint.x, waypoint.y);
        }
    }
    println!("roadmap edges: {}", scene.roadmap_edges().len());
    Ok(())
}
