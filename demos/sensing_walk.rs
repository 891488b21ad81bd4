//! # Sensing Walk
//!
//! Steps a device with a forward-facing sensor toward a goal behind a wall
//! it cannot see at first. Each step prints where the device moved and how
//! much obstacle boundary it knows about.

use std::error::Error;

use motion::{PlannerConfig, Point, Polygon, Scene, VisionStep};
use motion::config::VisionSettings;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = PlannerConfig {
        use_sensors: true,
        vision: VisionSettings {
            field_of_view_deg: 150.0,
            range: 600.0,
            ray_count: 360,
        },
        ..PlannerConfig::default()
    };
    let mut scene = Scene::new(config);
    scene.set_device_position(Point::new(200.0, 1100.0))?;
    scene.add_obstacle(Polygon::rectangle(200.0, 1600.0)?.translate(Point::new(2000.0, 1100.0)));
    scene.add_obstacle(Polygon::rectangle(1200.0, 200.0)?.translate(Point::new(2700.0, 1800.0)));

    let goal = Point::new(3500.0, 1100.0);
    loop {
        match scene.vision_step(goal) {
            VisionStep::Advanced { from, to, plan } => {
                let known = scene.discovered().map_or(0.0, |d| d.total_length());
                println!(
                    "({:.0}, {:.0}) -> ({:.0}, {:.0})  plan: {}  known boundary: {known:.0}",
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    plan.info()
                );
                scene.set_device_position(to)?;
            }
            VisionStep::Arrived => {
                println!("arrived at ({:.0}, {:.0})", goal.x, goal.y);
                break;
            }
            VisionStep::NotFound(reason) => {
                println!("gave up: {reason}");
                break;
            }
        }
    }
    Ok(())
}
