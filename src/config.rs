//! Planner configuration loaded from YAML.
//!
//! ```yaml
//! bounds: [0.0, 0.0, 4590.0, 2295.0]   # or ~ for an unbounded workspace
//! use_sensors: true
//! find_method: a_star                   # dijkstra | a_star
//! vision:
//!   field_of_view_deg: 120.0
//!   range: 400.0
//!   ray_count: 720
//! max_iterations: 500
//! max_stalled_iterations: 3
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::Deserialize;

use crate::search::FindMethodKind;
use crate::types::{
    Bounds, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_STALLED_ITERATIONS, DEFAULT_RAY_COUNT,
    DEFAULT_SENSOR_RANGE, MotionError, Point, WORKSPACE_HEIGHT, WORKSPACE_WIDTH,
};
use crate::vision::VisionConfig;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    #[serde(deserialize_with = "deserialize_bounds")]
    pub bounds: Option<Bounds>,
    pub use_sensors: bool,
    pub find_method: FindMethodKind,
    pub vision: VisionSettings,
    pub max_iterations: usize,
    pub max_stalled_iterations: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            bounds: Some(Bounds::from_size(WORKSPACE_WIDTH, WORKSPACE_HEIGHT)),
            use_sensors: false,
            find_method: FindMethodKind::default(),
            vision: VisionSettings::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_stalled_iterations: DEFAULT_MAX_STALLED_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisionSettings {
    #[serde(deserialize_with = "deserialize_field_of_view")]
    pub field_of_view_deg: f64,
    #[serde(deserialize_with = "deserialize_range")]
    pub range: f64,
    #[serde(deserialize_with = "deserialize_ray_count")]
    pub ray_count: usize,
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            field_of_view_deg: 360.0,
            range: DEFAULT_SENSOR_RANGE,
            ray_count: DEFAULT_RAY_COUNT,
        }
    }
}

impl VisionSettings {
    pub fn to_config(&self) -> VisionConfig {
        VisionConfig {
            field_of_view: self.field_of_view_deg.to_radians(),
            range: self.range,
            ray_count: self.ray_count,
        }
    }
}

impl PlannerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MotionError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), MotionError> {
        if self.max_iterations == 0 {
            return Err(MotionError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.max_stalled_iterations == 0 || self.max_stalled_iterations > self.max_iterations {
            return Err(MotionError::InvalidConfig(
                "max_stalled_iterations must be between 1 and max_iterations".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn load_config(yaml_path: impl AsRef<Path>) -> Result<PlannerConfig, MotionError> {
    let yaml_str = std::fs::read_to_string(yaml_path.as_ref())?;
    PlannerConfig::from_yaml_str(&yaml_str)
}

fn deserialize_bounds<'de, D>(deserializer: D) -> Result<Option<Bounds>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Some([min_x, min_y, max_x, max_y]) = Option::<[f64; 4]>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if !(min_x < max_x && min_y < max_y) {
        return Err(serde::de::Error::custom(
            "bounds must be [min_x, min_y, max_x, max_y] with min < max",
        ));
    }
    Ok(Some(Bounds::new(Point::new(min_x, min_y), Point::new(max_x, max_y))))
}

fn deserialize_field_of_view<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value > 0.0 && value <= 360.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "field_of_view_deg must be in the range (0, 360]",
        ))
    }
}

fn deserialize_range<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("range must be positive"))
    }
}

fn deserialize_ray_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = usize::deserialize(deserializer)?;
    if value >= 3 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("ray_count must be at least 3"))
    }
}
