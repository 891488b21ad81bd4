/// Tolerance for distances and coordinates in workspace units.
pub const LENGTH_EPSILON: f64 = 1e-7;

/// Tolerance on the sine of the angle between two vectors for orientation tests.
pub const ANGLE_EPSILON: f64 = 1e-10;

/// Default workspace height in workspace units.
pub const WORKSPACE_HEIGHT: f64 = 2295.0;
/// Default workspace width: twice the height.
pub const WORKSPACE_WIDTH: f64 = WORKSPACE_HEIGHT * 2.0;

/// Side length of the square device a fresh scene starts with.
pub const DEFAULT_DEVICE_SIDE: f64 = 100.0;

pub const DEFAULT_SENSOR_RANGE: f64 = 400.0;
pub const DEFAULT_RAY_COUNT: usize = 720;

pub const DEFAULT_MAX_ITERATIONS: usize = 500;
pub const DEFAULT_MAX_STALLED_ITERATIONS: usize = 3;
