//! Spatial value types shared by the geometry kernel and the planners.

use glam::DVec2;

/// A 2D coordinate in workspace units.
pub type Point = DVec2;

/// Device placement: reference point position and rotation (radians).
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Pose2 {
    pub position: Point,
    pub yaw: f64,
}

impl Pose2 {
    pub fn new(position: Point, yaw: f64) -> Self {
        Self { position, yaw }
    }

    pub fn at(position: Point) -> Self {
        Self { position, yaw: 0.0 }
    }

    /// Map a point from the device frame into the workspace.
    pub fn apply(&self, local: Point) -> Point {
        let (sin, cos) = self.yaw.sin_cos();
        self.position + Point::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
    }
}

/// Closed axis-aligned rectangle in workspace units.
/// Convention: [min.x, max.x] x [min.y, max.y], both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Bounds of a `width` x `height` workspace anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(Point::ZERO, Point::new(width, height))
    }

    /// Create bounds that represent "no region" (empty). Use this as the initial
    /// value before expanding it point by point.
    pub fn empty() -> Self {
        Self {
            min: Point::new(f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Returns true if nothing has been included yet (min > max in either axis).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand this bounds to include the point (in place).
    pub fn expand_to_include(&mut self, p: Point) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Expand by a margin in all directions.
    pub fn expand_by(&mut self, margin: f64) {
        self.min -= Point::splat(margin);
        self.max += Point::splat(margin);
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        (self.min + self.max) * 0.5
    }
}
