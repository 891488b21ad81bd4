use std::fmt;

use crate::types::{Point, Pose2};

/// Ordered waypoints, each consecutive pair joined by a straight segment.
///
/// An empty path means "no path"; a single waypoint is a path of length zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    waypoints: Vec<Point>,
}

impl Path {
    pub fn new(waypoints: Vec<Point>) -> Self {
        Self { waypoints }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn start(&self) -> Option<Point> {
        self.waypoints.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.waypoints.last().copied()
    }

    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.waypoints.windows(2).map(|w| (w[0], w[1]))
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Placements along the path keeping a fixed yaw.
    pub fn poses(&self, yaw: f64) -> impl Iterator<Item = Pose2> + '_ {
        self.waypoints.iter().map(move |p| Pose2::new(*p, yaw))
    }

    pub fn info(&self) -> PathInfo {
        PathInfo {
            waypoints: self.len(),
            length: self.length(),
        }
    }
}

impl From<Vec<Point>> for Path {
    fn from(waypoints: Vec<Point>) -> Self {
        Self::new(waypoints)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}

/// Summary shown next to a computed path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathInfo {
    pub waypoints: usize,
    pub length: f64,
}

impl fmt::Display for PathInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.waypoints == 0 {
            write!(f, "no path")
        } else {
            write!(f, "{} waypoints, length {:.2}", self.waypoints, self.length)
        }
    }
}
