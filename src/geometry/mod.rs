//! Geometry kernel: predicates, polygons, convex decomposition and
//! Minkowski sums. Everything here is pure.

pub mod decompose;
pub mod minkowski;
pub mod polygon;
pub mod polygon_set;
pub mod predicates;

pub use decompose::{decompose_convex, triangulate};
pub use minkowski::{
    convex_hull, inflate, minkowski_sum, minkowski_sum_convex, minkowski_sum_points,
    minkowski_sum_segment,
};
pub use polygon::Polygon;
pub use polygon_set::PolygonSet;
pub use predicates::{Orientation, orient, point_on_segment, segments_cross};
