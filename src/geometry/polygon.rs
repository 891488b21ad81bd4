//! Simple, non-degenerate polygons.
//!
//! A [`Polygon`] is validated once at construction and immutable afterwards;
//! any operation that changes its shape returns a new polygon. Vertices are
//! kept in counter-clockwise order and expressed relative to the polygon's
//! reference point (the local origin), which is what the configuration space
//! translates when it places the device.

use crate::geometry::decompose::find_ear;
use crate::geometry::predicates::{
    Orientation, orient, point_on_segment, segments_cross, segments_touch,
};
use crate::types::{Bounds, GeometryError, LENGTH_EPSILON, Point, Pose2};

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Validate and build a polygon.
    ///
    /// Clockwise input is re-ordered counter-clockwise. Degenerate input
    /// (too few vertices, repeated consecutive vertices, zero area,
    /// self-intersection, non-finite coordinates) is rejected.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        validate(&points)?;
        let mut points = points;
        if signed_area(&points) < 0.0 {
            points.reverse();
        }
        Ok(Self { points })
    }

    /// Build from vertices already known to form a convex, counter-clockwise
    /// polygon with non-zero area (kernel outputs such as hulls).
    pub(crate) fn from_ccw_unchecked(points: Vec<Point>) -> Self {
        debug_assert!(points.len() >= 3);
        Self { points }
    }

    /// Axis-aligned rectangle centred on the reference point.
    pub fn rectangle(width: f64, height: f64) -> Result<Self, GeometryError> {
        let hx = 0.5 * width;
        let hy = 0.5 * height;
        Self::new(vec![
            Point::new(-hx, -hy),
            Point::new(hx, -hy),
            Point::new(hx, hy),
            Point::new(-hx, hy),
        ])
    }

    pub fn square(side: f64) -> Result<Self, GeometryError> {
        Self::rectangle(side, side)
    }

    /// Regular polygon with `sides` vertices on a circle of `radius`.
    pub fn regular(sides: usize, radius: f64) -> Result<Self, GeometryError> {
        let step = std::f64::consts::TAU / sides as f64;
        Self::new(
            (0..sides)
                .map(|i| {
                    let (sin, cos) = (step * i as f64).sin_cos();
                    Point::new(radius * cos, radius * sin)
                })
                .collect(),
        )
    }

    /// Whether the closed vertex chain has no crossing, touching or
    /// overlapping edges apart from shared endpoints of neighbours.
    pub fn is_simple(points: &[Point]) -> bool {
        find_self_intersection(points).is_none()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Vertex at a cyclic index.
    pub fn vertex(&self, index: usize) -> Point {
        self.points[index % self.points.len()]
    }

    /// Edges as `(start, end)` pairs, counter-clockwise.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area centroid.
    pub fn centroid(&self) -> Point {
        let mut acc = Point::ZERO;
        let mut twice_area = 0.0;
        for (a, b) in self.edges() {
            let cross = a.perp_dot(b);
            acc += (a + b) * cross;
            twice_area += cross;
        }
        acc / (3.0 * twice_area)
    }

    pub fn bounding_box(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        for p in &self.points {
            bounds.expand_to_include(*p);
        }
        bounds
    }

    pub fn is_convex(&self) -> bool {
        is_convex_ccw(&self.points)
    }

    /// Strict containment: `pt` lies in the interior, farther than
    /// [`LENGTH_EPSILON`] from the boundary.
    pub fn contains(&self, pt: Point) -> bool {
        !self.on_boundary(pt) && self.crossing_parity(pt)
    }

    /// Interior or boundary.
    pub fn covers(&self, pt: Point) -> bool {
        self.on_boundary(pt) || self.crossing_parity(pt)
    }

    pub fn on_boundary(&self, pt: Point) -> bool {
        self.edges().any(|(a, b)| point_on_segment(pt, a, b))
    }

    /// Whether the interiors of the two polygons share area. Polygons that
    /// only touch along edges or at vertices do not intersect.
    pub fn intersects(&self, other: &Polygon) -> bool {
        if !self.bounding_box().overlaps(&other.bounding_box()) {
            return false;
        }
        for (a, b) in self.edges() {
            if other.edges().any(|(c, d)| segments_cross(a, b, c, d)) {
                return true;
            }
        }
        self.any_probe_inside(other) || other.any_probe_inside(self)
    }

    /// Negate every vertex about the reference point.
    ///
    /// A half-turn keeps the winding, so the result stays counter-clockwise.
    pub fn reflect(&self) -> Polygon {
        Self {
            points: self.points.iter().map(|p| -*p).collect(),
        }
    }

    pub fn translate(&self, offset: Point) -> Polygon {
        Self {
            points: self.points.iter().map(|p| *p + offset).collect(),
        }
    }

    /// Rotate about the reference point.
    pub fn rotate(&self, yaw: f64) -> Polygon {
        self.transform(&Pose2::new(Point::ZERO, yaw))
    }

    /// Outline of the polygon placed at `pose`.
    pub fn transform(&self, pose: &Pose2) -> Polygon {
        Self {
            points: self.points.iter().map(|p| pose.apply(*p)).collect(),
        }
    }

    /// A point strictly inside the polygon: the centroid of one ear.
    pub fn interior_point(&self) -> Point {
        let n = self.points.len();
        let indices: Vec<usize> = (0..n).collect();
        let i = find_ear(&self.points, &indices).unwrap_or(0);
        let prev = self.points[(i + n - 1) % n];
        let next = self.points[(i + 1) % n];
        (prev + self.points[i] + next) / 3.0
    }

    fn crossing_parity(&self, pt: Point) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > pt.y) != (b.y > pt.y) {
                let x = a.x + (pt.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if pt.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Probe points of `self` (vertices, edge midpoints, one interior point)
    /// tested for strict containment in `other`.
    fn any_probe_inside(&self, other: &Polygon) -> bool {
        self.points.iter().any(|p| other.contains(*p))
            || self.edges().any(|(a, b)| other.contains((a + b) * 0.5))
            || other.contains(self.interior_point())
    }
}

pub(crate) fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum();
    0.5 * twice
}

/// Convexity of a counter-clockwise vertex chain; collinear runs are allowed.
pub(crate) fn is_convex_ccw(points: &[Point]) -> bool {
    let n = points.len();
    (0..n).all(|i| !orient(points[i], points[(i + 1) % n], points[(i + 2) % n]).is_cw())
}

fn validate(points: &[Point]) -> Result<(), GeometryError> {
    if points.len() < 3 {
        return Err(GeometryError::TooFewVertices {
            count: points.len(),
        });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(GeometryError::NonFinite { index });
    }
    let n = points.len();
    if let Some(index) =
        (0..n).find(|i| points[*i].distance(points[(i + 1) % n]) <= LENGTH_EPSILON)
    {
        return Err(GeometryError::DuplicateVertex { index });
    }
    if signed_area(points).abs() <= LENGTH_EPSILON {
        return Err(GeometryError::ZeroArea);
    }
    if let Some((first, second)) = find_self_intersection(points) {
        return Err(GeometryError::SelfIntersecting { first, second });
    }
    Ok(())
}

/// First pair of edges that violate simplicity, as edge indices.
fn find_self_intersection(points: &[Point]) -> Option<(usize, usize)> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let edge = |i: usize| (points[i], points[(i + 1) % n]);
    for i in 0..n {
        let (a, b) = edge(i);
        // Neighbouring edge folding back onto this one.
        let (_, c) = edge((i + 1) % n);
        if orient(a, b, c) == Orientation::Collinear && (b - a).dot(c - b) < 0.0 {
            return Some((i, (i + 1) % n));
        }
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (c, d) = edge(j);
            if segments_touch(a, b, c, d) {
                return Some((i, j));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn l_shape() -> Polygon {
        Polygon::new(vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_degenerate_input() {
        assert_eq!(
            Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0)]),
            Err(GeometryError::TooFewVertices { count: 2 })
        );
        assert_eq!(
            Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]),
            Err(GeometryError::ZeroArea)
        );
        assert_eq!(
            Polygon::new(vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]),
            Err(GeometryError::DuplicateVertex { index: 0 })
        );
        assert_eq!(
            Polygon::new(vec![p(0.0, 0.0), p(f64::NAN, 0.0), p(0.0, 1.0)]),
            Err(GeometryError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn rejects_bow_tie() {
        let bow_tie = vec![p(0.0, 0.0), p(2.0, 2.0), p(2.0, 0.0), p(0.0, 3.0)];
        assert!(!Polygon::is_simple(&bow_tie));
        let err = Polygon::new(bow_tie).unwrap_err();
        assert!(matches!(err, GeometryError::SelfIntersecting { .. }));
    }

    #[test]
    fn clockwise_input_is_reoriented() {
        let poly = Polygon::new(vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)]).unwrap();
        assert!(poly.signed_area() > 0.0);
        assert_relative_eq!(poly.area(), 1.0);
    }

    #[test]
    fn containment_excludes_boundary() {
        let square = Polygon::square(2.0).unwrap();
        assert!(square.contains(p(0.0, 0.0)));
        assert!(!square.contains(p(1.0, 0.0)));
        assert!(square.covers(p(1.0, 0.0)));
        assert!(square.covers(p(1.0, 1.0)));
        assert!(!square.covers(p(1.5, 0.0)));

        let l = l_shape();
        assert!(l.contains(p(0.5, 1.5)));
        assert!(!l.covers(p(1.5, 1.5)));
    }

    #[test]
    fn intersects_ignores_touching() {
        let a = Polygon::square(2.0).unwrap();
        let touching = a.translate(p(2.0, 0.0));
        let overlapping = a.translate(p(1.0, 1.0));
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(a.intersects(&a.clone()));

        let inner = Polygon::square(0.5).unwrap();
        assert!(a.intersects(&inner));
        assert!(inner.intersects(&a));
    }

    #[test]
    fn reflect_twice_is_identity() {
        let l = l_shape();
        assert_eq!(l.reflect().reflect(), l);
        assert!(l.reflect().signed_area() > 0.0);
    }

    #[test]
    fn transform_places_outline() {
        let rect = Polygon::rectangle(2.0, 1.0).unwrap();
        let placed = rect.transform(&Pose2::new(p(5.0, 5.0), FRAC_PI_2));
        let bounds = placed.bounding_box();
        assert_relative_eq!(bounds.width(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.height(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.center().x, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn centroid_and_interior_point() {
        let l = l_shape();
        assert!(l.contains(l.interior_point()));
        let c = Polygon::square(2.0).unwrap().translate(p(3.0, 4.0)).centroid();
        assert_relative_eq!(c.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 4.0, epsilon = 1e-12);
        assert!(!l.is_convex());
        assert!(Polygon::regular(6, 1.0).unwrap().is_convex());
    }
}
