//! Unordered polygon collections with set semantics.
//!
//! Used both for raw obstacle sets and for inflated (Minkowski-summed)
//! regions. Queries treat the set as the union of its members.

use crate::geometry::decompose::decompose_convex;
use crate::geometry::polygon::Polygon;
use crate::geometry::predicates::{point_on_segment, segments_cross};
use crate::types::{ANGLE_EPSILON, Bounds, LENGTH_EPSILON, Point};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonSet {
    polygons: Vec<Polygon>,
}

impl PolygonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_polygons(polygons: impl IntoIterator<Item = Polygon>) -> Self {
        let mut set = Self::new();
        set.extend(polygons);
        set
    }

    /// Insert a polygon. Returns `false` (and leaves the set unchanged) when
    /// an equal polygon is already a member.
    pub fn insert(&mut self, polygon: Polygon) -> bool {
        if self.contains_polygon(&polygon) {
            return false;
        }
        self.polygons.push(polygon);
        true
    }

    pub fn remove(&mut self, polygon: &Polygon) -> bool {
        match self.polygons.iter().position(|p| p == polygon) {
            Some(index) => {
                self.polygons.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains_polygon(&self, polygon: &Polygon) -> bool {
        self.polygons.iter().any(|p| p == polygon)
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    /// Every member vertex, member by member.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.polygons.iter().flat_map(|p| p.points().iter().copied())
    }

    /// `pt` lies strictly inside some member.
    pub fn contains(&self, pt: Point) -> bool {
        self.polygons.iter().any(|p| p.contains(pt))
    }

    /// `pt` lies inside or on the boundary of some member.
    pub fn covers(&self, pt: Point) -> bool {
        self.polygons.iter().any(|p| p.covers(pt))
    }

    pub fn bounding_box(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        for p in self.vertices() {
            bounds.expand_to_include(p);
        }
        bounds
    }

    /// Whether the closed segment `[a, b]` stays out of every member's
    /// interior. Running along a boundary or touching a vertex is allowed.
    pub fn segment_clear(&self, a: Point, b: Point) -> bool {
        self.polygons.iter().all(|p| segment_clear_of(p, a, b))
    }

    /// Smallest parameter `t` in `[0, 1]` at which `a + t * (b - a)` enters
    /// the interior of some member, or `None` if the segment stays clear.
    ///
    /// Non-convex members are decomposed on the fly.
    pub fn first_contact(&self, a: Point, b: Point) -> Option<f64> {
        let mut first: Option<f64> = None;
        for polygon in &self.polygons {
            let t = if polygon.is_convex() {
                convex_entry(polygon, a, b)
            } else {
                decompose_convex(polygon)
                    .iter()
                    .filter_map(|piece| convex_entry(piece, a, b))
                    .min_by(f64::total_cmp)
            };
            if let Some(t) = t {
                first = Some(first.map_or(t, |f| f.min(t)));
            }
        }
        first
    }
}

impl FromIterator<Polygon> for PolygonSet {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self::from_polygons(iter)
    }
}

impl Extend<Polygon> for PolygonSet {
    fn extend<I: IntoIterator<Item = Polygon>>(&mut self, iter: I) {
        for polygon in iter {
            self.insert(polygon);
        }
    }
}

impl<'a> IntoIterator for &'a PolygonSet {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.iter()
    }
}

impl IntoIterator for PolygonSet {
    type Item = Polygon;
    type IntoIter = std::vec::IntoIter<Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.into_iter()
    }
}

/// Split `[a, b]` at every boundary contact and check that no piece runs
/// through the interior.
fn segment_clear_of(polygon: &Polygon, a: Point, b: Point) -> bool {
    let mut seg_bounds = Bounds::new(a, b);
    seg_bounds.expand_by(LENGTH_EPSILON);
    if !seg_bounds.overlaps(&polygon.bounding_box()) {
        return true;
    }

    let d = b - a;
    let len2 = d.length_squared();
    if len2 <= LENGTH_EPSILON * LENGTH_EPSILON {
        return !polygon.contains(a);
    }

    if polygon.edges().any(|(c, e)| segments_cross(a, b, c, e)) {
        return false;
    }

    let mut params: Vec<f64> = vec![0.0, 1.0];
    params.extend(
        polygon
            .points()
            .iter()
            .filter(|v| point_on_segment(**v, a, b))
            .map(|v| ((*v - a).dot(d) / len2).clamp(0.0, 1.0)),
    );
    params.sort_by(f64::total_cmp);

    let min_gap = LENGTH_EPSILON / len2.sqrt();
    params
        .windows(2)
        .filter(|w| w[1] - w[0] > min_gap)
        .all(|w| !polygon.contains(a + d * (0.5 * (w[0] + w[1]))))
}

/// Cyrus–Beck entry parameter of `[a, b]` into the open interior of a convex
/// counter-clockwise polygon.
fn convex_entry(polygon: &Polygon, a: Point, b: Point) -> Option<f64> {
    let d = b - a;
    let len = d.length();
    if len <= LENGTH_EPSILON {
        return polygon.contains(a).then_some(0.0);
    }

    let (mut t_in, mut t_out) = (0.0_f64, 1.0_f64);
    for (p, q) in polygon.edges() {
        let edge = q - p;
        // Inward normal of a counter-clockwise edge.
        let normal = Point::new(-edge.y, edge.x).normalize_or_zero();
        let dist = normal.dot(a - p);
        let rate = normal.dot(d);
        if rate.abs() <= ANGLE_EPSILON * len {
            if dist <= LENGTH_EPSILON {
                return None;
            }
            continue;
        }
        let t = -dist / rate;
        if rate > 0.0 {
            t_in = t_in.max(t);
        } else {
            t_out = t_out.min(t);
        }
    }

    (t_out - t_in > LENGTH_EPSILON / len).then_some(t_in)
}
