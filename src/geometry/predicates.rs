//! Orientation and segment predicates.
//!
//! All tests are tolerant: a point closer than [`LENGTH_EPSILON`] to a line or
//! segment is treated as lying on it. Callers therefore never have to special
//! case "almost collinear" input produced by earlier floating point work.

use crate::types::{ANGLE_EPSILON, LENGTH_EPSILON, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

impl Orientation {
    pub fn is_ccw(self) -> bool {
        self == Self::CounterClockwise
    }

    pub fn is_cw(self) -> bool {
        self == Self::Clockwise
    }
}

/// Orientation of `c` relative to the directed line `a -> b`.
///
/// Collinear when `c` lies within [`LENGTH_EPSILON`] of the line, or when `a`
/// and `b` coincide.
pub fn orient(a: Point, b: Point, c: Point) -> Orientation {
    let ab = b - a;
    let len = ab.length();
    if len <= LENGTH_EPSILON {
        return Orientation::Collinear;
    }
    let dist = ab.perp_dot(c - a) / len;
    if dist > LENGTH_EPSILON {
        Orientation::CounterClockwise
    } else if dist < -LENGTH_EPSILON {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Whether two directions are parallel (sine of the angle below tolerance).
pub fn is_parallel(u: Point, v: Point) -> bool {
    let scale = u.length() * v.length();
    if scale == 0.0 {
        return true;
    }
    (u.perp_dot(v) / scale).abs() <= ANGLE_EPSILON
}

/// Distance from `p` to the closed segment `[a, b]`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    distance_to_segment(p, a, b) <= LENGTH_EPSILON
}

/// Proper crossing: the segments meet in a single point interior to both.
///
/// Touching at an endpoint, or running along each other, is not a crossing.
pub fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);
    [o1, o2, o3, o4].iter().all(|o| *o != Orientation::Collinear) && o1 != o2 && o3 != o4
}

/// Closed intersection test: crossing, touching or overlapping all count.
pub fn segments_touch(a: Point, b: Point, c: Point, d: Point) -> bool {
    segments_cross(a, b, c, d)
        || point_on_segment(c, a, b)
        || point_on_segment(d, a, b)
        || point_on_segment(a, c, d)
        || point_on_segment(b, c, d)
}

/// Intersection of the ray `origin + t * dir` (t >= 0) with segment `[a, b]`.
///
/// Returns `(t, u)` where `u` in `[0, 1]` is the parameter along the segment.
/// A ray running along the segment hits its nearer end.
pub fn ray_segment_hit(origin: Point, dir: Point, a: Point, b: Point) -> Option<(f64, f64)> {
    let e = b - a;
    let e_len = e.length();
    if e_len <= LENGTH_EPSILON {
        return None;
    }
    let denom = dir.perp_dot(e);
    let ao = a - origin;

    if is_parallel(dir, e) {
        // Only a collinear ray can hit a parallel segment.
        if ao.perp_dot(dir).abs() / dir.length() > LENGTH_EPSILON {
            return None;
        }
        let dir_len2 = dir.length_squared();
        let t_a = ao.dot(dir) / dir_len2;
        let t_b = (b - origin).dot(dir) / dir_len2;
        return match (t_a >= 0.0, t_b >= 0.0) {
            (true, true) if t_a <= t_b => Some((t_a, 0.0)),
            (true, true) => Some((t_b, 1.0)),
            (true, false) | (false, true) => Some((0.0, (-ao).dot(e) / (e_len * e_len))),
            (false, false) => None,
        };
    }

    let t = ao.perp_dot(e) / denom;
    let u = ao.perp_dot(dir) / denom;
    let u_tol = LENGTH_EPSILON / e_len;
    if t < -LENGTH_EPSILON / dir.length() || u < -u_tol || u > 1.0 + u_tol {
        return None;
    }
    Some((t.max(0.0), u.clamp(0.0, 1.0)))
}
