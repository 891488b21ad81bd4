//! Minkowski sums.
//!
//! Convex pairs are summed directly by merging their edge vectors in angular
//! order (O(n + m)). Non-convex operands are first split into convex pieces;
//! the sum is then returned as the set of pairwise piece sums, whose union is
//! the exact sum. Every piece of the result is convex, which the planners rely
//! on when they clip motion against it.

use crate::geometry::decompose::decompose_convex;
use crate::geometry::polygon::Polygon;
use crate::geometry::polygon_set::PolygonSet;
use crate::geometry::predicates::{Orientation, orient};
use crate::types::{GeometryError, LENGTH_EPSILON, Point};

/// Convex hull (counter-clockwise, collinear points dropped) by monotone chain.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup_by(|a, b| a.distance(*b) <= LENGTH_EPSILON);
    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower = half_hull(sorted.iter());
    let mut upper = half_hull(sorted.iter().rev());
    // Each chain ends where the other one starts.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn half_hull<'a>(points: impl Iterator<Item = &'a Point>) -> Vec<Point> {
    let mut chain: Vec<Point> = Vec::new();
    for &p in points {
        while chain.len() >= 2
            && !orient(chain[chain.len() - 2], chain[chain.len() - 1], p).is_ccw()
        {
            chain.pop();
        }
        chain.push(p);
    }
    chain
}

/// Sum of two convex polygons.
pub fn minkowski_sum_convex(a: &Polygon, b: &Polygon) -> Result<Polygon, GeometryError> {
    if !a.is_convex() || !b.is_convex() {
        return Err(GeometryError::NotConvex);
    }
    Ok(Polygon::from_ccw_unchecked(merge_edges(a.points(), b.points())))
}

/// Sum of two arbitrary simple polygons as a set of convex pieces.
pub fn minkowski_sum(a: &Polygon, b: &Polygon) -> PolygonSet {
    if a.is_convex() && b.is_convex() {
        return PolygonSet::from_polygons([Polygon::from_ccw_unchecked(merge_edges(
            a.points(),
            b.points(),
        ))]);
    }
    let pieces_a = decompose_convex(a);
    let pieces_b = decompose_convex(b);
    let mut sum = PolygonSet::new();
    for pa in &pieces_a {
        for pb in &pieces_b {
            sum.insert(Polygon::from_ccw_unchecked(merge_edges(pa.points(), pb.points())));
        }
    }
    sum
}

/// Sum of raw vertex lists; both are validated first.
pub fn minkowski_sum_points(a: &[Point], b: &[Point]) -> Result<PolygonSet, GeometryError> {
    let a = Polygon::new(a.to_vec())?;
    let b = Polygon::new(b.to_vec())?;
    Ok(minkowski_sum(&a, &b))
}

/// Sum of the segment `[p, q]` (a point when they coincide) with a convex polygon.
pub fn minkowski_sum_segment(
    p: Point,
    q: Point,
    convex: &Polygon,
) -> Result<Polygon, GeometryError> {
    if !convex.is_convex() {
        return Err(GeometryError::NotConvex);
    }
    Ok(sweep_convex(p, q, convex))
}

/// [`minkowski_sum_segment`] for a polygon already known to be convex.
pub(crate) fn sweep_convex(p: Point, q: Point, convex: &Polygon) -> Polygon {
    if p.distance(q) <= LENGTH_EPSILON {
        return convex.translate(p);
    }
    let swept: Vec<Point> = convex
        .points()
        .iter()
        .flat_map(|v| [*v + p, *v + q])
        .collect();
    Polygon::from_ccw_unchecked(convex_hull(&swept))
}

/// Obstacle grown by the device: the set of reference-point positions at
/// which the device overlaps the obstacle.
pub fn inflate(obstacle: &Polygon, device: &Polygon) -> PolygonSet {
    minkowski_sum(obstacle, &device.reflect())
}

/// Merge the edge sequences of two convex counter-clockwise polygons.
fn merge_edges(a: &[Point], b: &[Point]) -> Vec<Point> {
    let a = starting_at_lowest(a);
    let b = starting_at_lowest(b);
    let (n, m) = (a.len(), b.len());

    let mut out = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        out.push(a[i % n] + b[j % m]);
        let ea = a[(i + 1) % n] - a[i % n];
        let eb = b[(j + 1) % m] - b[j % m];
        if i == n {
            j += 1;
        } else if j == m {
            i += 1;
        } else {
            let cross = ea.perp_dot(eb);
            if cross > 0.0 {
                i += 1;
            } else if cross < 0.0 {
                j += 1;
            } else {
                i += 1;
                j += 1;
            }
        }
    }
    drop_collinear(out)
}

/// Rotate so that the lowest (then leftmost) vertex comes first.
fn starting_at_lowest(points: &[Point]) -> Vec<Point> {
    let start = (0..points.len())
        .min_by(|&i, &j| {
            points[i]
                .y
                .total_cmp(&points[j].y)
                .then(points[i].x.total_cmp(&points[j].x))
        })
        .unwrap_or(0);
    points[start..].iter().chain(&points[..start]).copied().collect()
}

fn drop_collinear(points: Vec<Point>) -> Vec<Point> {
    let n = points.len();
    let kept: Vec<Point> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            prev.distance(points[i]) > LENGTH_EPSILON
                && orient(prev, points[i], next) != Orientation::Collinear
        })
        .map(|i| points[i])
        .collect();
    if kept.len() >= 3 { kept } else { points }
}
