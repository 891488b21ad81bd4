//! Convex decomposition by ear clipping followed by Hertel–Mehlhorn merging.

use crate::geometry::polygon::{Polygon, is_convex_ccw};
use crate::geometry::predicates::{Orientation, orient};
use crate::types::Point;

/// Position in `indices` of an ear of the counter-clockwise chain
/// `indices.map(|i| points[i])`: a strictly convex corner whose triangle holds
/// no other chain vertex (inside or on its boundary).
pub(crate) fn find_ear(points: &[Point], indices: &[usize]) -> Option<usize> {
    let n = indices.len();
    if n < 3 {
        return None;
    }
    (0..n).find(|&k| {
        let a = points[indices[(k + n - 1) % n]];
        let b = points[indices[k]];
        let c = points[indices[(k + 1) % n]];
        if !orient(a, b, c).is_ccw() {
            return false;
        }
        indices.iter().all(|&i| {
            let p = points[i];
            p == a || p == b || p == c || !covered_by_triangle(p, a, b, c)
        })
    })
}

fn covered_by_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    !orient(a, b, p).is_cw() && !orient(b, c, p).is_cw() && !orient(c, a, p).is_cw()
}

/// Ear-clipping triangulation of a simple polygon.
pub fn triangulate(polygon: &Polygon) -> Vec<[Point; 3]> {
    let points = polygon.points();
    let mut indices: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len().saturating_sub(2));

    while indices.len() > 3 {
        let n = indices.len();
        match find_ear(points, &indices) {
            Some(k) => {
                let a = points[indices[(k + n - 1) % n]];
                let b = points[indices[k]];
                let c = points[indices[(k + 1) % n]];
                triangles.push([a, b, c]);
                indices.remove(k);
            }
            None => {
                // Only collinear corners are left to remove; they carry no area.
                let Some(k) = (0..n).find(|&k| {
                    orient(
                        points[indices[(k + n - 1) % n]],
                        points[indices[k]],
                        points[indices[(k + 1) % n]],
                    ) == Orientation::Collinear
                }) else {
                    break;
                };
                indices.remove(k);
            }
        }
    }

    if indices.len() == 3 {
        let [a, b, c] = [points[indices[0]], points[indices[1]], points[indices[2]]];
        if orient(a, b, c).is_ccw() {
            triangles.push([a, b, c]);
        }
    }
    triangles
}

/// Split a polygon into convex pieces whose union is the polygon.
///
/// Convex input is returned as is. Otherwise the triangulation is coarsened by
/// removing diagonals whose removal keeps the merged piece convex.
pub fn decompose_convex(polygon: &Polygon) -> Vec<Polygon> {
    if polygon.is_convex() {
        return vec![polygon.clone()];
    }

    let mut pieces: Vec<Vec<Point>> = triangulate(polygon)
        .into_iter()
        .map(|t| t.to_vec())
        .collect();

    'merge: loop {
        for i in 0..pieces.len() {
            for j in (i + 1)..pieces.len() {
                if let Some(merged) = merge_across_diagonal(&pieces[i], &pieces[j]) {
                    pieces[i] = merged;
                    pieces.swap_remove(j);
                    continue 'merge;
                }
            }
        }
        break;
    }

    pieces.into_iter().map(Polygon::from_ccw_unchecked).collect()
}

/// Merge two counter-clockwise pieces sharing an edge if the result is convex.
fn merge_across_diagonal(a: &[Point], b: &[Point]) -> Option<Vec<Point>> {
    let na = a.len();
    let nb = b.len();
    for i in 0..na {
        let p = a[i];
        let q = a[(i + 1) % na];
        // The shared edge runs the other way round in the neighbour.
        let Some(j) = (0..nb).find(|&j| b[j] == q && b[(j + 1) % nb] == p) else {
            continue;
        };
        let mut merged = Vec::with_capacity(na + nb - 2);
        merged.extend((0..na).map(|k| a[(i + 1 + k) % na]));
        merged.extend((0..nb - 2).map(|k| b[(j + 2 + k) % nb]));
        return is_convex_ccw(&merged).then_some(merged);
    }
    None
}
