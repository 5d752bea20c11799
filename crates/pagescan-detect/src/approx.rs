//! Closed-polygon simplification (Douglas-Peucker).

use nalgebra::Point2;

/// Perimeter of a point sequence, closing the loop back to the first point.
pub fn perimeter(points: &[Point2<f32>]) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut acc = 0.0f32;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        acc += (b - a).norm();
    }
    acc
}

#[inline]
fn point_segment_distance(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> f32 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= f32::EPSILON {
        return (p - a).norm();
    }
    // perpendicular distance to the infinite line through a and b
    ((b.x - a.x) * (a.y - p.y) - (a.x - p.x) * (b.y - a.y)).abs() / len2.sqrt()
}

fn simplify_chain(points: &[Point2<f32>], epsilon: f32, out: &mut Vec<Point2<f32>>) {
    // keeps the first point of the chain, never the last (the caller
    // stitches chains together around the ring)
    let n = points.len();
    if n < 2 {
        out.extend_from_slice(points);
        return;
    }

    let mut max_d = 0.0f32;
    let mut max_i = 0usize;
    for (i, &p) in points.iter().enumerate().take(n - 1).skip(1) {
        let d = point_segment_distance(p, points[0], points[n - 1]);
        if d > max_d {
            max_d = d;
            max_i = i;
        }
    }

    if max_d > epsilon {
        simplify_chain(&points[..=max_i], epsilon, out);
        simplify_chain(&points[max_i..], epsilon, out);
    } else {
        out.push(points[0]);
    }
}

/// Simplify a closed boundary to fewer vertices.
///
/// A vertex survives only if it deviates from the line connecting its
/// surviving neighbors by more than `epsilon`. The ring is split at two
/// extreme points so the recursion has stable anchors.
pub fn approximate_polygon(points: &[Point2<f32>], epsilon: f32) -> Vec<Point2<f32>> {
    let n = points.len();
    if n <= 3 {
        return points.to_vec();
    }

    // anchor 0 and the point farthest from it
    let mut far = 1usize;
    let mut far_d = 0.0f32;
    for (i, &p) in points.iter().enumerate().skip(1) {
        let d = (p - points[0]).norm_squared();
        if d > far_d {
            far_d = d;
            far = i;
        }
    }

    let mut out = Vec::new();
    simplify_chain(&points[..=far], epsilon, &mut out);
    let mut second: Vec<Point2<f32>> = points[far..].to_vec();
    second.push(points[0]);
    simplify_chain(&second, epsilon, &mut out);

    // the recursion keeps both anchors unconditionally; a trace that
    // starts mid-edge leaves its start anchor collinear with the ring
    // neighbors, so sweep those out against the same tolerance
    let mut i = 0;
    while out.len() > 3 && i < out.len() {
        let prev = out[(i + out.len() - 1) % out.len()];
        let next = out[(i + 1) % out.len()];
        if point_segment_distance(out[i], prev, next) <= epsilon {
            out.remove(i);
        } else {
            i += 1;
        }
    }
    out
}
