//! Segment intersection tests

use crate::consts::SEGMENT_EPSILON;
use crate::{Rect, Vec2};

/// True if the two directions are (nearly) parallel
#[inline]
pub fn is_parallel(d1: Vec2, d2: Vec2) -> bool {
    d1.perp_dot(d2).abs() < SEGMENT_EPSILON
}

/// Parametric segment/segment test.
///
/// Parallel and collinear segments never intersect. Crossings at the
/// extreme ends of either segment are ignored: both parameters must lie in
/// `[eps, 1 - eps]`.
pub fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let r = p2 - p1;
    let s = q2 - q1;
    let denom = r.perp_dot(s);
    if denom.abs() < SEGMENT_EPSILON {
        return false;
    }

    let qp = q1 - p1;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;

    let lo = SEGMENT_EPSILON;
    let hi = 1.0 - SEGMENT_EPSILON;
    (lo..=hi).contains(&t) && (lo..=hi).contains(&u)
}

/// True if the segment crosses any of the rectangle's four edges
#[inline]
pub fn segment_hits_rect(a: Vec2, b: Vec2, rect: &Rect) -> bool {
    rect.edges()
        .iter()
        .any(|&(e1, e2)| segments_intersect(a, b, e1, e2))
}

/// True if the segment passes through the open interior of `rect`.
///
/// Touching an edge or a corner does not count. Catches segments that slip
/// between edge endpoints, such as a diagonal running corner to corner.
pub fn segment_enters_rect(a: Vec2, b: Vec2, rect: &Rect) -> bool {
    let d = b - a;
    let mut t0: f32 = 0.0;
    let mut t1: f32 = 1.0;
    let slabs = [
        (-d.x, a.x - rect.x),
        (d.x, rect.right() - a.x),
        (-d.y, a.y - rect.y),
        (d.y, rect.bottom() - a.y),
    ];
    for (p, q) in slabs {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    if t1 - t0 <= SEGMENT_EPSILON {
        return false;
    }

    let mid = a + d * ((t0 + t1) * 0.5);
    mid.x > rect.x && mid.x < rect.right() && mid.y > rect.y && mid.y < rect.bottom()
}
