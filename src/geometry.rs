//! Planar orientation and segment-intersection predicates.
//!
//! These operate on raw `Coord` pairs with longitude as `x` and latitude as
//! `y`, treated as plain Euclidean coordinates. All comparisons are exact:
//! there is no epsilon, so a triple has to land on zero to the last bit to
//! classify as colinear, and nearly-colinear input falls to one side or the
//! other.

use geo_types::Coord;

/// Rotational direction of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Colinear,
    Clockwise,
    CounterClockwise,
}

/// Classify the turn taken at `q` when walking `p -> q -> r`.
///
/// The sign of the cross product `(q - p) x (r - q)` decides: positive is
/// clockwise, negative counterclockwise, exactly zero colinear.
pub fn orientation(p: Coord<f64>, q: Coord<f64>, r: Coord<f64>) -> Orientation {
    let cross = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);

    if cross == 0.0 {
        Orientation::Colinear
    } else if cross > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether `q` lies within the axis-aligned bounding box spanned by `p` and
/// `r`, all four bounds inclusive.
///
/// This is only a bounding-box check. It answers "does `q` lie on the
/// segment `p`-`r`" solely for triples already known colinear via
/// [`orientation`].
pub fn on_segment(p: Coord<f64>, q: Coord<f64>, r: Coord<f64>) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether segments `a1`-`a2` and `b1`-`b2` share at least one point.
pub fn segments_intersect(a1: Coord<f64>, a2: Coord<f64>, b1: Coord<f64>, b2: Coord<f64>) -> bool {
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);

    // General case: each segment's endpoints straddle the other's line.
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Degenerate cases: an endpoint colinear with the other segment counts
    // as an intersection when it falls between that segment's endpoints.
    if o1 == Orientation::Colinear && on_segment(a1, b1, a2) {
        return true;
    }
    if o2 == Orientation::Colinear && on_segment(a1, b2, a2) {
        return true;
    }
    if o3 == Orientation::Colinear && on_segment(b1, a1, b2) {
        return true;
    }
    if o4 == Orientation::Colinear && on_segment(b1, a2, b2) {
        return true;
    }

    false
}
