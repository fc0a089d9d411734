//! Pure geometry on outline segments.
//!
//! Splits return the leading sub-curve `[0, t]` of a segment as the control point(s) and end
//! point that follow the unchanged start point. Curve lengths are polyline approximations: the
//! split end points at [`LENGTH_SAMPLES`] evenly spaced parameters are joined by chords. They only
//! pace the animation and are rounded up to whole pixels by the preprocessor.

use kurbo::Point;

/// Number of parameter samples (including both ends) used by sampled curve lengths.
pub const LENGTH_SAMPLES: usize = 10;

/// Linear interpolation `(1 - t) * a + t * b`. Not clamped.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    ((1.0 - t) * a) + (t * b)
}

/// Component-wise [`lerp`] between two points.
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Leading sub-curve of a quadratic Bezier as `(control, end)`.
///
/// `t >= 1` returns the original `(control, p1)`; `t <= 0` collapses to `(p0, p0)`.
pub fn quadratic_split(p0: Point, control: Point, p1: Point, t: f64) -> (Point, Point) {
    if t >= 1.0 {
        return (control, p1);
    }
    if t <= 0.0 {
        return (p0, p0);
    }
    let a = lerp_point(p0, control, t);
    let b = lerp_point(control, p1, t);
    (a, lerp_point(a, b, t))
}

/// Leading sub-curve of a cubic Bezier as `(control0, control1, end)`.
///
/// Boundary behavior matches [`quadratic_split`].
pub fn bezier_split(
    p0: Point,
    c0: Point,
    c1: Point,
    p1: Point,
    t: f64,
) -> (Point, Point, Point) {
    if t >= 1.0 {
        return (c0, c1, p1);
    }
    if t <= 0.0 {
        return (p0, p0, p0);
    }
    let a = lerp_point(p0, c0, t);
    let b = lerp_point(c0, c1, t);
    let c = lerp_point(c1, p1, t);
    let ab = lerp_point(a, b, t);
    let bc = lerp_point(b, c, t);
    (a, ab, lerp_point(ab, bc, t))
}

/// Euclidean distance between two points.
pub fn line_length(p0: Point, p1: Point) -> f64 {
    p0.distance(p1)
}

/// Sampled length of a quadratic Bezier.
pub fn quadratic_length(p0: Point, control: Point, p1: Point) -> f64 {
    sampled_length(p0, |t| quadratic_split(p0, control, p1, t).1)
}

/// Sampled length of a cubic Bezier.
pub fn bezier_length(p0: Point, c0: Point, c1: Point, p1: Point) -> f64 {
    sampled_length(p0, |t| bezier_split(p0, c0, c1, p1, t).2)
}

fn sampled_length(start: Point, end_at: impl Fn(f64) -> Point) -> f64 {
    let last = (LENGTH_SAMPLES - 1) as f64;
    (0..LENGTH_SAMPLES)
        .map(|i| end_at(i as f64 / last))
        .fold((start, 0.0), |(prev, acc), p| (p, acc + prev.distance(p)))
        .1
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/primitives.rs"]
mod tests;
