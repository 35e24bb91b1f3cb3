//! Geometry helpers on top of `kurbo`, plus the number formatting used for
//! every numeric attribute the drawers write.

use kurbo::{Point, Rect, Vec2};
use std::f64::consts::TAU;
use std::fmt::Write;

/// Wrap an angle in radians into `[0, 2π)`.
pub fn bound_radian(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// The point at `angle` (radians) and distance `radius` from `center`.
pub fn point_at_angle(center: Point, angle: f64, radius: f64) -> Point {
    center + Vec2::from_angle(angle) * radius
}

/// Axis-aligned bounding box of all `points`, `None` when empty.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
    )
}

/// Serialize points as an SVG `points` list: `"x,y "` per point.
pub fn points_string(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    for p in points {
        let _ = write!(out, "{},{} ", fmt_num(p.x), fmt_num(p.y));
    }
    out
}

/// Format a number for an attribute value.
///
/// Rounded to 9 decimals so trigonometric noise (`1.2e-15`) prints as `0`,
/// `-0` is normalized, and integral values print without a fraction.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let scaled = v * 1e9;
    // too large to carry nine decimals anyway
    if !scaled.is_finite() {
        return format!("{v}");
    }
    let r = scaled.round() / 1e9;
    let r = if r == 0.0 { 0.0 } else { r };
    format!("{r}")
}
