//! Point arithmetic used by the converter. Angles are in degrees.

use crate::foundation::core::{Point, Vec2};

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Polar angle of the vector `a -> b` in degrees, in `(-180, 180]`.
#[inline]
pub fn inclination(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x).to_degrees()
}

/// Point at `length` along `angle_deg` from the origin.
#[inline]
pub fn from_polar(length: f64, angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(length * rad.cos(), length * rad.sin())
}

/// Re-parent `child` (expressed relative to the origin) into a frame centered at `parent`.
#[inline]
pub fn translate(child: Point, parent: Point) -> Point {
    parent + child.to_vec2()
}

/// Length/orientation pair of `p` measured from `anchor`.
#[inline]
pub fn to_polar(anchor: Point, p: Point) -> (f64, f64) {
    (distance(anchor, p), inclination(anchor, p))
}

/// Vector counterpart of [`from_polar`].
#[inline]
pub(crate) fn polar_vec(length: f64, angle_deg: f64) -> Vec2 {
    from_polar(length, angle_deg).to_vec2()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/primitives.rs"]
mod tests;
