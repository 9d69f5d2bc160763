//! Bernstein-basis evaluation and end-tangent estimation.

use crate::foundation::core::{CubicBez, Point};
use crate::foundation::math::TANGENT_SAMPLE_T;
use crate::geometry::primitives::inclination;

/// `n choose k` as a float; zero when `k > n`.
///
/// Exact while the result fits in 53 bits; large degrees lose precision
/// instead of overflowing.
pub fn binomial_coefficient(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * f64::from(n - i) / f64::from(i + 1))
}

/// Evaluate a scalar Bézier of degree `control.len() - 1` at `t`.
///
/// `t` may sit arbitrarily close to 1; no derivative is taken.
pub fn evaluate_bernstein(control: &[f64], t: f64) -> f64 {
    let Some(degree) = control.len().checked_sub(1) else {
        return 0.0;
    };
    let n = degree as u32;
    control
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let i = i as u32;
            binomial_coefficient(n, i)
                * (1.0 - t).powi((n - i) as i32)
                * t.powi(i as i32)
                * v
        })
        .sum()
}

/// Point-valued counterpart of [`evaluate_bernstein`].
pub fn evaluate_bernstein_point(control: &[Point], t: f64) -> Point {
    let xs: Vec<f64> = control.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = control.iter().map(|p| p.y).collect();
    Point::new(evaluate_bernstein(&xs, t), evaluate_bernstein(&ys, t))
}

/// Tangent inclination (degrees) of `quad` at parameter `t`.
///
/// Evaluates the two quadratic sub-curves `{p0,p1,p2}` and `{p1,p2,p3}` at `t`
/// and measures the direction between them.
pub fn tangent_inclination_at(quad: &CubicBez, t: f64) -> f64 {
    let lead = evaluate_bernstein_point(&[quad.p0, quad.p1, quad.p2], t);
    let trail = evaluate_bernstein_point(&[quad.p1, quad.p2, quad.p3], t);
    inclination(lead, trail)
}

/// Tangent inclination just short of the end of `quad`.
///
/// Used when the end handle has collapsed and its stored orientation is
/// meaningless. Coincident control points yield an unreliable angle.
pub fn estimate_end_tangent_inclination(quad: &CubicBez) -> f64 {
    tangent_inclination_at(quad, TANGENT_SAMPLE_T)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bezier.rs"]
mod tests;
