//! Field/square space conversion.
//!
//! Field space is the scene's native coordinate system, whose units may be
//! non-square. Square space rescales the y axis so that angles and lengths are
//! isotropic; all trigonometry that must preserve angles happens there.

use crate::foundation::core::Point;
use crate::foundation::error::{DeformError, DeformResult};
use crate::foundation::math::match_winding;

/// Scene-wide unit conventions threaded through every conversion call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneContext {
    /// Horizontal units aspect ratio reported by the host.
    pub aspect_x: f64,
    /// Vertical units aspect ratio reported by the host.
    pub aspect_y: f64,
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::square()
    }
}

impl SceneContext {
    /// Build a validated context from the host's units aspect ratios.
    pub fn new(aspect_x: f64, aspect_y: f64) -> DeformResult<Self> {
        let ctx = Self { aspect_x, aspect_y };
        ctx.validate()?;
        Ok(ctx)
    }

    /// Context for square units (field space equals square space).
    pub const fn square() -> Self {
        Self {
            aspect_x: 1.0,
            aspect_y: 1.0,
        }
    }

    /// Reject non-finite or non-positive aspect ratios.
    pub fn validate(&self) -> DeformResult<()> {
        for (name, v) in [("aspect_x", self.aspect_x), ("aspect_y", self.aspect_y)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(DeformError::validation(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
        }
        Ok(())
    }

    /// `aspect_x / aspect_y`.
    pub fn ratio(&self) -> f64 {
        self.aspect_x / self.aspect_y
    }

    /// Map a field-space point into square space.
    pub fn to_square(&self, p: Point) -> Point {
        Point::new(p.x, p.y / self.ratio())
    }

    /// Map a square-space point into field space.
    pub fn to_field(&self, p: Point) -> Point {
        Point::new(p.x, p.y * self.ratio())
    }

    /// Map a field-space orientation (degrees) into square space, keeping its winding.
    pub fn to_square_angle(&self, orient: f64) -> f64 {
        rescale_angle(orient, 1.0 / self.ratio())
    }

    /// Map a square-space orientation (degrees) into field space, keeping its winding.
    pub fn to_field_angle(&self, orient: f64) -> f64 {
        rescale_angle(orient, self.ratio())
    }
}

// Scaling y preserves the quadrant, so the principal result is always within a
// quarter turn of the input and the nearest winding is the original one.
fn rescale_angle(orient: f64, y_scale: f64) -> f64 {
    let rad = orient.to_radians();
    let principal = (rad.sin() * y_scale).atan2(rad.cos()).to_degrees();
    match_winding(principal, orient)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/aspect.rs"]
mod tests;
