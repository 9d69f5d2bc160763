/// Handle lengths at or below this are treated as degenerate.
pub(crate) const HANDLE_EPSILON: f64 = 1e-4;

/// Curve parameter used to sample a tangent just short of the segment end.
pub(crate) const TANGENT_SAMPLE_T: f64 = 0.99999999;

pub(crate) const FULL_TURN_DEG: f64 = 360.0;

/// Shift `principal` by whole turns so it lands on the representative nearest to `reference`.
pub(crate) fn match_winding(principal: f64, reference: f64) -> f64 {
    let turns = ((reference - principal) / FULL_TURN_DEG).round();
    principal + turns * FULL_TURN_DEG
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
