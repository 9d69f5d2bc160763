//! Cumulative parent orientation along a chain.
//!
//! The running value lives in square space. Curve segments add their end-handle
//! orientation to it; envelope segments replace it with their own absolute
//! end-handle orientation.

use crate::foundation::core::{CubicBez, FrameIndex};
use crate::foundation::error::{DeformError, DeformResult};
use crate::foundation::math::HANDLE_EPSILON;
use crate::geometry::aspect::SceneContext;
use crate::geometry::bezier::estimate_end_tangent_inclination;
use crate::geometry::primitives::{from_polar, translate};
use crate::rig::chain::upstream_segments;
use crate::rig::host::SceneHost;
use crate::rig::model::{SegmentMode, SegmentSnapshot, attr};

/// Square-space control quad of a segment at rest, used for tangent estimation.
///
/// `running` is the square-space orientation accumulated before this segment.
pub fn fallback_quad(ctx: &SceneContext, seg: &SegmentSnapshot, running: f64) -> CubicBez {
    let p0 = ctx.to_square(seg.start);
    let p3 = ctx.to_square(seg.end);
    let h0 = seg.rest.handle0;
    let h1 = seg.rest.handle1;

    let (p1, p2) = match seg.mode {
        SegmentMode::Curve => {
            let parent = ctx.to_field_angle(running);
            let p1 = ctx.to_square(from_polar(h0.length, h0.orientation + parent));
            let p2 = ctx.to_square(from_polar(h1.length, h1.orientation + parent + 180.0));
            (translate(p1, p0), translate(p2, p3))
        }
        SegmentMode::Envelope => {
            let p1 = from_polar(h0.length, h0.orientation);
            let p2 = from_polar(h1.length, h1.orientation + 180.0);
            (translate(p1, p0), translate(p2, p3))
        }
    };
    CubicBez::new(p0, p1, p2, p3)
}

/// Orientation a segment hands down to its successor, before combination.
///
/// A collapsed end handle carries no usable orientation, so the tangent of the
/// rest curve near its end stands in for it. If the rest curve is itself
/// degenerate the result is unreliable.
pub fn handle_contribution(ctx: &SceneContext, seg: &SegmentSnapshot, running: f64) -> f64 {
    let handle = seg.rest.handle1;
    if handle.length <= HANDLE_EPSILON {
        estimate_end_tangent_inclination(&fallback_quad(ctx, seg, running))
    } else {
        handle.orientation
    }
}

/// Fold one segment into the running orientation.
pub fn accumulate(ctx: &SceneContext, running: f64, seg: &SegmentSnapshot) -> f64 {
    let contribution = handle_contribution(ctx, seg, running);
    match seg.mode {
        SegmentMode::Curve => running + contribution,
        SegmentMode::Envelope => ctx.to_square_angle(contribution),
    }
}

/// Square-space parent orientation for the segment following `ancestors`.
///
/// `offset_orientation` is the chain offset's resting orientation in field space;
/// `ancestors` are ordered root to target and exclude the target itself.
pub fn resolve_parent_orientation(
    ctx: &SceneContext,
    offset_orientation: f64,
    ancestors: &[SegmentSnapshot],
) -> f64 {
    ancestors
        .iter()
        .fold(ctx.to_square_angle(offset_orientation), |running, seg| {
            accumulate(ctx, running, seg)
        })
}

/// Resolve the parent orientation of `target` against the live host.
///
/// Ancestors whose mode flag is unresolvable contribute nothing.
pub fn resolve_for_segment<H: SceneHost + ?Sized>(
    host: &H,
    ctx: &SceneContext,
    anchor: &H::Node,
    target: &H::Node,
) -> DeformResult<f64> {
    let offset_orientation = host.value(anchor, FrameIndex::FIRST, attr::RESTING_ORIENTATION)?;
    let mut ancestors = Vec::new();
    for node in upstream_segments(host, target) {
        match host.segment_snapshot(&node) {
            Ok(snapshot) => ancestors.push(snapshot),
            Err(DeformError::UnresolvableMode { node, flag }) => {
                tracing::debug!(ancestor = %node, %flag, "skipped ancestor with unknown mode");
            }
            Err(e) => return Err(e),
        }
    }
    let orient = resolve_parent_orientation(ctx, offset_orientation, &ancestors);
    tracing::debug!(
        ancestors = ancestors.len(),
        offset_orientation,
        orient,
        "resolved parent orientation"
    );
    Ok(orient)
}

#[cfg(test)]
#[path = "../../tests/unit/convert/orientation.rs"]
mod tests;
