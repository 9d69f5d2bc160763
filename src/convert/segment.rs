//! The two inverse re-parameterizations of a single segment.

use crate::foundation::core::Point;
use crate::foundation::math::match_winding;
use crate::geometry::aspect::SceneContext;
use crate::geometry::primitives::{from_polar, to_polar, translate};
use crate::rig::model::{Handle, SegmentMode, SegmentRest, SegmentSnapshot};

/// Re-express a curve segment's resting values in absolute field space.
///
/// The new offset is the evaluated end anchor. Each handle endpoint is rebuilt
/// in square space by rotating the stored orientation by `parent_orient`
/// (square-space degrees) from its anchor, then measured back in field space.
/// Orientations keep the whole turns of the stored values.
pub fn curve_to_envelope(
    ctx: &SceneContext,
    seg: &SegmentSnapshot,
    parent_orient: f64,
) -> SegmentRest {
    let p0_f = seg.start;
    let p3_f = seg.end;

    let absolute = |anchor_f: Point, h: Handle| -> Handle {
        let anchor = ctx.to_square(anchor_f);
        let tip = translate(from_polar(h.length, h.orientation + parent_orient), anchor);
        let (length, measured) = to_polar(anchor_f, ctx.to_field(tip));
        let winding = ctx.to_field_angle(h.orientation + parent_orient);
        Handle::new(length, rewind(length, measured, winding))
    };

    SegmentRest {
        offset: p3_f,
        handle0: absolute(p0_f, seg.rest.handle0),
        handle1: absolute(p3_f, seg.rest.handle1),
    }
}

/// Re-express an envelope segment's resting values relative to `parent_orient`.
///
/// The stored absolute offset is measured from the start anchor in square space
/// and rotated back by the parent orientation; handles are treated the same way
/// about the origin. Orientations keep the whole turns of the stored values.
pub fn envelope_to_curve(
    ctx: &SceneContext,
    seg: &SegmentSnapshot,
    parent_orient: f64,
) -> SegmentRest {
    let p0 = ctx.to_square(seg.start);
    let p3 = ctx.to_square(seg.rest.offset);
    let (length, orient) = to_polar(p0, p3);
    let offset = from_polar(length, orient - parent_orient);

    let relative = |h: Handle| -> Handle {
        let tip = ctx.to_square(from_polar(h.length, h.orientation));
        let (length, measured) = to_polar(Point::ORIGIN, tip);
        let winding = ctx.to_square_angle(h.orientation) - parent_orient;
        Handle::new(length, rewind(length, measured - parent_orient, winding))
    };

    SegmentRest {
        offset,
        handle0: relative(seg.rest.handle0),
        handle1: relative(seg.rest.handle1),
    }
}

const COLLAPSED_LENGTH: f64 = 1e-9;

// Measured angles are principal values; stored ones keep their turns. A
// collapsed handle has no direction of its own and keeps the stored one.
fn rewind(length: f64, measured: f64, winding: f64) -> f64 {
    if length <= COLLAPSED_LENGTH {
        winding
    } else {
        match_winding(measured, winding)
    }
}

/// Convert a segment to the other representation.
///
/// Returns the target mode with the new resting values.
pub fn convert_snapshot(
    ctx: &SceneContext,
    seg: &SegmentSnapshot,
    parent_orient: f64,
) -> (SegmentMode, SegmentRest) {
    match seg.mode {
        SegmentMode::Curve => (
            SegmentMode::Envelope,
            curve_to_envelope(ctx, seg, parent_orient),
        ),
        SegmentMode::Envelope => (
            SegmentMode::Curve,
            envelope_to_curve(ctx, seg, parent_orient),
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/segment.rs"]
mod tests;
