//! Rest-pose evaluation of a chain in field space.
//!
//! Hosts normally evaluate segment transforms themselves; this solver gives the
//! in-memory scene the same answers and lets callers measure how far control
//! points move across a conversion.

use crate::convert::orientation::accumulate;
use crate::foundation::core::{CubicBez, Point};
use crate::geometry::aspect::SceneContext;
use crate::geometry::primitives::{from_polar, polar_vec, to_polar, translate};
use crate::rig::model::{AnchorRest, SegmentMode, SegmentRest, SegmentSnapshot};

/// Field-space control points of one segment at rest.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentPose {
    /// Start anchor.
    pub start: Point,
    /// Tip of the start handle.
    pub handle0: Point,
    /// Tip of the end handle.
    pub handle1: Point,
    /// End anchor.
    pub end: Point,
}

impl SegmentPose {
    /// The pose as a cubic Bézier.
    pub fn to_cubic(&self) -> CubicBez {
        CubicBez::new(self.start, self.handle0, self.handle1, self.end)
    }

    /// Largest distance between corresponding control points.
    pub fn max_deviation(&self, other: &SegmentPose) -> f64 {
        [
            self.start.distance(other.start),
            self.handle0.distance(other.handle0),
            self.handle1.distance(other.handle1),
            self.end.distance(other.end),
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

/// Evaluate every segment of a chain rooted at `anchor`, root first.
pub fn solve_chain(
    ctx: &SceneContext,
    anchor: &AnchorRest,
    links: &[(SegmentMode, SegmentRest)],
) -> Vec<SegmentPose> {
    let links: Vec<_> = links.iter().map(|&(mode, rest)| (Some(mode), rest)).collect();
    solve_links(ctx, anchor, &links)
}

/// [`solve_chain`] for chains that may hold links of unknown mode.
///
/// An unknown link is placed like a curve segment and leaves the running
/// orientation untouched.
pub(crate) fn solve_links(
    ctx: &SceneContext,
    anchor: &AnchorRest,
    links: &[(Option<SegmentMode>, SegmentRest)],
) -> Vec<SegmentPose> {
    let mut running = ctx.to_square_angle(anchor.orientation);
    let mut start = anchor.position;
    let mut poses = Vec::with_capacity(links.len());

    for &(mode, rest) in links {
        let h0 = rest.handle0;
        let h1 = rest.handle1;
        let pose = match mode.unwrap_or(SegmentMode::Curve) {
            SegmentMode::Curve => {
                let s = ctx.to_square(start);
                let (len, orient) = to_polar(Point::ORIGIN, rest.offset);
                let e = translate(from_polar(len, orient + running), s);
                let tip0 = s + polar_vec(h0.length, h0.orientation + running);
                let tip1 = e - polar_vec(h1.length, h1.orientation + running);
                SegmentPose {
                    start,
                    handle0: ctx.to_field(tip0),
                    handle1: ctx.to_field(tip1),
                    end: ctx.to_field(e),
                }
            }
            SegmentMode::Envelope => SegmentPose {
                start,
                handle0: start + polar_vec(h0.length, h0.orientation),
                handle1: rest.offset - polar_vec(h1.length, h1.orientation),
                end: rest.offset,
            },
        };

        if let Some(mode) = mode {
            let snapshot = SegmentSnapshot {
                mode,
                rest,
                start: pose.start,
                end: pose.end,
            };
            running = accumulate(ctx, running, &snapshot);
        }
        start = pose.end;
        poses.push(pose);
    }
    poses
}

#[cfg(test)]
#[path = "../../tests/unit/rig/pose.rs"]
mod tests;
