//! Per-segment conversion planning.
//!
//! All host reads for a segment happen while building its [`ConversionPlan`];
//! the plan is then applied as a flat list of attribute writes.

use crate::convert::keyframes::{ChannelWrites, channel_writes, collect_keyframes};
use crate::convert::orientation::resolve_for_segment;
use crate::convert::segment::convert_snapshot;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{DeformError, DeformResult};
use crate::geometry::aspect::SceneContext;
use crate::rig::chain::{direct_offset, find_offset_anchor};
use crate::rig::host::SceneHost;
use crate::rig::model::{AnchorRest, Channel, SegmentMode, SegmentRest, attr};

/// Value carried by an [`AttrWrite`].
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// Numeric attribute.
    Number(f64),
    /// Text attribute (flags).
    Text(&'static str),
}

/// One attribute write against the host.
#[derive(Clone, Debug, PartialEq)]
pub struct AttrWrite<N> {
    /// Target node.
    pub node: N,
    /// Host attribute name.
    pub attr: &'static str,
    /// Frame the value is written at.
    pub frame: FrameIndex,
    /// Value to write.
    pub value: AttrValue,
}

/// Offset node wired directly upstream of a segment, held static across the switch.
#[derive(Clone, Debug, PartialEq)]
pub struct FrozenAnchor<N> {
    /// The offset node.
    pub node: N,
    /// Its resting values, copied onto every keyframe.
    pub rest: AnchorRest,
}

/// Everything needed to convert one segment, computed before any write.
#[derive(Clone, Debug)]
pub struct ConversionPlan<N> {
    /// Segment being converted.
    pub node: N,
    /// Representation before conversion.
    pub from: SegmentMode,
    /// Representation after conversion.
    pub to: SegmentMode,
    /// Resolved square-space parent orientation.
    pub parent_orientation: f64,
    /// New resting values.
    pub values: SegmentRest,
    /// Union of keyframe times the values are propagated to.
    pub frames: Vec<FrameIndex>,
    /// Per-channel animated writes.
    pub channels: ChannelWrites,
    /// Directly upstream offset node, if any.
    pub anchor: Option<FrozenAnchor<N>>,
}

impl<N: Clone> ConversionPlan<N> {
    /// Flatten the plan into host writes, in application order.
    pub fn writes(&self) -> Vec<AttrWrite<N>> {
        let mut out = Vec::new();
        let mut push = |node: &N, attr: &'static str, frame: FrameIndex, value: AttrValue| {
            out.push(AttrWrite {
                node: node.clone(),
                attr,
                frame,
                value,
            });
        };

        if let Some(anchor) = &self.anchor {
            let n = &anchor.node;
            push(
                n,
                attr::LOCAL_REFERENTIAL,
                FrameIndex::FIRST,
                AttrValue::Text(self.to.flag()),
            );
            for f in &self.frames {
                push(n, attr::OFFSET_X, *f, AttrValue::Number(anchor.rest.position.x));
                push(n, attr::OFFSET_Y, *f, AttrValue::Number(anchor.rest.position.y));
                push(n, attr::ORIENTATION, *f, AttrValue::Number(anchor.rest.orientation));
            }
        }

        let n = &self.node;
        if self.to == SegmentMode::Curve {
            push(
                n,
                attr::CLOSE_PATH,
                FrameIndex::FIRST,
                AttrValue::Text(attr::CLOSE_PATH_OFF),
            );
        }
        push(
            n,
            attr::LOCAL_REFERENTIAL,
            FrameIndex::FIRST,
            AttrValue::Text(self.to.flag()),
        );
        for channel in Channel::ALL {
            push(
                n,
                channel.resting_attr(),
                FrameIndex::FIRST,
                AttrValue::Number(self.values.channel_value(channel)),
            );
        }
        for (channel, keys) in &self.channels {
            for (f, v) in keys {
                push(n, channel.animated_attr(), *f, AttrValue::Number(*v));
            }
        }
        out
    }

    /// Apply every write through the host.
    pub fn apply<H>(&self, host: &mut H) -> DeformResult<()>
    where
        H: SceneHost<Node = N> + ?Sized,
    {
        for w in self.writes() {
            match w.value {
                AttrValue::Number(v) => host.set_value(&w.node, w.attr, w.frame, v)?,
                AttrValue::Text(t) => host.set_text(&w.node, w.attr, w.frame, t)?,
            }
        }
        Ok(())
    }
}

/// Read everything needed to convert `node` and compute its new values.
pub fn plan_conversion<H: SceneHost + ?Sized>(
    host: &H,
    ctx: &SceneContext,
    node: &H::Node,
) -> DeformResult<ConversionPlan<H::Node>> {
    let from = host.segment_mode(node)?;
    let anchor_node = find_offset_anchor(host, node)
        .ok_or_else(|| DeformError::missing_offset_anchor(host.display_name(node)))?;

    let parent_orientation = resolve_for_segment(host, ctx, &anchor_node, node)?;
    let snapshot = host.segment_snapshot(node)?;
    let frames = collect_keyframes(host, node)?;
    let anchor = direct_offset(host, node)
        .map(|n| host.anchor_rest(&n).map(|rest| FrozenAnchor { node: n, rest }))
        .transpose()?;

    let (to, values) = convert_snapshot(ctx, &snapshot, parent_orientation);
    debug_assert_eq!(from, snapshot.mode);

    Ok(ConversionPlan {
        node: node.clone(),
        from,
        to,
        parent_orientation,
        values,
        channels: channel_writes(&values, &frames),
        frames,
        anchor,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/convert/plan.rs"]
mod tests;
