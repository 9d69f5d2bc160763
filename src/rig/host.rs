//! The narrow contract between the converter and a scene-graph host.

use std::fmt::Debug;

use crate::foundation::core::{FrameIndex, Point};
use crate::foundation::error::{DeformError, DeformResult};
use crate::geometry::aspect::SceneContext;
use crate::rig::model::{
    AnchorRest, Channel, Handle, NodeKind, SegmentMode, SegmentRest, SegmentSnapshot, attr,
};

/// Read-only view of the host's node graph.
pub trait RigTopology {
    /// Opaque node reference.
    type Node: Clone + Eq + Debug;

    /// Category of `node`.
    fn kind(&self, node: &Self::Node) -> NodeKind;

    /// Display name; empty for unnamed or root nodes.
    fn display_name(&self, node: &Self::Node) -> String;

    /// Node connected to input `port` of `node`, if any.
    fn source(&self, node: &Self::Node, port: usize) -> Option<Self::Node>;

    /// Container holding `node`, if any.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Direct members of a container, in stable host order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;
}

/// Attribute, transform and transaction access on top of [`RigTopology`].
pub trait SceneHost: RigTopology {
    /// Numeric attribute value at `frame`.
    fn value(&self, node: &Self::Node, frame: FrameIndex, attr: &str) -> DeformResult<f64>;

    /// Text attribute value at `frame`.
    fn text(&self, node: &Self::Node, frame: FrameIndex, attr: &str) -> DeformResult<String>;

    /// Write a numeric attribute; animated attributes get a key at `frame`.
    fn set_value(
        &mut self,
        node: &Self::Node,
        attr: &str,
        frame: FrameIndex,
        value: f64,
    ) -> DeformResult<()>;

    /// Write a text attribute.
    fn set_text(
        &mut self,
        node: &Self::Node,
        attr: &str,
        frame: FrameIndex,
        value: &str,
    ) -> DeformResult<()>;

    /// Keyframe times of the column linked to `attr`; empty when not animated.
    fn keyframe_times(&self, node: &Self::Node, attr: &str) -> DeformResult<Vec<FrameIndex>>;

    /// Evaluated start anchor of a segment in field space.
    fn segment_start_point(&self, node: &Self::Node) -> DeformResult<Point>;

    /// Evaluated end anchor of a segment in field space.
    fn segment_end_point(&self, node: &Self::Node) -> DeformResult<Point>;

    /// Scene units aspect ratio, x component.
    fn aspect_ratio_x(&self) -> f64;

    /// Scene units aspect ratio, y component.
    fn aspect_ratio_y(&self) -> f64;

    /// Open an undoable transaction.
    fn begin_batch(&mut self, label: &str);

    /// Close the transaction opened by [`SceneHost::begin_batch`].
    fn end_batch(&mut self);

    /// Show a one-line advisory to the user.
    fn advise(&mut self, message: &str);

    /// Append a line to the host's message log.
    fn trace(&mut self, message: &str);

    /// Validated unit conventions for this scene.
    fn scene_context(&self) -> DeformResult<SceneContext> {
        SceneContext::new(self.aspect_ratio_x(), self.aspect_ratio_y())
    }

    /// Current representation of a segment.
    fn segment_mode(&self, node: &Self::Node) -> DeformResult<SegmentMode> {
        let flag = self.text(node, FrameIndex::FIRST, attr::LOCAL_REFERENTIAL)?;
        SegmentMode::from_flag(&flag)
            .ok_or_else(|| DeformError::unresolvable_mode(self.display_name(node), flag))
    }

    /// The six resting values of a segment.
    fn segment_rest(&self, node: &Self::Node) -> DeformResult<SegmentRest> {
        let read = |c: Channel| self.value(node, FrameIndex::FIRST, c.resting_attr());
        Ok(SegmentRest {
            offset: Point::new(read(Channel::OffsetX)?, read(Channel::OffsetY)?),
            handle0: Handle::new(read(Channel::Length0)?, read(Channel::Orientation0)?),
            handle1: Handle::new(read(Channel::Length1)?, read(Channel::Orientation1)?),
        })
    }

    /// Resting position and orientation of an offset node.
    fn anchor_rest(&self, node: &Self::Node) -> DeformResult<AnchorRest> {
        let f = FrameIndex::FIRST;
        Ok(AnchorRest {
            position: Point::new(
                self.value(node, f, attr::RESTING_OFFSET_X)?,
                self.value(node, f, attr::RESTING_OFFSET_Y)?,
            ),
            orientation: self.value(node, f, attr::RESTING_ORIENTATION)?,
        })
    }

    /// Mode, resting values and evaluated anchors of a segment.
    fn segment_snapshot(&self, node: &Self::Node) -> DeformResult<SegmentSnapshot> {
        Ok(SegmentSnapshot {
            mode: self.segment_mode(node)?,
            rest: self.segment_rest(node)?,
            start: self.segment_start_point(node)?,
            end: self.segment_end_point(node)?,
        })
    }
}
