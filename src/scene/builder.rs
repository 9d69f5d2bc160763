use crate::foundation::core::{FrameIndex, Point};
use crate::foundation::error::{DeformError, DeformResult};
use crate::geometry::aspect::SceneContext;
use crate::rig::model::{Channel, NodeKind, SegmentMode, SegmentRest, attr};
use crate::scene::document::{NodeDef, RigDocument};
use crate::scene::memory::MemoryScene;

/// Path of the group every built rig is rooted in.
pub const ROOT_GROUP: &str = "Top";

/// Fluent construction of a [`RigDocument`].
///
/// Paths are `/`-separated; a node's container is its path minus the last
/// component, and must be added before it.
pub struct RigBuilder {
    doc: RigDocument,
}

impl RigBuilder {
    /// Empty rig holding only the [`ROOT_GROUP`].
    pub fn new(scene: SceneContext) -> Self {
        let mut doc = RigDocument {
            scene,
            ..RigDocument::default()
        };
        doc.nodes
            .insert(ROOT_GROUP.to_string(), NodeDef::new(NodeKind::Group));
        Self { doc }
    }

    /// Add an arbitrary node; its container is derived from `path` when unset.
    pub fn node(mut self, path: impl Into<String>, mut def: NodeDef) -> DeformResult<Self> {
        let path = path.into();
        if self.doc.nodes.contains_key(&path) {
            return Err(DeformError::validation(format!("duplicate node path '{path}'")));
        }
        if def.parent.is_none() {
            def.parent = path.rsplit_once('/').map(|(p, _)| p.to_string());
        }
        self.doc.nodes.insert(path, def);
        Ok(self)
    }

    /// Add a group.
    pub fn group(self, path: impl Into<String>) -> DeformResult<Self> {
        self.node(path, NodeDef::new(NodeKind::Group))
    }

    /// Add an offset node at rest `position` (field space) and `orientation` (degrees).
    pub fn offset(
        self,
        path: impl Into<String>,
        position: Point,
        orientation: f64,
    ) -> DeformResult<Self> {
        let mut def = NodeDef::new(NodeKind::Offset);
        def.attrs
            .insert(attr::RESTING_OFFSET_X.to_string(), position.x);
        def.attrs
            .insert(attr::RESTING_OFFSET_Y.to_string(), position.y);
        def.attrs
            .insert(attr::RESTING_ORIENTATION.to_string(), orientation);
        self.node(path, def)
    }

    /// Add a segment wired to `source` on its chain input.
    pub fn segment(
        self,
        path: impl Into<String>,
        source: impl Into<String>,
        mode: SegmentMode,
        rest: SegmentRest,
    ) -> DeformResult<Self> {
        let mut def = NodeDef::new(NodeKind::Segment);
        def.sources.push(Some(source.into()));
        def.text
            .insert(attr::LOCAL_REFERENTIAL.to_string(), mode.flag().to_string());
        def.text.insert(
            attr::CLOSE_PATH.to_string(),
            attr::CLOSE_PATH_OFF.to_string(),
        );
        for channel in Channel::ALL {
            def.attrs.insert(
                channel.resting_attr().to_string(),
                rest.channel_value(channel),
            );
        }
        self.node(path, def)
    }

    /// Add a curve-mode segment.
    pub fn curve(
        self,
        path: impl Into<String>,
        source: impl Into<String>,
        rest: SegmentRest,
    ) -> DeformResult<Self> {
        self.segment(path, source, SegmentMode::Curve, rest)
    }

    /// Add an envelope-mode segment.
    pub fn envelope(
        self,
        path: impl Into<String>,
        source: impl Into<String>,
        rest: SegmentRest,
    ) -> DeformResult<Self> {
        self.segment(path, source, SegmentMode::Envelope, rest)
    }

    /// Key an animated attribute of an existing node.
    pub fn keys(mut self, path: &str, attr: &str, keys: &[(u64, f64)]) -> DeformResult<Self> {
        let def = self
            .doc
            .nodes
            .get_mut(path)
            .ok_or_else(|| DeformError::validation(format!("keys for unknown node '{path}'")))?;
        let channel = def.channels.entry(attr.to_string()).or_default();
        for (frame, value) in keys {
            channel.insert(FrameIndex(*frame), *value);
        }
        Ok(self)
    }

    /// Set a text attribute of an existing node.
    pub fn text(mut self, path: &str, attr: &str, value: &str) -> DeformResult<Self> {
        let def = self
            .doc
            .nodes
            .get_mut(path)
            .ok_or_else(|| DeformError::validation(format!("text for unknown node '{path}'")))?;
        def.text.insert(attr.to_string(), value.to_string());
        Ok(self)
    }

    /// Validate and return the document.
    pub fn build(self) -> DeformResult<RigDocument> {
        self.doc.validate()?;
        Ok(self.doc)
    }

    /// Validate and wrap the document in a [`MemoryScene`].
    pub fn build_scene(self) -> DeformResult<MemoryScene> {
        MemoryScene::new(self.build()?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
