//! In-memory [`SceneHost`] backed by a [`RigDocument`].

use std::collections::BTreeMap;

use crate::foundation::core::{FrameIndex, Point};
use crate::foundation::error::{DeformError, DeformResult};
use crate::rig::chain::{find_offset_anchor, upstream_segments};
use crate::rig::host::{RigTopology, SceneHost};
use crate::rig::model::{AnchorRest, NodeKind};
use crate::rig::pose::{SegmentPose, solve_links};
use crate::scene::document::{NodeDef, RigDocument};

/// A scene host that keeps the whole rig in memory.
///
/// Nodes are addressed by document path. Transform queries are answered by
/// solving the rest pose of the node's chain.
#[derive(Clone, Debug)]
pub struct MemoryScene {
    doc: RigDocument,
    open_batch: Option<String>,
    batches: Vec<String>,
    advisories: Vec<String>,
    traces: Vec<String>,
}

impl MemoryScene {
    /// Wrap a validated document.
    pub fn new(doc: RigDocument) -> DeformResult<Self> {
        doc.validate()?;
        Ok(Self {
            doc,
            open_batch: None,
            batches: Vec::new(),
            advisories: Vec::new(),
            traces: Vec::new(),
        })
    }

    /// The backing document.
    pub fn document(&self) -> &RigDocument {
        &self.doc
    }

    /// Unwrap the backing document.
    pub fn into_document(self) -> RigDocument {
        self.doc
    }

    /// Labels of every closed transaction, oldest first.
    pub fn batches(&self) -> &[String] {
        &self.batches
    }

    /// Advisories shown so far.
    pub fn advisories(&self) -> &[String] {
        &self.advisories
    }

    /// Message-log lines written so far.
    pub fn traces(&self) -> &[String] {
        &self.traces
    }

    /// Paths of all nodes without a container.
    pub fn roots(&self) -> Vec<String> {
        self.doc
            .nodes
            .iter()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Paths of all segment nodes.
    pub fn segments(&self) -> Vec<String> {
        self.doc
            .nodes
            .iter()
            .filter(|(_, n)| n.kind == NodeKind::Segment)
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Rest pose of one segment in field space.
    ///
    /// Upstream segments with an unknown mode are placed as curves and hand
    /// down no orientation; the segment's own mode must resolve.
    pub fn pose(&self, node: &str) -> DeformResult<SegmentPose> {
        let def = self.def(node)?;
        if def.kind != NodeKind::Segment {
            return Err(DeformError::host(format!("node '{node}' is not a segment")));
        }
        let node = node.to_string();
        let anchor = match find_offset_anchor(self, &node) {
            Some(a) => self.anchor_rest(&a)?,
            None => AnchorRest::default(),
        };

        let mut chain = upstream_segments(self, &node);
        chain.push(node.clone());
        let links = chain
            .iter()
            .map(|n| {
                let mode = match self.segment_mode(n) {
                    Ok(mode) => Some(mode),
                    Err(DeformError::UnresolvableMode { .. }) if *n != node => None,
                    Err(e) => return Err(e),
                };
                Ok((mode, self.segment_rest(n)?))
            })
            .collect::<DeformResult<Vec<_>>>()?;

        let ctx = self.scene_context()?;
        solve_links(&ctx, &anchor, &links)
            .pop()
            .ok_or_else(|| DeformError::host(format!("segment '{node}' did not solve")))
    }

    /// Rest poses of every segment that can be solved.
    pub fn poses(&self) -> BTreeMap<String, SegmentPose> {
        let mut out = BTreeMap::new();
        for path in self.segments() {
            match self.pose(&path) {
                Ok(p) => {
                    out.insert(path, p);
                }
                Err(e) => tracing::debug!(segment = %path, error = %e, "pose unavailable"),
            }
        }
        out
    }

    fn def(&self, node: &str) -> DeformResult<&NodeDef> {
        self.doc
            .nodes
            .get(node)
            .ok_or_else(|| DeformError::host(format!("unknown node '{node}'")))
    }

    fn def_mut(&mut self, node: &str) -> DeformResult<&mut NodeDef> {
        self.doc
            .nodes
            .get_mut(node)
            .ok_or_else(|| DeformError::host(format!("unknown node '{node}'")))
    }
}

fn sample(keys: &BTreeMap<FrameIndex, f64>, frame: FrameIndex) -> Option<f64> {
    keys.range(..=frame)
        .next_back()
        .or_else(|| keys.iter().next())
        .map(|(_, v)| *v)
}

impl RigTopology for MemoryScene {
    type Node = String;

    fn kind(&self, node: &String) -> NodeKind {
        self.doc
            .nodes
            .get(node)
            .map(|n| n.kind)
            .unwrap_or(NodeKind::Other)
    }

    fn display_name(&self, node: &String) -> String {
        self.doc.display_name(node)
    }

    fn source(&self, node: &String, port: usize) -> Option<String> {
        self.doc
            .nodes
            .get(node)?
            .sources
            .get(port)?
            .clone()
            .filter(|src| self.doc.nodes.contains_key(src))
    }

    fn parent(&self, node: &String) -> Option<String> {
        self.doc.nodes.get(node)?.parent.clone()
    }

    fn children(&self, node: &String) -> Vec<String> {
        self.doc
            .nodes
            .iter()
            .filter(|(_, n)| n.parent.as_ref() == Some(node))
            .map(|(path, _)| path.clone())
            .collect()
    }
}

impl SceneHost for MemoryScene {
    fn value(&self, node: &String, frame: FrameIndex, attr: &str) -> DeformResult<f64> {
        let def = self.def(node)?;
        if let Some(v) = def.attrs.get(attr) {
            return Ok(*v);
        }
        def.channels
            .get(attr)
            .and_then(|keys| sample(keys, frame))
            .ok_or_else(|| DeformError::host(format!("node '{node}' has no attribute '{attr}'")))
    }

    fn text(&self, node: &String, _frame: FrameIndex, attr: &str) -> DeformResult<String> {
        self.def(node)?
            .text
            .get(attr)
            .cloned()
            .ok_or_else(|| DeformError::host(format!("node '{node}' has no text attribute '{attr}'")))
    }

    fn set_value(
        &mut self,
        node: &String,
        attr: &str,
        frame: FrameIndex,
        value: f64,
    ) -> DeformResult<()> {
        if !frame.is_valid() {
            return Err(DeformError::validation("frames start at 1"));
        }
        let def = self.def_mut(node)?;
        match def.attrs.get_mut(attr) {
            Some(slot) => *slot = value,
            None => {
                def.channels
                    .entry(attr.to_string())
                    .or_default()
                    .insert(frame, value);
            }
        }
        Ok(())
    }

    fn set_text(
        &mut self,
        node: &String,
        attr: &str,
        _frame: FrameIndex,
        value: &str,
    ) -> DeformResult<()> {
        self.def_mut(node)?
            .text
            .insert(attr.to_string(), value.to_string());
        Ok(())
    }

    fn keyframe_times(&self, node: &String, attr: &str) -> DeformResult<Vec<FrameIndex>> {
        Ok(self
            .def(node)?
            .channels
            .get(attr)
            .map(|keys| keys.keys().copied().collect())
            .unwrap_or_default())
    }

    fn segment_start_point(&self, node: &String) -> DeformResult<Point> {
        self.pose(node).map(|p| p.start)
    }

    fn segment_end_point(&self, node: &String) -> DeformResult<Point> {
        self.pose(node).map(|p| p.end)
    }

    fn aspect_ratio_x(&self) -> f64 {
        self.doc.scene.aspect_x
    }

    fn aspect_ratio_y(&self) -> f64 {
        self.doc.scene.aspect_y
    }

    fn begin_batch(&mut self, label: &str) {
        if let Some(prev) = self.open_batch.replace(label.to_string()) {
            tracing::warn!(previous = %prev, "batch opened while another was open");
        }
    }

    fn end_batch(&mut self) {
        match self.open_batch.take() {
            Some(label) => self.batches.push(label),
            None => tracing::warn!("end_batch without an open batch"),
        }
    }

    fn advise(&mut self, message: &str) {
        self.advisories.push(message.to_string());
    }

    fn trace(&mut self, message: &str) {
        self.traces.push(message.to_string());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/memory.rs"]
mod tests;
