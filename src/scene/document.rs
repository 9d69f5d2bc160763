use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{DeformError, DeformResult};
use crate::geometry::aspect::SceneContext;
use crate::rig::model::NodeKind;

/// JSON-facing description of a rig scene.
///
/// Nodes are keyed by their full path (`"Top/Arm/Curve_1"`); the last path
/// component is the display name unless `name` overrides it.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RigDocument {
    /// Scene units aspect ratio.
    #[serde(default)]
    pub scene: SceneContext,
    /// Nodes keyed by path.
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeDef>,
}

/// One node of a [`RigDocument`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeDef {
    /// Node category.
    pub kind: NodeKind,
    /// Display name override; an empty string marks an unnamed node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Path of the containing group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Upstream node paths by input port.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Option<String>>,
    /// Resting (frame-independent) numeric attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, f64>,
    /// Text attributes and flags.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub text: BTreeMap<String, String>,
    /// Keyframed numeric attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub channels: BTreeMap<String, BTreeMap<FrameIndex, f64>>,
}

impl NodeDef {
    /// Empty node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            name: None,
            parent: None,
            sources: Vec::new(),
            attrs: BTreeMap::new(),
            text: BTreeMap::new(),
            channels: BTreeMap::new(),
        }
    }
}

impl RigDocument {
    /// Parse a rig document from a JSON reader.
    pub fn from_reader<R: Read>(r: R) -> DeformResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| DeformError::serde(format!("parse rig JSON: {e}")))
    }

    /// Parse a rig document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> DeformResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open rig JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Write the document as pretty JSON.
    pub fn to_writer<W: Write>(&self, w: W) -> DeformResult<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|e| DeformError::serde(format!("write rig JSON: {e}")))
    }

    /// Write the document to a JSON file on disk.
    pub fn save(&self, path: impl AsRef<Path>) -> DeformResult<()> {
        let path = path.as_ref();
        let f = File::create(path)
            .with_context(|| format!("create rig JSON '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        self.to_writer(&mut w)?;
        w.flush()
            .with_context(|| format!("flush rig JSON '{}'", path.display()))?;
        Ok(())
    }

    /// Display name of the node at `path`.
    pub fn display_name(&self, path: &str) -> String {
        match self.nodes.get(path).and_then(|n| n.name.as_deref()) {
            Some(name) => name.to_string(),
            None => path.rsplit('/').next().unwrap_or_default().to_string(),
        }
    }

    /// Check references, frames and values.
    pub fn validate(&self) -> DeformResult<()> {
        self.scene.validate()?;

        for (path, node) in &self.nodes {
            if path.trim().is_empty() {
                return Err(DeformError::validation("node path must be non-empty"));
            }
            if let Some(parent) = &node.parent {
                match self.nodes.get(parent) {
                    Some(p) if p.kind == NodeKind::Group => {}
                    Some(_) => {
                        return Err(DeformError::validation(format!(
                            "node '{path}': parent '{parent}' is not a group"
                        )));
                    }
                    None => {
                        return Err(DeformError::validation(format!(
                            "node '{path}': unknown parent '{parent}'"
                        )));
                    }
                }
            }
            for src in node.sources.iter().flatten() {
                if src == path {
                    return Err(DeformError::validation(format!(
                        "node '{path}' is wired into itself"
                    )));
                }
                if !self.nodes.contains_key(src) {
                    return Err(DeformError::validation(format!(
                        "node '{path}': unknown source '{src}'"
                    )));
                }
            }
            for (attr, v) in &node.attrs {
                if !v.is_finite() {
                    return Err(DeformError::validation(format!(
                        "node '{path}': attribute '{attr}' must be finite"
                    )));
                }
            }
            for (attr, keys) in &node.channels {
                for (frame, v) in keys {
                    if !frame.is_valid() {
                        return Err(DeformError::validation(format!(
                            "node '{path}': channel '{attr}' has a key at frame 0"
                        )));
                    }
                    if !v.is_finite() {
                        return Err(DeformError::validation(format!(
                            "node '{path}': channel '{attr}' value at frame {frame} must be finite"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
