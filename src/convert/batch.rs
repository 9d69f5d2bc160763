//! Whole-selection conversion inside one host transaction.

use crate::convert::plan::plan_conversion;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{DeformError, DeformResult};
use crate::rig::host::SceneHost;
use crate::rig::model::{SegmentMode, SegmentRest};
use crate::rig::selection::expand_selection;

/// Undo label used when none is configured.
pub const DEFAULT_BATCH_LABEL: &str = "Curve-Envelope Deformation Converter";

/// Advisory shown when the selection holds no segments.
pub const NO_SELECTION_ADVISORY: &str = "Please select one or more curve modules.";

/// Batch configuration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConvertOptions {
    /// Label of the undoable host transaction.
    pub batch_label: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            batch_label: DEFAULT_BATCH_LABEL.to_string(),
        }
    }
}

/// A segment that was converted.
#[derive(Clone, Debug)]
pub struct ConvertedSegment<N> {
    /// Host node.
    pub node: N,
    /// Display name at conversion time.
    pub name: String,
    /// Representation before conversion.
    pub from: SegmentMode,
    /// Representation after conversion.
    pub to: SegmentMode,
    /// Resting values written.
    pub values: SegmentRest,
    /// Frames the values were written at.
    pub frames: Vec<FrameIndex>,
}

/// A segment that was left untouched.
#[derive(Debug)]
pub struct SkippedSegment<N> {
    /// Host node.
    pub node: N,
    /// Display name.
    pub name: String,
    /// Why it was skipped.
    pub reason: DeformError,
}

/// Outcome of [`convert_selection`].
#[derive(Debug)]
pub struct BatchReport<N> {
    /// Segments converted, in selection order.
    pub converted: Vec<ConvertedSegment<N>>,
    /// Segments skipped, in selection order.
    pub skipped: Vec<SkippedSegment<N>>,
}

impl<N> Default for BatchReport<N> {
    fn default() -> Self {
        Self {
            converted: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<N> BatchReport<N> {
    /// Whether every selected segment was converted.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Convert every segment named by `selection` to its other representation.
///
/// Curve segments become envelopes and envelopes become curves. Segments are
/// processed in selection order; each is fully read before it is written. A
/// failure on one segment is traced and recorded and the batch moves on.
#[tracing::instrument(skip_all, fields(selected = selection.len()))]
pub fn convert_selection<H: SceneHost + ?Sized>(
    host: &mut H,
    selection: &[H::Node],
    opts: &ConvertOptions,
) -> DeformResult<BatchReport<H::Node>> {
    let segments = expand_selection(host, selection);
    if segments.is_empty() {
        host.advise(NO_SELECTION_ADVISORY);
        return Err(DeformError::NoSelection);
    }

    let ctx = host.scene_context()?;
    let mut report = BatchReport::default();

    host.begin_batch(&opts.batch_label);
    for node in segments {
        let name = host.display_name(&node);
        let outcome = match plan_conversion(&*host, &ctx, &node) {
            Ok(plan) => plan.apply(&mut *host).map(|()| plan),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(plan) => {
                tracing::debug!(
                    segment = %name,
                    from = ?plan.from,
                    to = ?plan.to,
                    frames = plan.frames.len(),
                    "converted segment"
                );
                report.converted.push(ConvertedSegment {
                    node,
                    name,
                    from: plan.from,
                    to: plan.to,
                    values: plan.values,
                    frames: plan.frames,
                });
            }
            Err(reason) => {
                if reason.is_segment_local() {
                    tracing::warn!(segment = %name, error = %reason, "skipped segment");
                } else {
                    tracing::error!(segment = %name, error = %reason, "skipped segment");
                }
                host.trace(&segment_trace_line(&reason));
                report.skipped.push(SkippedSegment { node, name, reason });
            }
        }
    }
    host.end_batch();

    Ok(report)
}

fn segment_trace_line(reason: &DeformError) -> String {
    match reason {
        DeformError::MissingOffsetAnchor { .. } => {
            "Failed to locate the leading offset node for the chain.".to_string()
        }
        DeformError::UnresolvableMode { .. } => {
            "Failed to identify the selected curve module type.".to_string()
        }
        other => format!("Failed to convert curve module: {other}"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/batch.rs"]
mod tests;
