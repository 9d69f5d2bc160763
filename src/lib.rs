//! Lossless conversion of chained deformation splines between curve and envelope
//! representations.
//!
//! A deformation chain is an offset node followed by segments, each a cubic Bézier
//! stored as an end offset plus two tangent handles. In curve mode those values are
//! relative to the cumulative orientation of the chain; in envelope mode they are
//! absolute field-space values. Converting a segment rewrites its resting values so
//! that the rest shape is unchanged:
//!
//! - Describe the scene through [`SceneHost`] (or load a [`RigDocument`] into a
//!   [`MemoryScene`])
//! - Call [`convert_selection`] with the nodes to convert
//! - Inspect the returned [`BatchReport`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod convert;
pub(crate) mod geometry;
pub(crate) mod rig;
pub(crate) mod scene;

pub use crate::foundation::core::{CubicBez, FrameIndex, Point, Vec2};
pub use crate::foundation::error::{DeformError, DeformResult};

pub use crate::geometry::aspect::SceneContext;
pub use crate::geometry::bezier::{
    binomial_coefficient, estimate_end_tangent_inclination, evaluate_bernstein,
    evaluate_bernstein_point, tangent_inclination_at,
};
pub use crate::geometry::primitives::{distance, from_polar, inclination, to_polar, translate};

pub use crate::rig::chain::{direct_offset, find_offset_anchor, upstream_segments};
pub use crate::rig::host::{RigTopology, SceneHost};
pub use crate::rig::model::{
    AnchorRest, Channel, Handle, NodeKind, SegmentMode, SegmentRest, SegmentSnapshot, attr,
};
pub use crate::rig::pose::{SegmentPose, solve_chain};
pub use crate::rig::selection::expand_selection;

pub use crate::convert::batch::{
    BatchReport, ConvertOptions, ConvertedSegment, DEFAULT_BATCH_LABEL, NO_SELECTION_ADVISORY,
    SkippedSegment, convert_selection,
};
pub use crate::convert::keyframes::{ChannelWrites, channel_writes, collect_keyframes, keyframe_union};
pub use crate::convert::orientation::{
    accumulate, fallback_quad, handle_contribution, resolve_for_segment,
    resolve_parent_orientation,
};
pub use crate::convert::plan::{
    AttrValue, AttrWrite, ConversionPlan, FrozenAnchor, plan_conversion,
};
pub use crate::convert::segment::{convert_snapshot, curve_to_envelope, envelope_to_curve};

pub use crate::scene::builder::{ROOT_GROUP, RigBuilder};
pub use crate::scene::document::{NodeDef, RigDocument};
pub use crate::scene::memory::MemoryScene;
