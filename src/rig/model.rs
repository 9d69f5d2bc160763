use crate::foundation::core::Point;

/// Host attribute names read and written by the converter.
pub mod attr {
    /// Mode flag: `"Y"` applies the parent modifier (curve), `"N"` does not (envelope).
    pub const LOCAL_REFERENTIAL: &str = "localReferential";
    /// Closed-path flag, only meaningful in envelope mode.
    pub const CLOSE_PATH: &str = "closePath";
    /// `closePath` value for an open path.
    pub const CLOSE_PATH_OFF: &str = "N";
    /// Offset node resting orientation.
    pub const RESTING_ORIENTATION: &str = "restingorientation";
    /// Offset node animated orientation.
    pub const ORIENTATION: &str = "orientation";
    /// Resting offset x (segments and offset nodes).
    pub const RESTING_OFFSET_X: &str = "restingoffset.x";
    /// Resting offset y (segments and offset nodes).
    pub const RESTING_OFFSET_Y: &str = "restingoffset.y";
    /// Animated offset x.
    pub const OFFSET_X: &str = "offset.x";
    /// Animated offset y.
    pub const OFFSET_Y: &str = "offset.y";
}

/// Host node categories the converter cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A curve module (one spline link of a deformation chain).
    Segment,
    /// The fixed anchor at the root of a chain.
    Offset,
    /// A container whose children may be segments.
    Group,
    /// Anything else; skipped by walks and selection.
    Other,
}

/// How a segment stores its handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentMode {
    /// Handles relative to the cumulative parent orientation.
    Curve,
    /// Handles in absolute field space.
    Envelope,
}

impl SegmentMode {
    /// Flag text for [`SegmentMode::Curve`].
    pub const CURVE_FLAG: &'static str = "Y";
    /// Flag text for [`SegmentMode::Envelope`].
    pub const ENVELOPE_FLAG: &'static str = "N";

    /// Parse the host's `localReferential` flag.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            Self::CURVE_FLAG => Some(Self::Curve),
            Self::ENVELOPE_FLAG => Some(Self::Envelope),
            _ => None,
        }
    }

    /// The `localReferential` flag text for this mode.
    pub fn flag(self) -> &'static str {
        match self {
            Self::Curve => Self::CURVE_FLAG,
            Self::Envelope => Self::ENVELOPE_FLAG,
        }
    }

    /// The other representation.
    pub fn toggled(self) -> Self {
        match self {
            Self::Curve => Self::Envelope,
            Self::Envelope => Self::Curve,
        }
    }
}

/// A tangent handle: length and orientation in degrees (any winding).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Handle {
    /// Handle length, `>= 0`.
    pub length: f64,
    /// Handle orientation in degrees.
    pub orientation: f64,
}

impl Handle {
    /// Build a handle from its length and orientation.
    pub const fn new(length: f64, orientation: f64) -> Self {
        Self {
            length,
            orientation,
        }
    }
}

/// The six resting values of a segment.
///
/// This is both what the converter reads and what it produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentRest {
    /// End position: parent-relative (curve) or absolute field space (envelope).
    pub offset: Point,
    /// Start handle.
    pub handle0: Handle,
    /// End handle; it points backward from the end anchor.
    pub handle1: Handle,
}

impl SegmentRest {
    /// Value of one animated channel.
    pub fn channel_value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::OffsetX => self.offset.x,
            Channel::OffsetY => self.offset.y,
            Channel::Length0 => self.handle0.length,
            Channel::Orientation0 => self.handle0.orientation,
            Channel::Length1 => self.handle1.length,
            Channel::Orientation1 => self.handle1.orientation,
        }
    }
}

/// The six animated channels of a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// `offset.x`
    OffsetX,
    /// `offset.y`
    OffsetY,
    /// `length0`
    Length0,
    /// `orientation0`
    Orientation0,
    /// `length1`
    Length1,
    /// `orientation1`
    Orientation1,
}

impl Channel {
    /// All channels in host order.
    pub const ALL: [Channel; 6] = [
        Channel::OffsetX,
        Channel::OffsetY,
        Channel::Length0,
        Channel::Orientation0,
        Channel::Length1,
        Channel::Orientation1,
    ];

    /// Name of the keyframed attribute.
    pub fn animated_attr(self) -> &'static str {
        match self {
            Self::OffsetX => attr::OFFSET_X,
            Self::OffsetY => attr::OFFSET_Y,
            Self::Length0 => "length0",
            Self::Orientation0 => "orientation0",
            Self::Length1 => "length1",
            Self::Orientation1 => "orientation1",
        }
    }

    /// Name of the matching resting attribute.
    pub fn resting_attr(self) -> &'static str {
        match self {
            Self::OffsetX => attr::RESTING_OFFSET_X,
            Self::OffsetY => attr::RESTING_OFFSET_Y,
            Self::Length0 => "restlength0",
            Self::Orientation0 => "restingorientation0",
            Self::Length1 => "restlength1",
            Self::Orientation1 => "restingorientation1",
        }
    }
}

/// Resting position and orientation of an offset node, in field space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnchorRest {
    /// Resting offset.
    pub position: Point,
    /// Resting orientation in field-space degrees.
    pub orientation: f64,
}

/// Everything the math needs to know about one segment at conversion time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentSnapshot {
    /// Current representation.
    pub mode: SegmentMode,
    /// Resting values as stored.
    pub rest: SegmentRest,
    /// Evaluated start anchor in field space.
    pub start: Point,
    /// Evaluated end anchor in field space.
    pub end: Point,
}

#[cfg(test)]
#[path = "../../tests/unit/rig/model.rs"]
mod tests;
