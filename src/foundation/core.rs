use std::fmt;

pub use kurbo::{CubicBez, Point, Vec2};

/// Host timeline frame number. Host timelines are 1-based.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The first frame of a host timeline; resting values are read and written here.
    pub const FIRST: FrameIndex = FrameIndex(1);

    /// Whether this frame lies on the host timeline (frames start at 1).
    pub fn is_valid(self) -> bool {
        self.0 >= 1
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
