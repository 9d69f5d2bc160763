//! Keyframe union and per-channel write sets.

use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::FrameIndex;
use crate::foundation::error::DeformResult;
use crate::rig::host::SceneHost;
use crate::rig::model::{Channel, SegmentRest};

/// Per-channel `{frame -> value}` writes.
pub type ChannelWrites = BTreeMap<Channel, BTreeMap<FrameIndex, f64>>;

/// Sorted, duplicate-free union of keyframe times; `{1}` when there are none.
pub fn keyframe_union<I>(times: I) -> Vec<FrameIndex>
where
    I: IntoIterator<Item = FrameIndex>,
{
    let set: BTreeSet<FrameIndex> = times.into_iter().collect();
    if set.is_empty() {
        return vec![FrameIndex::FIRST];
    }
    set.into_iter().collect()
}

/// Union of keyframe times across a segment's six animated channels.
pub fn collect_keyframes<H: SceneHost + ?Sized>(
    host: &H,
    node: &H::Node,
) -> DeformResult<Vec<FrameIndex>> {
    let mut times = Vec::new();
    for channel in Channel::ALL {
        times.extend(host.keyframe_times(node, channel.animated_attr())?);
    }
    Ok(keyframe_union(times))
}

/// The same resting value at every frame, for every channel.
pub fn channel_writes(values: &SegmentRest, frames: &[FrameIndex]) -> ChannelWrites {
    Channel::ALL
        .into_iter()
        .map(|channel| {
            let value = values.channel_value(channel);
            let keys = frames.iter().map(|f| (*f, value)).collect();
            (channel, keys)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/convert/keyframes.rs"]
mod tests;
