//! Upstream walks along input port 0.
//!
//! Walks are bounded by the number of nodes sharing the segment's container and
//! never revisit a node, so a cyclic or foreign link can never loop forever.
//! Nodes outside any container are bounded by revisits alone.

use crate::rig::host::RigTopology;
use crate::rig::model::NodeKind;

const CHAIN_PORT: usize = 0;

/// Nodes upstream of a start node, nearest first.
struct Upstream<'a, T: RigTopology + ?Sized> {
    topo: &'a T,
    next: Option<T::Node>,
    remaining: Option<usize>,
    seen: Vec<T::Node>,
}

impl<'a, T: RigTopology + ?Sized> Upstream<'a, T> {
    fn new(topo: &'a T, node: &T::Node) -> Self {
        Self {
            topo,
            next: topo.source(node, CHAIN_PORT),
            remaining: topo.parent(node).map(|p| topo.children(&p).len()),
            seen: vec![node.clone()],
        }
    }
}

impl<T: RigTopology + ?Sized> Iterator for Upstream<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<T::Node> {
        if let Some(remaining) = &mut self.remaining {
            *remaining = remaining.checked_sub(1)?;
        }
        let node = self.next.take()?;
        if self.seen.contains(&node) {
            return None;
        }
        self.next = self.topo.source(&node, CHAIN_PORT);
        self.seen.push(node.clone());
        Some(node)
    }
}

/// First offset node found upstream of `node`, skipping any other node type.
pub fn find_offset_anchor<T: RigTopology + ?Sized>(topo: &T, node: &T::Node) -> Option<T::Node> {
    Upstream::new(topo, node).find(|src| topo.kind(src) == NodeKind::Offset)
}

/// Offset node wired directly into `node`'s chain input, if that is what it is.
pub fn direct_offset<T: RigTopology + ?Sized>(topo: &T, node: &T::Node) -> Option<T::Node> {
    topo.source(node, CHAIN_PORT)
        .filter(|src| topo.kind(src) == NodeKind::Offset)
}

/// Segments between the chain root and `node` (exclusive), in root-to-target order.
///
/// The walk stops at an offset node, at an unnamed node, or where the chain input
/// is unconnected. Non-segment intermediates are stepped over.
pub fn upstream_segments<T: RigTopology + ?Sized>(topo: &T, node: &T::Node) -> Vec<T::Node> {
    let mut segments: Vec<T::Node> = Upstream::new(topo, node)
        .take_while(|src| {
            topo.kind(src) != NodeKind::Offset && !topo.display_name(src).is_empty()
        })
        .filter(|src| topo.kind(src) == NodeKind::Segment)
        .collect();
    segments.reverse();
    segments
}

#[cfg(test)]
#[path = "../../tests/unit/rig/chain.rs"]
mod tests;
