use crate::rig::host::RigTopology;
use crate::rig::model::NodeKind;

/// Flatten a selection into the segments it names.
///
/// Groups are expanded depth-first in host child order with an explicit worklist.
/// Each segment appears once, at its first position in traversal order.
pub fn expand_selection<T: RigTopology + ?Sized>(topo: &T, selection: &[T::Node]) -> Vec<T::Node> {
    let mut out: Vec<T::Node> = Vec::new();
    let mut stack: Vec<T::Node> = selection.iter().rev().cloned().collect();

    while let Some(node) = stack.pop() {
        match topo.kind(&node) {
            NodeKind::Segment => {
                if !out.contains(&node) {
                    out.push(node);
                }
            }
            NodeKind::Group => stack.extend(topo.children(&node).into_iter().rev()),
            NodeKind::Offset | NodeKind::Other => {}
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/rig/selection.rs"]
mod tests;
