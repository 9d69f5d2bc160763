use super::*;

struct Fake {
    kinds: Vec<NodeKind>,
    parents: Vec<Option<usize>>,
}

impl RigTopology for Fake {
    type Node = usize;

    fn kind(&self, node: &usize) -> NodeKind {
        self.kinds[*node]
    }

    fn display_name(&self, node: &usize) -> String {
        format!("n{node}")
    }

    fn source(&self, _node: &usize, _port: usize) -> Option<usize> {
        None
    }

    fn parent(&self, node: &usize) -> Option<usize> {
        self.parents[*node]
    }

    fn children(&self, node: &usize) -> Vec<usize> {
        (0..self.kinds.len())
            .filter(|i| self.parents[*i] == Some(*node))
            .collect()
    }
}

// 0 group{1 seg, 2 group{3 seg, 4 offset}, 5 seg}, 6 seg, 7 other
fn scene() -> Fake {
    use NodeKind::*;
    Fake {
        kinds: vec![Group, Segment, Group, Segment, Offset, Segment, Segment, Other],
        parents: vec![None, Some(0), Some(0), Some(2), Some(2), Some(0), None, None],
    }
}

#[test]
fn groups_expand_depth_first_in_child_order() {
    let topo = scene();
    assert_eq!(expand_selection(&topo, &[0]), vec![1, 3, 5]);
}

#[test]
fn selection_order_is_preserved() {
    let topo = scene();
    assert_eq!(expand_selection(&topo, &[6, 2]), vec![6, 3]);
}

#[test]
fn non_segments_are_filtered() {
    let topo = scene();
    assert!(expand_selection(&topo, &[4, 7]).is_empty());
    assert!(expand_selection(&topo, &[]).is_empty());
}

#[test]
fn segments_selected_twice_convert_once() {
    let topo = scene();
    assert_eq!(expand_selection(&topo, &[3, 0]), vec![3, 1, 5]);
}

#[test]
fn deep_nesting_does_not_recurse() {
    let depth = 2_000;
    let mut kinds = vec![NodeKind::Group; depth];
    let mut parents: Vec<Option<usize>> = (0..depth).map(|i| i.checked_sub(1)).collect();
    kinds.push(NodeKind::Segment);
    parents.push(Some(depth - 1));
    let topo = Fake { kinds, parents };
    assert_eq!(expand_selection(&topo, &[0]), vec![depth]);
}
