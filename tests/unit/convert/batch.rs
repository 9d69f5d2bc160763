use super::*;
use crate::foundation::core::Point;
use crate::geometry::aspect::SceneContext;
use crate::rig::host::RigTopology;
use crate::rig::model::{Handle, NodeKind, attr};
use crate::scene::builder::RigBuilder;
use crate::scene::document::NodeDef;
use crate::scene::memory::MemoryScene;

fn rest(offset: (f64, f64), h0: (f64, f64), h1: (f64, f64)) -> SegmentRest {
    SegmentRest {
        offset: offset.into(),
        handle0: Handle::new(h0.0, h0.1),
        handle1: Handle::new(h1.0, h1.1),
    }
}

fn node(path: &str) -> String {
    path.to_string()
}

// Arm is a healthy two-link chain; Tail has no offset node upstream.
fn scene() -> MemoryScene {
    RigBuilder::new(SceneContext::new(16.0, 9.0).unwrap())
        .group("Top/Arm")
        .unwrap()
        .offset("Top/Arm/Offset", Point::new(0.0, 0.0), 0.0)
        .unwrap()
        .curve("Top/Arm/Curve_1", "Top/Arm/Offset", rest((10.0, 0.0), (3.0, 0.0), (3.0, 45.0)))
        .unwrap()
        .curve("Top/Arm/Curve_2", "Top/Arm/Curve_1", rest((6.0, 2.0), (2.0, 10.0), (2.0, 0.0)))
        .unwrap()
        .group("Top/Tail")
        .unwrap()
        .node("Top/Tail/Null", NodeDef::new(NodeKind::Other))
        .unwrap()
        .curve("Top/Tail/Curve_1", "Top/Tail/Null", rest((4.0, 0.0), (1.0, 0.0), (1.0, 0.0)))
        .unwrap()
        .build_scene()
        .unwrap()
}

#[test]
fn empty_selection_advises_and_opens_no_batch() {
    let mut scene = scene();
    let err = convert_selection(&mut scene, &[node("Top/Arm/Offset")], &ConvertOptions::default())
        .unwrap_err();
    assert!(matches!(err, DeformError::NoSelection));
    assert_eq!(scene.advisories(), [NO_SELECTION_ADVISORY.to_string()]);
    assert!(scene.batches().is_empty());
}

#[test]
fn failing_segment_does_not_abort_the_batch() {
    let mut scene = scene();
    let report = convert_selection(
        &mut scene,
        &[node("Top/Tail"), node("Top/Arm")],
        &ConvertOptions::default(),
    )
    .unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].node, "Top/Tail/Curve_1");
    assert!(matches!(
        report.skipped[0].reason,
        DeformError::MissingOffsetAnchor { .. }
    ));
    let converted: Vec<_> = report.converted.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(converted, ["Curve_1", "Curve_2"]);
    assert!(report.converted.iter().all(|c| c.to == SegmentMode::Envelope));

    assert_eq!(
        scene.traces(),
        ["Failed to locate the leading offset node for the chain.".to_string()]
    );
    assert_eq!(scene.batches(), [DEFAULT_BATCH_LABEL.to_string()]);
}

#[test]
fn bad_mode_flag_is_traced() {
    let mut scene = scene();
    scene
        .set_text(
            &node("Top/Arm/Curve_2"),
            attr::LOCAL_REFERENTIAL,
            FrameIndex::FIRST,
            "",
        )
        .unwrap();
    let report =
        convert_selection(&mut scene, &[node("Top/Arm")], &ConvertOptions::default()).unwrap();
    assert_eq!(report.converted.len(), 1);
    assert_eq!(
        scene.traces(),
        ["Failed to identify the selected curve module type.".to_string()]
    );
}

#[test]
fn bad_ancestor_mode_is_left_out_of_the_parent_orientation() {
    let mut scene = scene();
    scene
        .set_text(
            &node("Top/Arm/Curve_1"),
            attr::LOCAL_REFERENTIAL,
            FrameIndex::FIRST,
            "?",
        )
        .unwrap();
    let before = scene.pose("Top/Arm/Curve_2").unwrap();
    let report =
        convert_selection(&mut scene, &[node("Top/Arm/Curve_2")], &ConvertOptions::default())
            .unwrap();
    assert!(report.is_complete());
    assert_eq!(report.converted[0].to, SegmentMode::Envelope);
    assert!(scene.traces().is_empty());
    let after = scene.pose("Top/Arm/Curve_2").unwrap();
    assert!(before.max_deviation(&after) < 1e-9);
}

#[test]
fn overlapping_selection_converts_each_segment_once() {
    let mut scene = scene();
    let report = convert_selection(
        &mut scene,
        &[
            node("Top/Arm/Curve_2"),
            node("Top/Arm"),
            node("Top/Arm/Curve_2"),
        ],
        &ConvertOptions::default(),
    )
    .unwrap();
    let order: Vec<_> = report.converted.iter().map(|c| c.node.as_str()).collect();
    assert_eq!(order, ["Top/Arm/Curve_2", "Top/Arm/Curve_1"]);
}

#[test]
fn custom_label_names_the_batch() {
    let mut scene = scene();
    let opts = ConvertOptions {
        batch_label: "Toggle arm".to_string(),
    };
    convert_selection(&mut scene, &[node("Top/Arm")], &opts).unwrap();
    assert_eq!(scene.batches(), ["Toggle arm".to_string()]);
}

#[test]
fn converting_twice_restores_modes_and_pose() {
    let mut scene = scene();
    let before = scene.poses();
    let arm = [node("Top/Arm")];

    convert_selection(&mut scene, &arm, &ConvertOptions::default()).unwrap();
    let mid = scene.poses();
    convert_selection(&mut scene, &arm, &ConvertOptions::default()).unwrap();

    for seg in scene.children(&node("Top/Arm")) {
        if scene.kind(&seg) == NodeKind::Segment {
            assert_eq!(scene.segment_mode(&seg).unwrap(), SegmentMode::Curve);
        }
    }
    let after = scene.poses();
    for (path, pose) in &before {
        assert!(pose.max_deviation(&mid[path]) < 1e-9, "{path} moved");
        assert!(pose.max_deviation(&after[path]) < 1e-9, "{path} moved back");
    }
    assert_eq!(scene.batches().len(), 2);
}
