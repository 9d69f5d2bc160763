use super::*;
use crate::geometry::aspect::SceneContext;
use crate::rig::model::{Handle, SegmentMode, SegmentRest, attr};
use crate::scene::builder::RigBuilder;

fn rest(offset: (f64, f64), h0: (f64, f64), h1: (f64, f64)) -> SegmentRest {
    SegmentRest {
        offset: offset.into(),
        handle0: Handle::new(h0.0, h0.1),
        handle1: Handle::new(h1.0, h1.1),
    }
}

fn two_link_scene() -> MemoryScene {
    RigBuilder::new(SceneContext::square())
        .offset("Top/Offset", Point::new(1.0, 1.0), 0.0)
        .unwrap()
        .curve("Top/Curve_1", "Top/Offset", rest((10.0, 0.0), (3.0, 0.0), (3.0, 90.0)))
        .unwrap()
        .curve("Top/Curve_2", "Top/Curve_1", rest((5.0, 0.0), (2.0, 0.0), (2.0, 0.0)))
        .unwrap()
        .keys("Top/Curve_2", "offset.x", &[(1, 5.0), (10, 8.0)])
        .unwrap()
        .build_scene()
        .unwrap()
}

fn assert_point(a: Point, b: Point) {
    assert!(a.distance(b) < 1e-9, "{a:?} != {b:?}");
}

#[test]
fn topology_follows_document_paths() {
    let scene = two_link_scene();
    let top = "Top".to_string();
    assert_eq!(scene.roots(), vec![top.clone()]);
    assert_eq!(
        scene.children(&top),
        vec!["Top/Curve_1", "Top/Curve_2", "Top/Offset"]
    );
    assert_eq!(scene.segments(), vec!["Top/Curve_1", "Top/Curve_2"]);
    assert_eq!(scene.kind(&"Top/Offset".to_string()), NodeKind::Offset);
    assert_eq!(scene.kind(&"Nowhere".to_string()), NodeKind::Other);
    assert_eq!(scene.display_name(&"Top/Curve_2".to_string()), "Curve_2");
    assert_eq!(scene.parent(&"Top/Curve_2".to_string()), Some(top));
}

#[test]
fn source_is_per_port() {
    let scene = two_link_scene();
    let c2 = "Top/Curve_2".to_string();
    assert_eq!(scene.source(&c2, 0), Some("Top/Curve_1".to_string()));
    assert_eq!(scene.source(&c2, 1), None);
    assert_eq!(scene.source(&"Top/Offset".to_string(), 0), None);
}

#[test]
fn values_prefer_resting_attributes_then_sample_channels() {
    let scene = two_link_scene();
    let c2 = "Top/Curve_2".to_string();
    assert_eq!(scene.value(&c2, FrameIndex(7), attr::RESTING_OFFSET_X).unwrap(), 5.0);
    assert_eq!(scene.value(&c2, FrameIndex(1), attr::OFFSET_X).unwrap(), 5.0);
    assert_eq!(scene.value(&c2, FrameIndex(9), attr::OFFSET_X).unwrap(), 5.0);
    assert_eq!(scene.value(&c2, FrameIndex(10), attr::OFFSET_X).unwrap(), 8.0);
    assert_eq!(scene.value(&c2, FrameIndex(99), attr::OFFSET_X).unwrap(), 8.0);

    let err = scene.value(&c2, FrameIndex(1), "nope").unwrap_err();
    assert!(matches!(err, DeformError::Host(_)));
}

#[test]
fn writes_land_on_attributes_or_channel_keys() {
    let mut scene = two_link_scene();
    let c1 = "Top/Curve_1".to_string();

    scene
        .set_value(&c1, attr::RESTING_OFFSET_X, FrameIndex(4), 42.0)
        .unwrap();
    assert_eq!(scene.document().nodes[&c1].attrs[attr::RESTING_OFFSET_X], 42.0);
    assert!(scene.keyframe_times(&c1, attr::RESTING_OFFSET_X).unwrap().is_empty());

    scene.set_value(&c1, attr::OFFSET_Y, FrameIndex(4), -1.0).unwrap();
    assert_eq!(scene.keyframe_times(&c1, attr::OFFSET_Y).unwrap(), vec![FrameIndex(4)]);

    scene
        .set_text(&c1, attr::LOCAL_REFERENTIAL, FrameIndex::FIRST, "N")
        .unwrap();
    assert_eq!(
        scene.text(&c1, FrameIndex::FIRST, attr::LOCAL_REFERENTIAL).unwrap(),
        "N"
    );

    assert!(scene.set_value(&c1, attr::OFFSET_Y, FrameIndex(0), 1.0).is_err());
    assert!(scene.set_value(&"Nope".to_string(), attr::OFFSET_Y, FrameIndex(1), 1.0).is_err());
}

#[test]
fn segment_points_come_from_the_solved_chain() {
    let scene = two_link_scene();
    let c1 = "Top/Curve_1".to_string();
    let c2 = "Top/Curve_2".to_string();

    assert_point(scene.segment_start_point(&c1).unwrap(), Point::new(1.0, 1.0));
    assert_point(scene.segment_end_point(&c1).unwrap(), Point::new(11.0, 1.0));
    // Curve_1 hands down 90 degrees, so Curve_2 runs straight up.
    assert_point(scene.segment_start_point(&c2).unwrap(), Point::new(11.0, 1.0));
    assert_point(scene.segment_end_point(&c2).unwrap(), Point::new(11.0, 6.0));

    let poses = scene.poses();
    assert_eq!(poses.len(), 2);
    assert_point(poses["Top/Curve_2"].handle0, Point::new(11.0, 3.0));
}

#[test]
fn pose_of_non_segment_is_a_host_error() {
    let scene = two_link_scene();
    assert!(matches!(scene.pose("Top/Offset"), Err(DeformError::Host(_))));
    assert!(matches!(scene.pose("Nope"), Err(DeformError::Host(_))));
}

#[test]
fn unknown_ancestor_mode_hands_down_nothing() {
    let mut scene = two_link_scene();
    scene
        .set_text(&"Top/Curve_1".to_string(), attr::LOCAL_REFERENTIAL, FrameIndex::FIRST, "?")
        .unwrap();
    let poses = scene.poses();
    assert_eq!(poses.keys().collect::<Vec<_>>(), ["Top/Curve_2"]);
    // Curve_1 still ends at (11, 1) but no longer turns Curve_2 upward.
    assert_point(poses["Top/Curve_2"].start, Point::new(11.0, 1.0));
    assert_point(poses["Top/Curve_2"].end, Point::new(16.0, 1.0));
    assert!(matches!(
        scene.pose("Top/Curve_1"),
        Err(DeformError::UnresolvableMode { .. })
    ));
    assert_eq!(
        scene.segment_mode(&"Top/Curve_2".to_string()).unwrap(),
        SegmentMode::Curve
    );
}

#[test]
fn host_messages_are_recorded() {
    let mut scene = two_link_scene();
    scene.begin_batch("first");
    scene.trace("line");
    scene.end_batch();
    scene.end_batch();
    scene.advise("hello");
    assert_eq!(scene.batches(), ["first".to_string()]);
    assert_eq!(scene.traces(), ["line".to_string()]);
    assert_eq!(scene.advisories(), ["hello".to_string()]);
}

#[test]
fn invalid_document_is_rejected() {
    let mut doc = two_link_scene().into_document();
    doc.scene.aspect_x = f64::NAN;
    assert!(MemoryScene::new(doc).is_err());
}
