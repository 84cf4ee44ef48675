//! Serialization Tests
//!
//! Tests for:
//! - Pose assets survive a JSON round trip (joint cache excluded)
//! - Joint arrays of the wrong length are rejected
//! - Settings and properties deserialize from hand-written JSON

#![cfg(feature = "serde")]

use glam::Vec3;

use grabpose::cache::{GrabPoseMode, GrabPoseProperties, MirrorMode};
use grabpose::hand::{HAND_JOINT_COUNT, HandBone, HandData, HandPoseData, Handedness};
use grabpose::scene::{Axis, Transform};
use grabpose::settings::HandPoseSettings;

#[test]
fn pose_asset_json_keeps_joints() -> anyhow::Result<()> {
    let mut pose = HandPoseData::new("Grip", Handedness::Right).with_lerp_time(0.1);
    pose.hand_data
        .set_bone_pose(HandBone::IndexTip, Transform::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    pose.hand_data.cache_joint_poses();

    let json = serde_json::to_string(&pose)?;
    let back: HandPoseData = serde_json::from_str(&json)?;

    assert_eq!(back.name, "Grip");
    assert_eq!(back.handedness, Handedness::Right);
    assert_eq!(back.hand_data.joint_poses(), pose.hand_data.joint_poses());
    assert_eq!(back.hand_data.cached_joint_poses().len(), HAND_JOINT_COUNT);
    assert_eq!(back.hand_data.cached_joint_poses()[HandBone::IndexTip.index()], Transform::IDENTITY);
    Ok(())
}

#[test]
fn hand_data_with_wrong_joint_count_is_rejected() -> anyhow::Result<()> {
    assert!(serde_json::from_str::<HandData>(r#"{"joint_poses":[],"joint_radii":[]}"#).is_err());

    let mut json = serde_json::to_value(HandData::new())?;
    json["joint_radii"] = serde_json::json!([0.5, 0.5, 0.5]);
    let err = serde_json::from_value::<HandData>(json).unwrap_err();
    assert!(err.to_string().contains("expected 26"), "unexpected error: {err}");

    let pose = HandPoseData::new("Grip", Handedness::Left);
    let mut json = serde_json::to_value(&pose)?;
    json["hand_data"]["joint_poses"] = serde_json::json!([]);
    assert!(serde_json::from_value::<HandPoseData>(json).is_err());

    let back: HandData = serde_json::from_value(serde_json::to_value(HandData::new())?)?;
    assert_eq!(back.bone_pose(HandBone::Wrist), Transform::IDENTITY);
    Ok(())
}

#[test]
fn properties_from_json() -> anyhow::Result<()> {
    let properties: GrabPoseProperties = serde_json::from_str(
        r#"{
            "pose_mode": "SnapPoseToObject",
            "snap_move_duration": 0.5,
            "mirroring_mode": "Automatic",
            "mirror_location_and_rotation": true,
            "mirror_axis": "Y"
        }"#,
    )?;

    assert_eq!(
        properties,
        GrabPoseProperties::default()
            .with_pose_mode(GrabPoseMode::SnapPoseToObject)
            .with_snap_move_duration(0.5)
            .with_mirroring(MirrorMode::Automatic)
            .with_mirrored_location(Axis::Y)
    );

    let settings: HandPoseSettings = serde_json::from_str(
        r#"{
            "debug_pose_transforms": true,
            "debug_pose_vectors": false,
            "debug_axis_length": 2.0,
            "debug_arrow_length": 15.0
        }"#,
    )?;
    assert!(settings.debug_pose_transforms);
    Ok(())
}
