//! Left/Right Mirroring
//!
//! Hand joints are reflected across the sagittal plane, which is the plane
//! normal to the thumb-side X axis. In Euler terms pitch and yaw flip sign,
//! roll is kept and the X translation is negated. Applying the reflection
//! twice yields the input exactly.

use glam::{Quat, Vec3};

use crate::scene::Transform;

use super::pose_data::HandPoseData;

/// Reflects a single joint transform across the sagittal plane.
#[inline]
#[must_use]
pub fn mirror_hand_transform(transform: &Transform) -> Transform {
    let p = transform.position;
    let q = transform.rotation;
    Transform {
        position: Vec3::new(-p.x, p.y, p.z),
        rotation: Quat::from_xyzw(q.x, -q.y, -q.z, q.w),
        scale: transform.scale,
    }
}

/// Mirrors every joint, preserving order and count.
#[must_use]
pub fn mirror_joint_pose(joints: &[Transform]) -> Vec<Transform> {
    joints.iter().map(mirror_hand_transform).collect()
}

/// Builds the opposite-hand counterpart of `source`.
///
/// The source is left untouched. `suffix` is appended as
/// `<source>_Mirror_<suffix>`; keeping it unique is the caller's job.
#[must_use]
pub fn mirrored_pose_data(source: &HandPoseData, suffix: u32) -> HandPoseData {
    let mut hand_data = source.hand_data.clone();
    for joint in hand_data.joint_poses_mut() {
        *joint = mirror_hand_transform(joint);
    }

    HandPoseData {
        name: format!("{}_Mirror_{suffix}", source.name),
        handedness: source.handedness.opposite(),
        hand_data,
        joint_freedom: source.joint_freedom,
        pose_lerp_time: source.pose_lerp_time,
        is_mirrored: true,
        joint_names: source.joint_names.clone(),
    }
}
