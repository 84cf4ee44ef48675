use glam::Quat;

use crate::errors::{HandPoseError, Result};
use crate::scene::{ReferenceSkeleton, Transform};

use super::Handedness;
use super::bones::{DEFAULT_BONE_NAMES, FINGER_COUNT, Finger, HAND_JOINT_COUNT, HandBone, JointFreedom};
use super::hand_data::HandData;
use super::providers::HandJoints;

/// An authored grab pose: one hand shape plus how it should be applied.
///
/// Pose assets are shared by reference (`Arc<HandPoseData>`); caches compare
/// them by pointer, never by value.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandPoseData {
    pub name: String,
    pub handedness: Handedness,
    pub hand_data: HandData,
    /// Per-finger freedom, indexed by [`Finger`].
    pub joint_freedom: [JointFreedom; FINGER_COUNT],
    /// Seconds to blend into and out of this pose. Zero snaps.
    pub pose_lerp_time: f32,
    pub is_mirrored: bool,
    /// Skeleton bone names used when authoring from a rig.
    pub joint_names: Vec<String>,
}

impl Default for HandPoseData {
    fn default() -> Self {
        Self::new("HandPose", Handedness::Left)
    }
}

impl HandPoseData {
    #[must_use]
    pub fn new(name: &str, handedness: Handedness) -> Self {
        Self {
            name: name.to_string(),
            handedness,
            hand_data: HandData::new(),
            joint_freedom: [JointFreedom::Free; FINGER_COUNT],
            pose_lerp_time: 0.0,
            is_mirrored: false,
            joint_names: DEFAULT_BONE_NAMES.iter().map(ToString::to_string).collect(),
        }
    }

    #[must_use]
    pub fn with_joints(mut self, joints: &[Transform; HAND_JOINT_COUNT]) -> Self {
        self.hand_data = HandData::from_joint_pose(joints);
        self
    }

    #[must_use]
    pub fn with_lerp_time(mut self, seconds: f32) -> Self {
        self.pose_lerp_time = seconds;
        self
    }

    #[inline]
    #[must_use]
    pub fn joint_rotation(&self, bone: HandBone) -> Quat {
        self.hand_data.bone_pose(bone).rotation
    }

    pub fn set_joint_rotation(&mut self, bone: HandBone, rotation: Quat) {
        let mut pose = self.hand_data.bone_pose(bone);
        pose.rotation = rotation;
        self.hand_data.set_bone_pose(bone, pose);
    }

    #[inline]
    #[must_use]
    pub fn finger_freedom(&self, finger: Finger) -> JointFreedom {
        self.joint_freedom[finger.index()]
    }

    // ========================================================================
    // Authoring
    // ========================================================================

    /// Captures the skeleton's component-space reference pose.
    pub fn set_rotation_from_skeleton(&mut self, skeleton: &ReferenceSkeleton) -> Result<()> {
        let component_space = skeleton.component_space_pose();
        let joints = self.gather_named_joints(skeleton, &component_space, 0)?;
        self.hand_data.set_joint_poses(&joints)
    }

    /// Captures a full local-space skeleton pose. The palm is reset to
    /// identity.
    pub fn set_rotation_from_pose(&mut self, skeleton: &ReferenceSkeleton, local_pose: &[Transform]) -> Result<()> {
        let component_space = skeleton.fill_component_space(local_pose);
        let mut joints = self.gather_named_joints(skeleton, &component_space, 1)?;
        joints[HandBone::Palm.index()] = Transform::IDENTITY;
        self.hand_data.set_joint_poses(&joints)
    }

    /// Copies the joints and handedness of a live hand source.
    pub fn set_rotation_from_visual(&mut self, source: &dyn HandJoints) -> Result<()> {
        if !source.is_hand_joint_data_valid() {
            log::warn!("Pose '{}': joint data source is invalid", self.name);
            return Err(HandPoseError::InvalidJointSource);
        }
        self.hand_data.set_joint_poses(source.joint_poses())?;
        self.handedness = source.handedness();
        Ok(())
    }

    fn gather_named_joints(
        &self,
        skeleton: &ReferenceSkeleton,
        component_space: &[Transform],
        first: usize,
    ) -> Result<Vec<Transform>> {
        let mut joints = self.hand_data.joint_poses().to_vec();
        for (index, name) in self.joint_names.iter().enumerate().take(HAND_JOINT_COUNT).skip(first) {
            let Some(bone) = skeleton.find_bone(name) else {
                log::error!("Pose '{}': bone '{name}' not found in skeleton '{}'", self.name, skeleton.name);
                return Err(HandPoseError::BoneNotFound(name.clone()));
            };
            joints[index] = component_space[bone];
        }
        Ok(joints)
    }
}

impl HandJoints for HandPoseData {
    fn hand_data(&self) -> &HandData {
        &self.hand_data
    }

    fn handedness(&self) -> Handedness {
        self.handedness
    }

    fn is_hand_joint_data_valid(&self) -> bool {
        true
    }
}
