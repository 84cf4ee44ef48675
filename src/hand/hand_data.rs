use crate::errors::{HandPoseError, Result};
use crate::scene::Transform;

use super::bones::{HAND_JOINT_COUNT, HandBone};

/// One transform per hand joint, in [`HandBone`] order.
pub type JointPose = [Transform; HAND_JOINT_COUNT];

/// Joint container shared by tracked hands, pose assets and hand visuals.
///
/// All arrays have exactly [`HAND_JOINT_COUNT`] entries for the lifetime of
/// the value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SerializedHandData"))]
pub struct HandData {
    joint_poses: Vec<Transform>,
    joint_radii: Vec<f32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    joint_poses_cache: Vec<Transform>,
}

/// Wire form of [`HandData`]; joint counts are checked on conversion.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SerializedHandData {
    joint_poses: Vec<Transform>,
    joint_radii: Vec<f32>,
}

#[cfg(feature = "serde")]
impl TryFrom<SerializedHandData> for HandData {
    type Error = HandPoseError;

    fn try_from(raw: SerializedHandData) -> Result<Self> {
        let mut data = Self::new();
        data.set_joint_poses(&raw.joint_poses)?;
        data.set_joint_radii(&raw.joint_radii)?;
        Ok(data)
    }
}

impl Default for HandData {
    fn default() -> Self {
        Self::new()
    }
}

impl HandData {
    #[must_use]
    pub fn new() -> Self {
        Self {
            joint_poses: vec![Transform::IDENTITY; HAND_JOINT_COUNT],
            joint_radii: vec![0.0; HAND_JOINT_COUNT],
            joint_poses_cache: vec![Transform::IDENTITY; HAND_JOINT_COUNT],
        }
    }

    #[must_use]
    pub fn from_joint_pose(joints: &JointPose) -> Self {
        let mut data = Self::new();
        data.joint_poses.copy_from_slice(joints);
        data
    }

    /// Resets every joint (and cached joint) to identity and radii to zero.
    pub fn set_joints_to_identity(&mut self) {
        self.joint_poses.fill(Transform::IDENTITY);
        self.joint_poses_cache.fill(Transform::IDENTITY);
        self.joint_radii.fill(0.0);
    }

    /// Copies joint poses and radii from another container.
    pub fn set_joints(&mut self, other: &HandData) {
        self.joint_poses.copy_from_slice(&other.joint_poses);
        self.joint_radii.copy_from_slice(&other.joint_radii);
    }

    pub fn set_joint_poses(&mut self, poses: &[Transform]) -> Result<()> {
        check_count(poses.len())?;
        self.joint_poses.copy_from_slice(poses);
        Ok(())
    }

    pub fn set_joint_radii(&mut self, radii: &[f32]) -> Result<()> {
        check_count(radii.len())?;
        self.joint_radii.copy_from_slice(radii);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn joint_poses(&self) -> &[Transform] {
        &self.joint_poses
    }

    /// Mutable view of the joints. The slice length is fixed.
    #[inline]
    pub fn joint_poses_mut(&mut self) -> &mut [Transform] {
        &mut self.joint_poses
    }

    #[inline]
    #[must_use]
    pub fn joint_radii(&self) -> &[f32] {
        &self.joint_radii
    }

    /// Joints as a fixed-size array.
    #[must_use]
    pub fn joint_pose_array(&self) -> JointPose {
        let mut out = [Transform::IDENTITY; HAND_JOINT_COUNT];
        out.copy_from_slice(&self.joint_poses);
        out
    }

    /// Joint at `index`, identity when out of range.
    #[must_use]
    pub fn joint_pose(&self, index: usize) -> Transform {
        self.joint_poses.get(index).copied().unwrap_or(Transform::IDENTITY)
    }

    #[inline]
    #[must_use]
    pub fn bone_pose(&self, bone: HandBone) -> Transform {
        self.joint_poses[bone.index()]
    }

    pub fn set_bone_pose(&mut self, bone: HandBone, pose: Transform) {
        self.joint_poses[bone.index()] = pose;
    }

    #[must_use]
    pub fn cached_joint_poses(&self) -> &[Transform] {
        &self.joint_poses_cache
    }

    pub fn set_cached_joint_pose(&mut self, index: usize, pose: Transform) -> Result<()> {
        let slot = self.joint_poses_cache.get_mut(index).ok_or_else(|| {
            log::warn!("Cached joint index {index} out of range");
            HandPoseError::JointIndexOutOfRange(index)
        })?;
        *slot = pose;
        Ok(())
    }

    /// Snapshots the current joints into the cache.
    pub fn cache_joint_poses(&mut self) {
        self.joint_poses_cache.copy_from_slice(&self.joint_poses);
    }
}

fn check_count(actual: usize) -> Result<()> {
    if actual == HAND_JOINT_COUNT {
        Ok(())
    } else {
        log::warn!("Joint count mismatch: expected {HAND_JOINT_COUNT}, got {actual}");
        Err(HandPoseError::JointCountMismatch {
            expected: HAND_JOINT_COUNT,
            actual,
        })
    }
}
