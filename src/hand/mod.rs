//! Hand Data Module
//!
//! Joint storage and pose assets for tracked and authored hands:
//! - [`HandBone`]: the 26-joint layout and finger chains
//! - [`HandData`]: fixed-size joint pose/radius container
//! - [`HandPoseData`]: an authored grab pose asset
//! - [`mirror`]: left/right reflection of joints and pose assets
//! - [`HandJoints`] / [`RootPose`]: provider traits for live hand sources

pub mod bones;
pub mod hand_data;
pub mod mirror;
pub mod pose_data;
pub mod providers;

pub use bones::{BoneChain, Finger, HandBone, JointFreedom, BONE_CHAINS, HAND_JOINT_COUNT};
pub use hand_data::{HandData, JointPose};
pub use mirror::{mirror_hand_transform, mirror_joint_pose};
pub use pose_data::HandPoseData;
pub use providers::{HandJoints, RootPose, TrackedHand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Handedness {
    #[default]
    Left,
    Right,
}

impl Handedness {
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }
}
