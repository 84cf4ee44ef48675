//! Hand Sources
//!
//! Traits through which the engine reads live hand state. A tracked hand,
//! a synthetic hand or an authored pose asset can all feed the matcher and
//! the hand visual as long as they implement these.

use crate::scene::Transform;

use super::Handedness;
use super::hand_data::HandData;

/// Source of per-joint hand data.
pub trait HandJoints {
    fn hand_data(&self) -> &HandData;

    fn handedness(&self) -> Handedness;

    /// Whether the joints reflect a real hand this frame.
    fn is_hand_joint_data_valid(&self) -> bool;

    #[inline]
    fn joint_poses(&self) -> &[Transform] {
        self.hand_data().joint_poses()
    }

    #[inline]
    fn joint_radii(&self) -> &[f32] {
        self.hand_data().joint_radii()
    }
}

/// Source of a world-space hand root transform.
pub trait RootPose {
    fn root_pose(&self) -> Transform;

    fn is_root_pose_valid(&self) -> bool;
}

/// A hand driven by tracking or by a test harness.
#[derive(Debug, Clone, Default)]
pub struct TrackedHand {
    pub handedness: Handedness,
    pub hand_data: HandData,
    pub root: Transform,
    pub joints_valid: bool,
    pub root_valid: bool,
}

impl TrackedHand {
    #[must_use]
    pub fn new(handedness: Handedness) -> Self {
        Self {
            handedness,
            hand_data: HandData::new(),
            root: Transform::IDENTITY,
            joints_valid: true,
            root_valid: true,
        }
    }

    #[must_use]
    pub fn with_root(mut self, root: Transform) -> Self {
        self.root = root;
        self
    }
}

impl HandJoints for TrackedHand {
    fn hand_data(&self) -> &HandData {
        &self.hand_data
    }

    fn handedness(&self) -> Handedness {
        self.handedness
    }

    fn is_hand_joint_data_valid(&self) -> bool {
        self.joints_valid
    }
}

impl RootPose for TrackedHand {
    fn root_pose(&self) -> Transform {
        self.root
    }

    fn is_root_pose_valid(&self) -> bool {
        self.root_valid
    }
}
