//! Hand Pose Settings
//!
//! Runtime toggles for the hand pose subsystem. Both debug switches are off
//! by default; the transform overlay walks every actor in the world each
//! tick and is meant for inspection only.
//!
//! ```rust,ignore
//! use grabpose::settings::HandPoseSettings;
//!
//! let settings = HandPoseSettings {
//!     debug_pose_transforms: true,
//!     ..Default::default()
//! };
//! ```

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandPoseSettings {
    /// Record coordinate systems for every cached grab transform each tick.
    pub debug_pose_transforms: bool,
    /// Record the hand's Z axis whenever a pose match runs.
    pub debug_pose_vectors: bool,
    /// Axis length of recorded coordinate systems.
    pub debug_axis_length: f32,
    /// Length of the recorded hand direction arrow.
    pub debug_arrow_length: f32,
}

impl Default for HandPoseSettings {
    fn default() -> Self {
        Self {
            debug_pose_transforms: false,
            debug_pose_vectors: false,
            debug_axis_length: 1.0,
            debug_arrow_length: 15.0,
        }
    }
}
