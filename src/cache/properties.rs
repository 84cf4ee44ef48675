use crate::scene::Axis;

/// How a matched grab pose is applied to the hand and the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GrabPoseMode {
    /// Pose only, no root movement.
    None,
    /// The hand root moves onto the object.
    SnapPoseToObject,
    /// The object follows the hand; the hand root stays tracked.
    #[default]
    SnapObjectToPose,
    /// Placeholder marking the manual mirror counterpart of its parent pose.
    /// Never matched on its own.
    MirrorReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MirrorMode {
    #[default]
    None,
    /// The opposite-hand pose is generated on registration.
    Automatic,
    /// A child grab pose in `MirrorReference` mode supplies the placement.
    Manual,
}

/// Per-variation matching and behaviour configuration.
///
/// Compared field by field when deduplicating registrations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrabPoseProperties {
    pub pose_mode: GrabPoseMode,
    /// Seconds the hand root takes to reach the object in
    /// [`GrabPoseMode::SnapPoseToObject`].
    pub snap_move_duration: f32,
    pub mirroring_mode: MirrorMode,
    /// With automatic mirroring, also reflect the grab placement instead of
    /// sharing it between both hands.
    pub mirror_location_and_rotation: bool,
    /// Plane normal used when the placement is reflected.
    pub mirror_axis: Axis,
}

impl Default for GrabPoseProperties {
    fn default() -> Self {
        Self {
            pose_mode: GrabPoseMode::default(),
            snap_move_duration: 0.25,
            mirroring_mode: MirrorMode::default(),
            mirror_location_and_rotation: false,
            mirror_axis: Axis::X,
        }
    }
}

impl GrabPoseProperties {
    #[must_use]
    pub fn with_pose_mode(mut self, mode: GrabPoseMode) -> Self {
        self.pose_mode = mode;
        self
    }

    #[must_use]
    pub fn with_mirroring(mut self, mode: MirrorMode) -> Self {
        self.mirroring_mode = mode;
        self
    }

    #[must_use]
    pub fn with_mirrored_location(mut self, axis: Axis) -> Self {
        self.mirror_location_and_rotation = true;
        self.mirror_axis = axis;
        self
    }

    #[must_use]
    pub fn with_snap_move_duration(mut self, seconds: f32) -> Self {
        self.snap_move_duration = seconds;
        self
    }
}
