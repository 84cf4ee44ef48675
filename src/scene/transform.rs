use glam::{EulerRot, Mat3, Quat, Vec3};

/// Default per-component tolerance for [`Transform::equals`].
pub const TRANSFORM_TOLERANCE: f32 = 1e-4;

/// Rigid transform with non-uniform scale.
///
/// Composition follows glam's column convention: `parent.mul_transform(&child)`
/// yields the child expressed in the parent's space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    #[must_use]
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub fn from_rotation_translation(rotation: Quat, position: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Approximate equality with the default tolerance.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.equals_with_tolerance(other, TRANSFORM_TOLERANCE)
    }

    /// Component-wise comparison. Rotations match up to quaternion sign.
    #[must_use]
    pub fn equals_with_tolerance(&self, other: &Self, tolerance: f32) -> bool {
        let same_rotation = self.rotation.abs_diff_eq(other.rotation, tolerance)
            || self.rotation.abs_diff_eq(-other.rotation, tolerance);

        same_rotation
            && self.position.abs_diff_eq(other.position, tolerance)
            && self.scale.abs_diff_eq(other.scale, tolerance)
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Expresses `child` (given relative to `self`) in the space `self` lives in.
    #[must_use]
    pub fn mul_transform(&self, child: &Self) -> Self {
        Self {
            position: self.position + self.rotation * (self.scale * child.position),
            rotation: (self.rotation * child.rotation).normalize(),
            scale: self.scale * child.scale,
        }
    }

    /// Places a relative grab transform on an actor.
    ///
    /// Rotation and translation are taken from the actor, scale from the
    /// relative transform alone. This is the placement the matcher and the
    /// root snap use, not a full composition.
    #[must_use]
    pub fn placed_on(&self, actor: &Self) -> Self {
        Self {
            position: actor.position + actor.rotation * self.position,
            rotation: (actor.rotation * self.rotation).normalize(),
            scale: self.scale,
        }
    }

    #[inline]
    #[must_use]
    pub fn up_vector(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    // ========================================================================
    // Euler Helpers
    // ========================================================================

    /// Rotation as pitch/yaw/roll in degrees.
    #[must_use]
    pub fn rotator(&self) -> Rotator {
        Rotator::from_quat(self.rotation)
    }

    // ========================================================================
    // Mirroring
    // ========================================================================

    /// Reflects the transform across the plane normal to `mirror_axis`, then
    /// flips the local `flip_axis` so the basis stays right-handed.
    ///
    /// `Axis::None` leaves the transform untouched. Scale is preserved.
    #[must_use]
    pub fn mirrored(&self, mirror_axis: Axis, flip_axis: Axis) -> Self {
        let (Some(mirror), Some(flip)) = (mirror_axis.reflection(), flip_axis.reflection()) else {
            return *self;
        };

        let basis = mirror * Mat3::from_quat(self.rotation) * flip;
        Self {
            position: mirror * self.position,
            rotation: Quat::from_mat3(&basis).normalize(),
            scale: self.scale,
        }
    }
}

/// Euler decomposition in degrees: pitch about Y, yaw about Z, roll about X.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    #[must_use]
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    #[must_use]
    pub fn from_quat(rotation: Quat) -> Self {
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::ZYX);
        Self {
            pitch: pitch.to_degrees(),
            yaw: yaw.to_degrees(),
            roll: roll.to_degrees(),
        }
    }

    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::ZYX,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }
}

/// Principal axis selector. `None` disables axis-dependent operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    None,
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    /// Reflection matrix negating this axis.
    #[must_use]
    pub fn reflection(self) -> Option<Mat3> {
        let diagonal = match self {
            Axis::None => return None,
            Axis::X => Vec3::new(-1.0, 1.0, 1.0),
            Axis::Y => Vec3::new(1.0, -1.0, 1.0),
            Axis::Z => Vec3::new(1.0, 1.0, -1.0),
        };
        Some(Mat3::from_diagonal(diagonal))
    }
}
