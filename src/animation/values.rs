use glam::{Quat, Vec3};

use crate::scene::Transform;

/// Values a blend controller can interpolate.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

/// Normalized shortest-path lerp.
impl Interpolatable for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Transform {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        Transform {
            position: Vec3::interpolate_linear(start.position, end.position, t),
            rotation: Quat::interpolate_linear(start.rotation, end.rotation, t),
            scale: Vec3::interpolate_linear(start.scale, end.scale, t),
        }
    }
}
