//! Debug shapes recorded by the subsystem for an external renderer.

use glam::Vec3;

use crate::scene::Transform;

#[derive(Debug, Clone, PartialEq)]
pub enum DebugShape {
    CoordinateSystem { transform: Transform, axis_length: f32 },
    Arrow { start: Vec3, end: Vec3 },
}

/// Shapes recorded since the last subsystem tick.
#[derive(Debug, Clone, Default)]
pub struct DebugDraw {
    shapes: Vec<DebugShape>,
}

impl DebugDraw {
    pub fn coordinate_system(&mut self, transform: Transform, axis_length: f32) {
        self.shapes.push(DebugShape::CoordinateSystem { transform, axis_length });
    }

    pub fn arrow(&mut self, start: Vec3, end: Vec3) {
        self.shapes.push(DebugShape::Arrow { start, end });
    }

    #[must_use]
    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}
