use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::hand::HandPoseData;
use crate::scene::Transform;

use super::values::Interpolatable;

/// Progress of a blend into or out of an override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LerpState {
    #[default]
    Inactive,
    TransitioningTo,
    TransitioningAway,
    /// Root snap only: the hand has arrived and follows the object.
    RestingAtDestination,
}

impl LerpState {
    #[inline]
    #[must_use]
    pub fn is_transitioning(self) -> bool {
        matches!(self, LerpState::TransitioningTo | LerpState::TransitioningAway)
    }
}

/// Blends tracked hand joints toward an overriding grab pose and back.
///
/// Driven once per frame: [`advance`](Self::advance), then
/// [`blend_joints`](Self::blend_joints), then [`finish`](Self::finish).
/// [`tick`](Self::tick) runs all three.
#[derive(Debug, Clone, Default)]
pub struct PoseBlend {
    state: LerpState,
    override_pose: Option<Arc<HandPoseData>>,
    lerp_time: f32,
    elapsed: f32,
    alpha: f32,
}

impl PoseBlend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> LerpState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    #[must_use]
    pub fn lerp_time(&self) -> f32 {
        self.lerp_time
    }

    #[must_use]
    pub fn override_pose(&self) -> Option<&Arc<HandPoseData>> {
        self.override_pose.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        self.override_pose.is_some()
    }

    /// Starts overriding with `pose`. Blends in over the pose's lerp time
    /// unless it is zero or `inhibit_lerp` is set, in which case the pose
    /// applies immediately.
    pub fn apply(&mut self, pose: Arc<HandPoseData>, inhibit_lerp: bool) {
        let lerp_time = pose.pose_lerp_time;
        self.override_pose = Some(pose);
        self.elapsed = 0.0;

        if lerp_time > 0.0 && !inhibit_lerp {
            self.lerp_time = lerp_time;
            self.alpha = 0.0;
            self.state = LerpState::TransitioningTo;
        } else {
            self.lerp_time = 0.0;
            self.alpha = 1.0;
            self.state = LerpState::Inactive;
        }
    }

    /// Releases the override, blending out when a lerp time is set.
    pub fn release(&mut self) {
        if self.override_pose.is_none() {
            return;
        }
        if self.lerp_time > 0.0 {
            self.state = LerpState::TransitioningAway;
        } else {
            self.clear();
        }
    }

    /// Moves the accumulator by `dt` and refreshes the blend factor.
    pub fn advance(&mut self, dt: f32) {
        if !self.state.is_transitioning() || self.lerp_time <= 0.0 {
            return;
        }
        self.elapsed = match self.state {
            LerpState::TransitioningTo => (self.elapsed + dt).min(self.lerp_time),
            _ => (self.elapsed - dt).max(0.0),
        };
        self.alpha = (self.elapsed / self.lerp_time).clamp(0.0, 1.0);
    }

    /// Writes the blended joints into `out`. Positions and rotations are
    /// blended; the scale already in `out` is kept.
    pub fn blend_joints(&self, source: &[Transform], out: &mut [Transform]) {
        let override_joints = self.override_pose.as_ref().map(|p| p.hand_data.joint_poses());

        for (index, (dst, src)) in out.iter_mut().zip(source).enumerate() {
            let target = override_joints.and_then(|joints| joints.get(index));
            let (position, rotation) = match target {
                Some(target) if self.state.is_transitioning() => (
                    Vec3::interpolate_linear(src.position, target.position, self.alpha),
                    Quat::interpolate_linear(src.rotation, target.rotation, self.alpha),
                ),
                Some(target) => (target.position, target.rotation),
                None => (src.position, src.rotation),
            };
            dst.position = position;
            dst.rotation = rotation;
        }
    }

    /// Completes finished transitions. Call after the joints were applied.
    pub fn finish(&mut self) {
        match self.state {
            LerpState::TransitioningTo if self.alpha >= 1.0 => {
                self.state = LerpState::Inactive;
            }
            LerpState::TransitioningAway if self.alpha <= 0.0 => {
                self.clear();
            }
            _ => {}
        }
    }

    /// One frame: advance, blend `source` into `out`, finish.
    pub fn tick(&mut self, dt: f32, source: &[Transform], out: &mut [Transform]) {
        self.advance(dt);
        self.blend_joints(source, out);
        self.finish();
    }

    fn clear(&mut self) {
        self.state = LerpState::Inactive;
        self.override_pose = None;
        self.lerp_time = 0.0;
        self.elapsed = 0.0;
        self.alpha = 0.0;
    }
}
