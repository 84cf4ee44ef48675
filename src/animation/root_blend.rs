use crate::cache::GrabPoseMode;
use crate::scene::{ActorKey, Transform};

use super::blend::LerpState;
use super::values::Interpolatable;

/// Moves the hand root onto a grabbed object and back.
///
/// Only [`GrabPoseMode::SnapPoseToObject`] overrides the root. While
/// overriding, the root follows `offset` placed on the object; snapping in
/// and out is blended over the pose's snap-move duration.
#[derive(Debug, Clone, Default)]
pub struct RootSnapBlend {
    state: LerpState,
    overriding: bool,
    mode: Option<GrabPoseMode>,
    actor: Option<ActorKey>,
    offset: Transform,
    start: Transform,
    duration: f32,
    elapsed: f32,
}

impl RootSnapBlend {
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
    pub fn actor(&self) -> Option<ActorKey> {
        self.actor
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> Transform {
        self.offset
    }

    #[must_use]
    pub fn mode(&self) -> Option<GrabPoseMode> {
        self.mode
    }

    /// Whether the root should follow the object this frame.
    #[inline]
    #[must_use]
    pub fn is_overriding_root(&self) -> bool {
        self.overriding && self.mode == Some(GrabPoseMode::SnapPoseToObject)
    }

    /// Starts following `actor` at `offset`. `current_root` is where the hand
    /// root is right now; a positive `snap_duration` blends from there.
    pub fn begin(
        &mut self,
        actor: ActorKey,
        offset: Transform,
        mode: GrabPoseMode,
        snap_duration: f32,
        current_root: Transform,
    ) {
        self.actor = Some(actor);
        self.offset = offset;
        self.mode = Some(mode);
        self.overriding = true;

        if mode == GrabPoseMode::SnapPoseToObject && snap_duration > 0.0 {
            self.duration = snap_duration;
            self.elapsed = 0.0;
            self.start = current_root;
            self.state = LerpState::TransitioningTo;
        } else {
            self.state = LerpState::Inactive;
        }
    }

    /// Lets go of the object. A hand resting on the object blends back to
    /// the tracked root; anything else drops the override at once.
    pub fn release(&mut self, actor_transform: Option<&Transform>, root: &Transform) {
        match (self.state, actor_transform) {
            (LerpState::RestingAtDestination, Some(actor_transform)) => {
                self.start = self.target(actor_transform, root);
                self.elapsed = 0.0;
                self.state = LerpState::TransitioningAway;
            }
            _ => self.clear(),
        }
    }

    /// Moves the snap timer forward.
    pub fn advance(&mut self, dt: f32) {
        if self.state.is_transitioning() {
            self.elapsed += dt;
        }
    }

    /// Root transform for this frame given the object and the tracked root.
    ///
    /// Completes the snap-in (to resting) and snap-out (override released)
    /// once their duration has elapsed.
    pub fn resolve(&mut self, actor_transform: &Transform, root: &Transform) -> Transform {
        let target = self.target(actor_transform, root);
        if self.duration <= 0.0 {
            return target;
        }

        let alpha = (self.elapsed / self.duration).min(1.0);
        match self.state {
            LerpState::TransitioningTo => {
                let blended = Transform::interpolate_linear(self.start, target, alpha);
                if alpha >= 1.0 {
                    self.state = LerpState::RestingAtDestination;
                }
                blended
            }
            LerpState::TransitioningAway => {
                let blended = Transform::interpolate_linear(self.start, *root, alpha);
                if alpha >= 1.0 {
                    self.clear();
                }
                blended
            }
            _ => target,
        }
    }

    fn target(&self, actor_transform: &Transform, root: &Transform) -> Transform {
        Transform {
            scale: root.scale,
            ..self.offset.placed_on(actor_transform)
        }
    }

    fn clear(&mut self) {
        self.state = LerpState::Inactive;
        self.overriding = false;
        self.mode = None;
        self.actor = None;
        self.duration = 0.0;
        self.elapsed = 0.0;
    }
}
