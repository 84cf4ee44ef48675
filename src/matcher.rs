//! Grab Pose Matching
//!
//! Picks the cached variation closest to the hand. The score adds the
//! squared positional distance to the summed absolute yaw, pitch and roll
//! differences in degrees:
//!
//! ```text
//! score = |hand.pos - grab.pos|² + |Δyaw| + |Δpitch| + |Δroll|
//! ```
//!
//! This is a cheap heuristic, not a metric. Units are mixed, angles are not
//! wrapped and Euler components are compared independently, so it can
//! misrank poses near gimbal singularities or across the ±180° seam. Treat
//! it as tunable.

use std::sync::Arc;

use crate::cache::{GrabPoseProperties, VariationCache, VariationIndex};
use crate::hand::{HandPoseData, Handedness};
use crate::scene::{ActorKey, Transform};
use crate::utils::ClassName;

/// The winning variation for a hand.
#[derive(Debug, Clone)]
pub struct GrabPoseMatch {
    /// Pose asset for the querying hand.
    pub pose: Arc<HandPoseData>,
    /// Relative transform of the variation on its actor.
    pub root_offset: Transform,
    pub properties: GrabPoseProperties,
    pub variation: VariationIndex,
    /// Score of the winner. Lower is closer.
    pub distance: f32,
}

/// Matching score between a hand and a candidate grab transform.
#[must_use]
pub fn grab_pose_distance(hand: &Transform, candidate: &Transform) -> f32 {
    let location_delta = (hand.position - candidate.position).length_squared();
    let hand_rot = hand.rotator();
    let grab_rot = candidate.rotator();
    let rotation_delta = (hand_rot.yaw - grab_rot.yaw).abs()
        + (hand_rot.pitch - grab_rot.pitch).abs()
        + (hand_rot.roll - grab_rot.roll).abs();
    location_delta + rotation_delta
}

/// Read-only query over a [`VariationCache`].
#[derive(Debug, Clone, Copy)]
pub struct PoseMatcher<'a> {
    cache: &'a VariationCache,
}

impl<'a> PoseMatcher<'a> {
    #[must_use]
    pub fn new(cache: &'a VariationCache) -> Self {
        Self { cache }
    }

    /// Best variation registered on `actor` for a hand of `handedness` at
    /// `hand_transform`. Scans in insertion order; the first minimum wins.
    #[must_use]
    pub fn find_best_match(
        &self,
        class: ClassName,
        actor: ActorKey,
        actor_transform: &Transform,
        handedness: Handedness,
        hand_transform: &Transform,
    ) -> Option<GrabPoseMatch> {
        let class_cache = self.cache.class(class)?;
        let variations = class_cache.instance_variations(actor)?;

        let mut best: Option<GrabPoseMatch> = None;
        for &index in variations {
            let Some(entry) = class_cache.entry(index) else {
                continue;
            };
            let Some(pose) = entry.pose_group.get(handedness) else {
                continue;
            };

            let grab_world = entry.transform.placed_on(actor_transform);
            let distance = grab_pose_distance(hand_transform, &grab_world);
            log::trace!("Variation {index} '{}' scored {distance}", entry.name);

            if best.as_ref().is_none_or(|b| distance < b.distance) {
                best = Some(GrabPoseMatch {
                    pose: Arc::clone(pose),
                    root_offset: *entry.transform,
                    properties: *entry.properties,
                    variation: index,
                    distance,
                });
            }
        }
        best
    }
}
