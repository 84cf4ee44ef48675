use std::sync::Arc;

use crate::hand::{HandPoseData, Handedness};
use crate::scene::Transform;

use super::GrabPoseProperties;

/// Stable identifier of a variation within one actor class cache.
///
/// Indices are assigned in insertion order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariationIndex(pub u32);

impl VariationIndex {
    #[inline]
    #[must_use]
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for VariationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pose assets of one variation, at most one per hand.
///
/// Assets are compared by reference: two groups hold "the same" pose only if
/// they point at the same allocation.
#[derive(Debug, Clone, Default)]
pub struct PoseDataGroup {
    slots: [Option<Arc<HandPoseData>>; 2],
}

impl PoseDataGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Group holding `pose` under its own handedness.
    #[must_use]
    pub fn from_pose(pose: Arc<HandPoseData>) -> Self {
        let mut group = Self::new();
        group.insert(pose.handedness, pose);
        group
    }

    /// Stores `pose` for `handedness`, replacing any previous entry.
    pub fn insert(&mut self, handedness: Handedness, pose: Arc<HandPoseData>) {
        self.slots[slot(handedness)] = Some(pose);
    }

    #[inline]
    #[must_use]
    pub fn get(&self, handedness: Handedness) -> Option<&Arc<HandPoseData>> {
        self.slots[slot(handedness)].as_ref()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, handedness: Handedness) -> bool {
        self.slots[slot(handedness)].is_some()
    }

    /// Whether this exact asset is stored under its own handedness.
    #[must_use]
    pub fn contains_pose(&self, pose: &Arc<HandPoseData>) -> bool {
        self.get(pose.handedness).is_some_and(|held| Arc::ptr_eq(held, pose))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handedness, &Arc<HandPoseData>)> {
        [Handedness::Left, Handedness::Right]
            .into_iter()
            .filter_map(|h| self.get(h).map(|pose| (h, pose)))
    }
}

#[inline]
fn slot(handedness: Handedness) -> usize {
    match handedness {
        Handedness::Left => 0,
        Handedness::Right => 1,
    }
}

/// Input for a new cache entry.
#[derive(Debug, Clone)]
pub struct NewVariation {
    pub transform: Transform,
    pub pose_group: PoseDataGroup,
    pub name: String,
    pub properties: GrabPoseProperties,
}

/// Borrowed view of a cached variation.
#[derive(Debug, Clone, Copy)]
pub struct VariationEntry<'a> {
    pub index: VariationIndex,
    pub transform: &'a Transform,
    pub pose_group: &'a PoseDataGroup,
    pub name: &'a str,
    pub properties: &'a GrabPoseProperties,
}
