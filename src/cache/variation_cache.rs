use std::sync::Arc;

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use crate::hand::HandPoseData;
use crate::scene::{ActorKey, Transform};
use crate::utils::ClassName;

use super::GrabPoseProperties;
use super::actor_cache::ActorClassCache;
use super::variation::{NewVariation, PoseDataGroup, VariationIndex};

bitflags! {
    /// Which parts of a registration match a cached variation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct VariationMatch: u8 {
        const TRANSFORM  = 1 << 0;
        const PROPERTIES = 1 << 1;
        const POSE_GROUP = 1 << 2;
    }
}

/// Outcome of the deduplication check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationLookup {
    CreateNew,
    Existing(VariationIndex),
}

/// Grab pose variations of every registered actor class.
///
/// Entries are append-only: a variation index handed out once stays valid
/// and keeps its meaning for the lifetime of the cache.
#[derive(Debug, Default)]
pub struct VariationCache {
    classes: FxHashMap<ClassName, ActorClassCache>,
}

impl VariationCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn class(&self, class: ClassName) -> Option<&ActorClassCache> {
        self.classes.get(&class)
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassName, &ActorClassCache)> {
        self.classes.iter().map(|(k, v)| (*k, v))
    }

    #[must_use]
    pub fn instance_variations(&self, class: ClassName, actor: ActorKey) -> Option<&[VariationIndex]> {
        self.classes.get(&class)?.instance_variations(actor)
    }

    /// Appends a variation and records it for `actor`.
    pub fn add_variation(&mut self, class: ClassName, actor: ActorKey, variation: NewVariation) -> VariationIndex {
        let cache = self.classes.entry(class).or_default();
        let name = variation.name.clone();
        let index = cache.push(variation);
        cache.add_to_instance(actor, index);
        log::debug!("Class '{class}': added variation {index} '{name}' for {actor:?}");
        index
    }

    /// Records an existing variation for `actor`, along with its mirror
    /// counterpart if one was registered.
    pub fn add_existing_variation_to_instance(
        &mut self,
        class: ClassName,
        actor: ActorKey,
        index: VariationIndex,
    ) -> bool {
        let Some(cache) = self.classes.get_mut(&class) else {
            log::warn!("Class '{class}' has no cached variations");
            return false;
        };
        if index.get() >= cache.len() {
            log::warn!("Class '{class}': variation {index} out of range ({} entries)", cache.len());
            return false;
        }

        cache.add_to_instance(actor, index);
        if let Some(mirror) = cache.mirror_of(index) {
            cache.add_to_instance(actor, mirror);
        }
        true
    }

    /// Looks for a cached variation equivalent to this registration.
    ///
    /// A variation is equivalent when its transform matches approximately,
    /// its properties are equal and its pose group already holds `pose`
    /// under `pose`'s handedness. The first such entry wins.
    #[must_use]
    pub fn should_create_new_variation(
        &self,
        class: ClassName,
        transform: &Transform,
        properties: &GrabPoseProperties,
        pose: &Arc<HandPoseData>,
    ) -> VariationLookup {
        let Some(cache) = self.classes.get(&class) else {
            return VariationLookup::CreateNew;
        };

        cache
            .entries()
            .find(|entry| {
                let mut matched = VariationMatch::empty();
                matched.set(VariationMatch::TRANSFORM, entry.transform.equals(transform));
                matched.set(VariationMatch::PROPERTIES, entry.properties == properties);
                matched.set(VariationMatch::POSE_GROUP, entry.pose_group.contains_pose(pose));
                matched == VariationMatch::all()
            })
            .map_or(VariationLookup::CreateNew, |entry| VariationLookup::Existing(entry.index))
    }

    /// Records that `mirror` was generated from `original`.
    pub fn record_mirror(&mut self, class: ClassName, original: VariationIndex, mirror: VariationIndex) {
        if let Some(cache) = self.classes.get_mut(&class) {
            cache.record_mirror(original, mirror);
        }
    }

    /// Pose group shortcut, mostly for inspection.
    #[must_use]
    pub fn pose_group(&self, class: ClassName, index: VariationIndex) -> Option<&PoseDataGroup> {
        self.classes.get(&class)?.entry(index).map(|entry| entry.pose_group)
    }
}
