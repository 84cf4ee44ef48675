use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::scene::{ActorKey, Transform};

use super::GrabPoseProperties;
use super::variation::{NewVariation, PoseDataGroup, VariationEntry, VariationIndex};

/// Variation indices applicable to one actor instance, in insertion order.
pub type InstanceVariations = SmallVec<[VariationIndex; 4]>;

/// Parallel per-variation arrays. Every array always has the same length.
#[derive(Debug, Default)]
struct PoseDataCache {
    transforms: Vec<Transform>,
    pose_groups: Vec<PoseDataGroup>,
    names: Vec<String>,
    properties: Vec<GrabPoseProperties>,
}

impl PoseDataCache {
    fn len(&self) -> usize {
        let len = self.transforms.len();
        assert!(
            self.pose_groups.len() == len && self.names.len() == len && self.properties.len() == len,
            "pose data cache arrays out of sync: {} transforms, {} groups, {} names, {} properties",
            len,
            self.pose_groups.len(),
            self.names.len(),
            self.properties.len(),
        );
        len
    }
}

/// All variations registered for one actor class.
#[derive(Debug, Default)]
pub struct ActorClassCache {
    data: PoseDataCache,
    instances: FxHashMap<ActorKey, InstanceVariations>,
    original_to_mirror: FxHashMap<VariationIndex, VariationIndex>,
}

impl ActorClassCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached variations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push(&mut self, variation: NewVariation) -> VariationIndex {
        let index = VariationIndex(self.len() as u32);
        self.data.transforms.push(variation.transform);
        self.data.pose_groups.push(variation.pose_group);
        self.data.names.push(variation.name);
        self.data.properties.push(variation.properties);
        index
    }

    #[must_use]
    pub fn entry(&self, index: VariationIndex) -> Option<VariationEntry<'_>> {
        let i = index.get();
        if i >= self.len() {
            return None;
        }
        Some(VariationEntry {
            index,
            transform: &self.data.transforms[i],
            pose_group: &self.data.pose_groups[i],
            name: &self.data.names[i],
            properties: &self.data.properties[i],
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = VariationEntry<'_>> {
        (0..self.len() as u32).filter_map(|i| self.entry(VariationIndex(i)))
    }

    // ========================================================================
    // Instances
    // ========================================================================

    /// Records `index` for `actor`. Returns false if it was already recorded.
    pub(crate) fn add_to_instance(&mut self, actor: ActorKey, index: VariationIndex) -> bool {
        let set = self.instances.entry(actor).or_default();
        if set.contains(&index) {
            return false;
        }
        set.push(index);
        true
    }

    #[must_use]
    pub fn instance_variations(&self, actor: ActorKey) -> Option<&[VariationIndex]> {
        self.instances.get(&actor).map(SmallVec::as_slice)
    }

    pub fn instances(&self) -> impl Iterator<Item = (ActorKey, &[VariationIndex])> {
        self.instances.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    // ========================================================================
    // Mirror Pairs
    // ========================================================================

    pub(crate) fn record_mirror(&mut self, original: VariationIndex, mirror: VariationIndex) {
        self.original_to_mirror.insert(original, mirror);
    }

    #[must_use]
    pub fn mirror_of(&self, original: VariationIndex) -> Option<VariationIndex> {
        self.original_to_mirror.get(&original).copied()
    }
}
