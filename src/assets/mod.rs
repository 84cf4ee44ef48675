//! Asset Storage
//!
//! Pose assets generated at runtime (mirrored poses) are owned here rather
//! than by the authoring side. Each one is tracked by the grab pose
//! component whose registration created it.

pub mod storage;

pub use storage::AssetStorage;

use slotmap::new_key_type;

use crate::hand::HandPoseData;
use crate::scene::ComponentKey;

new_key_type! {
    pub struct PoseAssetKey;
}

/// Subsystem-owned pose assets, keyed by requesting component.
pub type GeneratedPoseStorage = AssetStorage<PoseAssetKey, ComponentKey, HandPoseData>;
