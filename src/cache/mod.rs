//! Variation Cache Module
//!
//! Grab pose registrations are collapsed per actor class into an
//! append-only list of variations. Each actor instance then refers to the
//! subset of variations that were registered on it.
//!
//! - [`GrabPoseProperties`]: matching and behaviour configuration
//! - [`PoseDataGroup`]: per-hand pose assets of one variation
//! - [`ActorClassCache`]: variations of one class plus instance sets
//! - [`VariationCache`]: the class-keyed registry with deduplication

pub mod actor_cache;
pub mod properties;
pub mod variation;
pub mod variation_cache;

pub use actor_cache::{ActorClassCache, InstanceVariations};
pub use properties::{GrabPoseMode, GrabPoseProperties, MirrorMode};
pub use variation::{NewVariation, PoseDataGroup, VariationEntry, VariationIndex};
pub use variation_cache::{VariationCache, VariationLookup, VariationMatch};
