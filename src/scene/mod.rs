//! Scene Module
//!
//! The minimal world the grab-pose engine reads from:
//! - Transform: position, rotation, scale with mirroring helpers
//! - World: arena of actors and grab pose components
//! - ReferenceSkeleton: bone hierarchy for authoring and hand mapping

pub mod skeleton;
pub mod transform;
pub mod world;

pub use skeleton::{BoneInfo, ReferenceSkeleton};
pub use transform::{Axis, Rotator, Transform};
pub use world::{Actor, GrabPoseComponent, World};

use slotmap::new_key_type;

new_key_type! {
    pub struct ActorKey;
    pub struct ComponentKey;
}
