#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! Grab pose matching, caching, mirroring and blending for tracked hands.
//!
//! Authored grab poses are registered per actor class into a
//! [`VariationCache`]. When a hand selects an actor the
//! [`HandPoseSubsystem`] picks the cached pose whose placement is closest to
//! the hand, and a [`HandVisual`] blends its joints (and optionally its
//! root) onto that pose.

pub mod animation;
pub mod assets;
pub mod cache;
pub mod debug;
pub mod errors;
pub mod hand;
pub mod interaction;
pub mod matcher;
pub mod scene;
pub mod settings;
pub mod subsystem;
pub mod utils;

pub use animation::{HandVisual, LerpState, PoseBlend, RootSnapBlend, SkeletonMappingState};
pub use cache::{GrabPoseMode, GrabPoseProperties, MirrorMode, PoseDataGroup, VariationCache, VariationIndex};
pub use debug::DebugShape;
pub use errors::{HandPoseError, Result};
pub use hand::{HandBone, HandData, HandJoints, HandPoseData, Handedness, RootPose, TrackedHand};
pub use interaction::{InteractorState, InteractorStateEvent};
pub use matcher::{GrabPoseMatch, PoseMatcher};
pub use scene::{ActorKey, Axis, ComponentKey, GrabPoseComponent, Transform, World};
pub use settings::HandPoseSettings;
pub use subsystem::{HandPoseSubsystem, RegistrationOutcome};
pub use utils::interner::ClassName;
