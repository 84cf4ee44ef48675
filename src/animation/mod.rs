//! Hand Pose Blending
//!
//! - [`PoseBlend`]: joint-level lerp between tracked joints and a grab pose
//! - [`RootSnapBlend`]: hand root snapping onto a grabbed object
//! - [`HandVisual`]: skeleton mapping plus both blends, ticked per frame

mod values;
pub mod blend;
pub mod hand_visual;
pub mod root_blend;

pub use blend::{LerpState, PoseBlend};
pub use hand_visual::{HandVisual, SkeletonMappingState};
pub use root_blend::RootSnapBlend;
pub use values::Interpolatable;
