//! Error Types
//!
//! This module defines the error types used throughout the grab-pose engine.
//!
//! # Overview
//!
//! The main error type [`HandPoseError`] covers the failure modes of pose
//! registration, mirroring and authoring:
//! - Stale or missing world references (components, actors)
//! - Missing pose assets
//! - Malformed joint data
//!
//! Every failure is also logged where it is detected; callers that only care
//! about success can ignore the payload.
//!
//! # Usage
//!
//! ```rust,ignore
//! use grabpose::errors::{HandPoseError, Result};
//!
//! fn register() -> Result<()> {
//!     Err(HandPoseError::MissingPoseData("Mug_Grab".into()))
//! }
//! ```

use thiserror::Error;

use crate::scene::{ActorKey, ComponentKey};

/// The main error type for the grab-pose engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandPoseError {
    // ========================================================================
    // World Reference Errors
    // ========================================================================
    /// The grab pose component no longer exists in the world.
    #[error("Invalid grab pose component: {0:?}")]
    InvalidComponent(ComponentKey),

    /// The owning actor no longer exists in the world.
    #[error("Invalid actor: {0:?}")]
    InvalidActor(ActorKey),

    // ========================================================================
    // Pose Data Errors
    // ========================================================================
    /// A grab pose was registered without a pose asset.
    #[error("Grab pose '{0}' has no hand pose data")]
    MissingPoseData(String),

    /// Joint arrays must always hold exactly the hand joint count.
    #[error("Joint count mismatch: expected {expected}, got {actual}")]
    JointCountMismatch {
        /// Required joint count
        expected: usize,
        /// Supplied joint count
        actual: usize,
    },

    /// Joint index outside the hand joint range.
    #[error("Joint index {0} out of range")]
    JointIndexOutOfRange(usize),

    /// A live joint source reported invalid data.
    #[error("Hand joint source is invalid")]
    InvalidJointSource,

    /// A skeleton did not contain a bone the hand mapping requires.
    #[error("Bone '{0}' not found in skeleton")]
    BoneNotFound(String),
}

/// Alias for `Result<T, HandPoseError>`.
pub type Result<T> = std::result::Result<T, HandPoseError>;
