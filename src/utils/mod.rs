//! Utility Module
//!
//! - [`interner`]: String interning for actor class identifiers
//!
//! ```rust,ignore
//! use grabpose::utils::interner::ClassName;
//!
//! let a = ClassName::new("BP_Mug");
//! let b = ClassName::new("BP_Mug");
//! assert_eq!(a, b); // O(1) comparison
//! ```

pub mod interner;

pub use interner::{ClassName, Symbol};
