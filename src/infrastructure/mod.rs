//! Infrastructure layer - External dependencies and adapters
//!
//! Screenplay loading from files and the storage media save slots are written to.

pub mod loader;
pub mod repositories;

pub use loader::*;
pub use repositories::*;
