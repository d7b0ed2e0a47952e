//! Domain layer - Error taxonomy and persistence contracts
//!
//! Independent of any storage medium or presentation layer.

pub mod errors;
pub mod repositories;

pub use errors::*;
pub use repositories::*;
