//! Application layer - Playback orchestration
//!
//! Combines the interpreter with presentation tracking, voice cues and save slots.
//! It depends on the domain contracts but not on a concrete storage medium.

pub mod api;
pub mod directives;
pub mod engine;
pub mod services;

pub use directives::DirectiveCollector;
pub use services::SaveSlots;
