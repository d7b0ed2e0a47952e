//! Core types for the tsuzuri library
//!
//! - Instruction: typed screenplay opcodes and their resolved views
//! - Screenplay: event blocks, the text pool and load validation
//! - Dialog: classified dialog lines
//! - Notification: what observers receive
//! - Save: the resumable state shape

pub mod dialog;
pub mod instruction;
pub mod notification;
pub mod save;
pub mod screenplay;

pub use dialog::{DialogLine, DialogLineData, DisplayMode};
pub use instruction::{Command, ImageRef, Instruction, InstructionKind, ResolvedInstruction};
pub use notification::Notification;
pub use save::{PresentationSnapshot, SaveRecord, SaveState};
pub use screenplay::{BlockId, EventBlock, Screenplay, ScreenplayData};
