//! Public API types - External contracts for the tsuzuri library
//!
//! These types form the stable contract hosts depend on and should be changed with care.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{EngineError, LoadError};
use crate::domain::repositories::RepositoryError;
use crate::types::dialog::DisplayMode;

/// Next action that the host should take after processing directives
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum NextAction {
    /// Wait for the player to advance
    WaitUser,
    /// Wait for the player to pick one of the branch choices
    WaitBranch,
    /// The screenplay is finished
    Halt,
}

/// A single directive to execute (show text, play sound, swap an image...)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "args")]
#[non_exhaustive]
pub enum Directive {
    /// Display a line; `speaker` is empty for narration
    Say {
        speaker: String,
        text: String,
        mode: DisplayMode,
    },
    /// Show an image on a layer, or clear the layer when `path` is `None`
    ShowImage { layer: String, path: Option<String> },
    /// Play background music, or stop it when `path` is `None`
    PlayBgm { path: Option<String> },
    /// Play a sound effect
    PlaySe { path: String },
    /// Play a character voice
    PlayVoice { path: String },
    /// Present choices to the player
    Branch { choices: Vec<String> },
}

/// Image layers
pub mod layer {
    pub const BACKGROUND: &str = "background";
    pub const PORTRAIT: &str = "portrait";
}

/// Result of a single step execution
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StepResult {
    /// What action the host should take next
    pub next: NextAction,
    /// Directives to execute in order
    pub directives: Vec<Directive>,
}

impl StepResult {
    /// Branch choices, when the host must pick one
    pub fn choices(&self) -> Option<&[String]> {
        self.directives.iter().find_map(|d| match d {
            Directive::Branch { choices } => Some(choices.as_slice()),
            _ => None,
        })
    }
}

/// Error types returned by the public API
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
    /// Invalid operation or state
    #[error("invalid operation: {0}")]
    Invalid(String),
}

impl ApiError {
    /// Create an invalid operation error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
