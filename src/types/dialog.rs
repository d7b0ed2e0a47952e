//! Classified dialog lines

use serde::{Deserialize, Serialize};

/// How the speaker name of a line should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Show the speaker name
    Display,
    /// Do not show a speaker name (narration, or a concealed speaker)
    Hidden,
    /// Speaker marked with the double `・・` marker
    Special,
}

/// Speaker, content and display mode extracted from one line of script text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogLineData {
    /// Recognised speaker, empty for narration
    pub speaker_name: String,
    pub content: String,
    pub display_mode: DisplayMode,
}

impl DialogLineData {
    /// Undisplayed narration: the whole line, no speaker
    pub fn narration(line: impl Into<String>) -> Self {
        Self {
            speaker_name: String::new(),
            content: line.into(),
            display_mode: DisplayMode::Hidden,
        }
    }

    pub fn has_speaker(&self) -> bool {
        !self.speaker_name.is_empty()
    }
}

/// A dialog line produced by the interpreter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogLine {
    #[serde(flatten)]
    pub data: DialogLineData,
    /// Block index after the cursor advanced past this line
    pub block_index: usize,
    /// Authored line number (`params[1]` of the instruction), when present
    pub line_number: Option<i32>,
}

impl DialogLine {
    pub fn speaker(&self) -> &str {
        &self.data.speaker_name
    }

    pub fn content(&self) -> &str {
        &self.data.content
    }

    pub fn mode(&self) -> DisplayMode {
        self.data.display_mode
    }
}
