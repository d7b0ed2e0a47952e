//! Instruction representation
//!
//! Instructions arrive as a generic `{type, params, stringParams}` carrier. The
//! interpreter only cares about two kinds (dialog and decision); everything else is
//! interpreted by observers through the typed [`Command`] view.

use serde::{Deserialize, Serialize};

/// Type tag of a dialog line instruction
pub const PLAY_DIALOG: &str = "PlayDialog";
/// Type tag of a decision prompt instruction
pub const SHOW_DECISION: &str = "ShowDecision";

/// A single screenplay instruction as loaded from the compiled screenplay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    /// Instruction type tag (e.g. `PlayDialog`)
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Positional integer arguments
    #[serde(default)]
    pub params: Vec<i32>,
    /// Positional string tokens, possibly `$<n>` references into the text pool
    #[serde(default)]
    pub string_params: Vec<String>,
}

impl Instruction {
    pub fn new(type_tag: impl Into<String>, params: Vec<i32>, string_params: Vec<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            params,
            string_params,
        }
    }

    pub fn kind(&self) -> InstructionKind {
        InstructionKind::from_tag(&self.type_tag)
    }
}

/// Closed vocabulary of instruction kinds known to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionKind {
    PlayDialog,
    ShowDecision,
    PlayBgm,
    PlaySe,
    SetBgImg,
    SetCharaImg,
    ShowCg,
    TransitionToGraphics,
    /// Forward-compatible carrier for tags this build does not know
    Unknown(String),
}

impl InstructionKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            PLAY_DIALOG => Self::PlayDialog,
            SHOW_DECISION => Self::ShowDecision,
            "PlayBgm" => Self::PlayBgm,
            "PlaySe" => Self::PlaySe,
            "SetBgImg" => Self::SetBgImg,
            "SetCharaImg" => Self::SetCharaImg,
            "ShowCg" => Self::ShowCg,
            "TransitionToGraphics" | "TransitionToGraphicsFade" => Self::TransitionToGraphics,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// An instruction with every string token resolved through the text pool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedInstruction {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub params: Vec<i32>,
    pub string_params: Vec<String>,
}

impl ResolvedInstruction {
    pub fn kind(&self) -> InstructionKind {
        InstructionKind::from_tag(&self.type_tag)
    }

    /// First string parameter, if any
    pub fn text(&self) -> Option<&str> {
        self.string_params.first().map(String::as_str)
    }

    /// Typed view of this instruction
    pub fn command(&self) -> Command<'_> {
        let s = &self.string_params;
        let image = |a: usize, b: usize| image_at(s, a, b);

        match self.kind() {
            InstructionKind::PlayDialog => Command::Dialog { line: self.text() },
            InstructionKind::ShowDecision => Command::Decision {
                labels: s.iter().map(String::as_str).filter(|l| !l.is_empty()).collect(),
            },
            InstructionKind::PlayBgm => Command::PlayBgm { track: self.text() },
            InstructionKind::PlaySe => match self.text() {
                Some(name) => Command::PlaySe { name },
                None => Command::Incomplete { kind: self.kind() },
            },
            InstructionKind::SetBgImg if s.len() >= 2 => Command::SetBackground { image: image(0, 1) },
            InstructionKind::SetCharaImg if s.len() >= 2 => Command::SetPortrait { image: image(0, 1) },
            InstructionKind::ShowCg => match self.text() {
                Some(name) => Command::ShowCg { name },
                None => Command::Incomplete { kind: self.kind() },
            },
            InstructionKind::TransitionToGraphics if s.len() >= 4 => {
                Command::TransitionToGraphics { image: image(2, 3) }
            }
            InstructionKind::Unknown(tag) => Command::Unknown { tag },
            kind => Command::Incomplete { kind },
        }
    }
}

// `"0"` in either slot means "clear"
fn image_at(s: &[String], folder: usize, name: usize) -> Option<ImageRef<'_>> {
    let folder = s[folder].as_str();
    let name = s[name].as_str();
    if folder == "0" || name == "0" {
        None
    } else {
        Some(ImageRef { folder, name })
    }
}

/// Background or portrait reference: `{folder}/{name}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef<'a> {
    pub folder: &'a str,
    pub name: &'a str,
}

/// Typed payload of a resolved instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// A line of dialog or narration
    Dialog { line: Option<&'a str> },
    /// Non-empty option labels of a decision prompt
    Decision { labels: Vec<&'a str> },
    /// Start a music track, or stop the current one when `None`
    PlayBgm { track: Option<&'a str> },
    /// Fire a sound effect
    PlaySe { name: &'a str },
    /// Set the background, `None` clears it
    SetBackground { image: Option<ImageRef<'a>> },
    /// Set the character portrait, `None` clears it
    SetPortrait { image: Option<ImageRef<'a>> },
    /// Full-screen CG; clears the portrait
    ShowCg { name: &'a str },
    /// Transition to a background, `None` means a black screen
    TransitionToGraphics { image: Option<ImageRef<'a>> },
    /// Known kind with too few parameters
    Incomplete { kind: InstructionKind },
    /// Unknown type tag
    Unknown { tag: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(tag: &str, strings: &[&str]) -> ResolvedInstruction {
        ResolvedInstruction {
            type_tag: tag.to_string(),
            params: vec![],
            string_params: strings.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn kind_maps_known_tags() {
        assert_eq!(InstructionKind::from_tag("PlayDialog"), InstructionKind::PlayDialog);
        assert_eq!(
            InstructionKind::from_tag("TransitionToGraphicsFade"),
            InstructionKind::TransitionToGraphics
        );
        assert_eq!(
            InstructionKind::from_tag("Shake"),
            InstructionKind::Unknown("Shake".to_string())
        );
    }

    #[test]
    fn background_zero_clears() {
        let cmd = resolved("SetBgImg", &["0", "A01"]);
        assert_eq!(cmd.command(), Command::SetBackground { image: None });

        let cmd = resolved("SetBgImg", &["ROOM", "A01"]);
        assert_eq!(
            cmd.command(),
            Command::SetBackground {
                image: Some(ImageRef {
                    folder: "ROOM",
                    name: "A01"
                })
            }
        );
    }

    #[test]
    fn transition_uses_third_and_fourth_params() {
        let cmd = resolved("TransitionToGraphics", &["x", "y", "PARK", "B02"]);
        assert_eq!(
            cmd.command(),
            Command::TransitionToGraphics {
                image: Some(ImageRef {
                    folder: "PARK",
                    name: "B02"
                })
            }
        );
    }

    #[test]
    fn short_params_are_incomplete() {
        let cmd = resolved("SetCharaImg", &["only_one"]);
        assert_eq!(
            cmd.command(),
            Command::Incomplete {
                kind: InstructionKind::SetCharaImg
            }
        );
    }

    #[test]
    fn decision_drops_empty_labels() {
        let cmd = resolved("ShowDecision", &["行く", "", "戻る"]);
        assert_eq!(
            cmd.command(),
            Command::Decision {
                labels: vec!["行く", "戻る"]
            }
        );
    }

    #[test]
    fn bgm_without_params_stops() {
        assert_eq!(
            resolved("PlayBgm", &[]).command(),
            Command::PlayBgm { track: None }
        );
    }
}
