//! Notifications delivered to observers, in program order

use serde::{Deserialize, Serialize};

use super::dialog::DialogLine;
use super::instruction::ResolvedInstruction;

/// Closed set of notifications the engine emits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum Notification {
    /// Every instruction the interpreter reads, before it is dispatched
    Instruction(ResolvedInstruction),
    /// A classified dialog line is ready (interpreter suspends after this)
    DialogLine(DialogLine),
    /// A decision prompt is ready (interpreter suspends after this)
    Decision { labels: Vec<String> },
    /// A decision was taken; voice line counters start over
    ResetLineCounters,
    /// Re-apply imagery from a save
    RestoreGraphics {
        background: Option<String>,
        portrait: Option<String>,
    },
    /// Re-apply music from a save
    RestoreMusic { track: Option<String> },
}

impl Notification {
    /// Event name, keyed by instruction type for instruction notifications
    pub fn name(&self) -> &str {
        match self {
            Self::Instruction(instruction) => &instruction.type_tag,
            Self::DialogLine(_) => "PlayDialogInternal",
            Self::Decision { .. } => "ShowDecisionInternal",
            Self::ResetLineCounters => "ResetLineCounter",
            Self::RestoreGraphics { .. } => "RestoreGraphics",
            Self::RestoreMusic { .. } => "RestoreMusic",
        }
    }
}
