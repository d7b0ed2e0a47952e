//! Save state shape

use serde::{Deserialize, Serialize};

/// Presentation state owned outside the interpreter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationSnapshot {
    pub background: Option<String>,
    pub portrait: Option<String>,
    pub bgm: Option<String>,
}

/// Everything needed to resume a screenplay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    pub current_block_index: usize,
    pub current_instruction_index: usize,
    #[serde(default)]
    pub current_bg: Option<String>,
    #[serde(default)]
    pub current_portrait: Option<String>,
    #[serde(default)]
    pub current_bgm: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub saved_at: u64,
    /// Id of the block the cursor was in
    #[serde(default)]
    pub event_id: Option<i64>,
    /// Fingerprint of the screenplay the save was taken against
    #[serde(default)]
    pub screenplay_fingerprint: Option<String>,
}

impl SaveState {
    pub fn presentation(&self) -> PresentationSnapshot {
        PresentationSnapshot {
            background: self.current_bg.clone(),
            portrait: self.current_portrait.clone(),
            bgm: self.current_bgm.clone(),
        }
    }
}

/// A save state together with the slot it lives in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub slot: usize,
    pub state: SaveState,
}
