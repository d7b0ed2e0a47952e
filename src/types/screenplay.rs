//! Screenplay model: event blocks, the text pool and load-time validation

use crate::domain::errors::LoadError;
use crate::text_pool::{TokenResolution, resolve_token};
use crate::types::instruction::Instruction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable identifier of an event block
pub type BlockId = i64;

/// An addressable group of sequential instructions with outgoing edges
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventBlock {
    #[serde(rename = "evId")]
    pub id: BlockId,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    /// Outgoing edges, addressed by index (0 is the fallthrough edge)
    #[serde(default)]
    pub return_values: Vec<BlockId>,
}

impl EventBlock {
    pub fn new(id: BlockId, instructions: Vec<Instruction>, return_values: Vec<BlockId>) -> Self {
        Self {
            id,
            instructions,
            return_values,
        }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// A block without outgoing edges ends the screenplay
    pub fn is_terminal(&self) -> bool {
        self.return_values.is_empty()
    }
}

/// Decoded screenplay payload: `{ events, textPool }`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScreenplayData {
    #[serde(default)]
    pub events: Vec<EventBlock>,
    #[serde(default)]
    pub text_pool: Vec<String>,
}

/// A token that will degrade to its literal text at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedToken {
    pub block_id: BlockId,
    pub instruction_index: usize,
    pub token: String,
}

/// Validated, immutable screenplay
#[derive(Debug, Clone, PartialEq)]
pub struct Screenplay {
    blocks: Vec<EventBlock>,
    text_pool: Vec<String>,
    id_to_index: HashMap<BlockId, usize>,
    fingerprint: String,
}

impl Screenplay {
    /// Validate decoded data and build the id → position table
    pub fn from_data(data: ScreenplayData) -> Result<Self, LoadError> {
        let ScreenplayData { events, text_pool } = data;
        if events.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut id_to_index = HashMap::with_capacity(events.len());
        for (index, block) in events.iter().enumerate() {
            if block.is_empty() {
                return Err(LoadError::EmptyBlock { id: block.id });
            }
            if let Some(first) = id_to_index.insert(block.id, index) {
                return Err(LoadError::DuplicateBlockId {
                    id: block.id,
                    first,
                    second: index,
                });
            }
        }

        for block in &events {
            for (edge, target) in block.return_values.iter().enumerate() {
                if !id_to_index.contains_key(target) {
                    return Err(LoadError::DanglingEdge {
                        from: block.id,
                        edge,
                        target: *target,
                    });
                }
            }
        }

        let fingerprint = fingerprint_of(&events, &text_pool);
        Ok(Self {
            blocks: events,
            text_pool,
            id_to_index,
            fingerprint,
        })
    }

    /// Decode and validate a JSON payload
    pub fn from_json(src: &str) -> Result<Self, LoadError> {
        let data: ScreenplayData = serde_json::from_str(src)?;
        Self::from_data(data)
    }

    pub fn blocks(&self) -> &[EventBlock] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&EventBlock> {
        self.blocks.get(index)
    }

    pub fn text_pool(&self) -> &[String] {
        &self.text_pool
    }

    pub fn index_of(&self, id: BlockId) -> Option<usize> {
        self.id_to_index.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Every `$n` token whose index is outside the text pool
    pub fn unresolved_tokens(&self) -> Vec<UnresolvedToken> {
        let mut found = Vec::new();
        for block in &self.blocks {
            for (instruction_index, instruction) in block.instructions.iter().enumerate() {
                for token in &instruction.string_params {
                    if let TokenResolution::Unresolved(token) = resolve_token(token, &self.text_pool) {
                        found.push(UnresolvedToken {
                            block_id: block.id,
                            instruction_index,
                            token: token.to_string(),
                        });
                    }
                }
            }
        }
        found
    }

    /// md5 hex digest of the canonical JSON encoding, computed at load
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint_of(events: &[EventBlock], text_pool: &[String]) -> String {
    let data = ScreenplayDataRef { events, text_pool };
    // Serializing plain structs of strings and integers cannot fail
    let bytes = serde_json::to_vec(&data).unwrap_or_default();
    format!("{:x}", md5::compute(bytes))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScreenplayDataRef<'a> {
    events: &'a [EventBlock],
    text_pool: &'a [String],
}
