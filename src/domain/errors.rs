//! Engine errors - load failures and structural corruption

use thiserror::Error;

/// Errors raised while decoding or validating a screenplay.
///
/// All of these are fatal at startup: nothing can run without a valid screenplay.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read screenplay {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed screenplay payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Screenplay contains no event blocks")]
    Empty,

    #[error("Event block {id} has no instructions")]
    EmptyBlock { id: i64 },

    #[error("Duplicate event block id {id} at positions {first} and {second}")]
    DuplicateBlockId { id: i64, first: usize, second: usize },

    #[error("Event block {from} edge {edge} points to unknown block {target}")]
    DanglingEdge { from: i64, edge: usize, target: i64 },
}

impl LoadError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by the interpreter when the cursor or a branch target is invalid
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Block index {index} out of range ({len} blocks)")]
    BlockOutOfRange { index: usize, len: usize },

    #[error("Instruction index {index} out of range in block {block_id} ({len} instructions)")]
    InstructionOutOfRange {
        block_id: i64,
        index: usize,
        len: usize,
    },

    #[error("Block {block_id} has no edge {edge} ({available} edges)")]
    EdgeOutOfRange {
        block_id: i64,
        edge: usize,
        available: usize,
    },

    #[error("Unknown block id {id}")]
    UnknownBlockId { id: i64 },

    #[error("No decision is pending")]
    NoPendingDecision,

    #[error("Screenplay has ended")]
    Finished,

    #[error("Execution exceeded {steps} instructions without reaching a suspension point")]
    RunawayExecution { steps: usize },
}

impl EngineError {
    /// Whether this error means the loaded data and the cursor disagree
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::BlockOutOfRange { .. }
                | Self::InstructionOutOfRange { .. }
                | Self::EdgeOutOfRange { .. }
                | Self::UnknownBlockId { .. }
        )
    }
}
