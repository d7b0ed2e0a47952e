//! Save-state capture and restore
//!
//! Capture reads the cursor and asks the presentation owner for a snapshot. Restore writes
//! the cursor back and lets presentation observers re-apply their part; no instruction is
//! replayed.

use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};

use crate::domain::errors::EngineError;
use crate::runtime::{Cursor, Interpreter};
use crate::stage::PresentationSource;
use crate::types::notification::Notification;
use crate::types::save::SaveState;

/// Snapshot the interpreter cursor and the current presentation
pub fn capture(interpreter: &Interpreter, presentation: &impl PresentationSource) -> SaveState {
    let context = interpreter.context();
    let cursor = context.cursor();
    let snapshot = presentation.snapshot();

    SaveState {
        current_block_index: cursor.block_index,
        current_instruction_index: cursor.instruction_index,
        current_bg: snapshot.background,
        current_portrait: snapshot.portrait,
        current_bgm: snapshot.bgm,
        saved_at: unix_now(),
        event_id: context.current_block().ok().map(|block| block.id),
        screenplay_fingerprint: Some(context.screenplay().fingerprint().to_string()),
    }
}

/// Put the interpreter back where `state` was captured.
///
/// The cursor is checked against the loaded blocks before it is written.
pub fn restore(interpreter: &mut Interpreter, state: &SaveState) -> Result<(), EngineError> {
    if let Some(saved) = &state.screenplay_fingerprint {
        let loaded = interpreter.context().screenplay().fingerprint();
        if saved != loaded {
            warn!(
                target: "tsuzuri::save",
                "Save was taken against a different screenplay ({saved} != {loaded})"
            );
        }
    }

    interpreter.restore_cursor(Cursor::new(
        state.current_block_index,
        state.current_instruction_index,
    ))?;

    interpreter.broadcast(&Notification::RestoreGraphics {
        background: state.current_bg.clone(),
        portrait: state.current_portrait.clone(),
    });
    interpreter.broadcast(&Notification::RestoreMusic {
        track: state.current_bgm.clone(),
    });
    info!(
        target: "tsuzuri::save",
        "Restored block {} instruction {}",
        state.current_block_index, state.current_instruction_index
    );
    Ok(())
}

/// Encode a save state as JSON bytes
pub fn to_bytes(state: &SaveState) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(state)
}

/// Decode a save state from JSON bytes
pub fn from_bytes(bytes: &[u8]) -> Result<SaveState, serde_json::Error> {
    serde_json::from_slice(bytes)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
