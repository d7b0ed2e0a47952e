//! Screenplay loading from JSON sources

use std::path::Path;

use log::{info, warn};

use crate::domain::errors::LoadError;
use crate::types::screenplay::Screenplay;

/// Decode and validate a screenplay from JSON text
pub fn load_screenplay_str(src: &str) -> Result<Screenplay, LoadError> {
    let screenplay = Screenplay::from_json(src)?;
    report(&screenplay);
    Ok(screenplay)
}

/// Read, decode and validate a screenplay file
pub async fn load_screenplay(path: impl AsRef<Path>) -> Result<Screenplay, LoadError> {
    let path = path.as_ref();
    let src = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::io(path.display().to_string(), e))?;
    load_screenplay_str(&src)
}

fn report(screenplay: &Screenplay) {
    info!(
        target: "tsuzuri::engine",
        "Loaded screenplay: {} blocks, {} pooled strings",
        screenplay.len(),
        screenplay.text_pool().len()
    );

    let unresolved = screenplay.unresolved_tokens();
    if !unresolved.is_empty() {
        warn!(
            target: "tsuzuri::text",
            "{} string tokens do not resolve and will be shown verbatim (first: {:?} in block {})",
            unresolved.len(),
            unresolved[0].token,
            unresolved[0].block_id
        );
    }
}
