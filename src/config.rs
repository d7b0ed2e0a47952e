//! Engine configuration
//!
//! Every section has a usable default, so a config file only needs the keys it changes.

use crate::dialog::SpeakerRoster;
use crate::runtime::debug::DebugConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub speakers: SpeakerConfig,
    pub saves: SaveConfig,
    pub assets: AssetConfig,
    pub runtime: RuntimeConfig,
    pub debug: DebugConfig,
}

impl EngineConfig {
    pub fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&src)
    }
}

/// Who may speak and how their voices are found
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeakerConfig {
    /// Names the dialog classifier accepts as speakers
    pub allowed: Vec<String>,
    /// Speaker name → voice file key
    pub voice_keys: BTreeMap<String, String>,
    /// Speakers that are never voiced (the protagonist)
    pub silent: Vec<String>,
}

impl SpeakerConfig {
    pub fn roster(&self) -> SpeakerRoster {
        self.allowed.iter().cloned().collect()
    }
}

impl Default for SpeakerConfig {
    fn default() -> Self {
        Self {
            allowed: Vec::new(),
            voice_keys: BTreeMap::new(),
            silent: vec!["祐二".to_string()],
        }
    }
}

/// Save slot layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Number of slots; valid slots are `0..max_slots`
    pub max_slots: usize,
    /// Storage key prefix; the slot number is appended
    pub key_prefix: String,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            max_slots: 20,
            key_prefix: "alive_save_".to_string(),
        }
    }
}

/// Where assets live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub base_dir: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_dir: "/assets".to_string(),
        }
    }
}

/// Interpreter limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Instructions one advance may execute before it is considered runaway
    pub max_steps_per_advance: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_steps_per_advance: 100_000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
