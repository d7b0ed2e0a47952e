//! Asset resolution - mapping screenplay references to asset paths.
//!
//! Paths are plain strings so hosts can use them as file paths or URLs.

use crate::types::instruction::ImageRef;

pub trait Resolver {
    /// Base directory every default path is placed under
    fn base_dir(&self) -> &str {
        "/assets"
    }

    fn resolve_background(&self, image: ImageRef<'_>) -> String {
        format!("{}/scenes/BG/{}/{}.webp", self.base_dir(), image.folder, image.name)
    }

    fn resolve_portrait(&self, image: ImageRef<'_>) -> String {
        format!(
            "{}/scenes/Portraits/{}/{}.webp",
            self.base_dir(),
            image.folder,
            image.name
        )
    }

    fn resolve_cg(&self, name: &str) -> String {
        let name = name.to_uppercase();
        format!("{}/scenes/CG/{name}/{name}.webp", self.base_dir())
    }

    /// Shown when a transition targets no background
    fn black_screen(&self) -> String {
        self.resolve_cg("BLACK")
    }

    fn resolve_bgm(&self, track: &str) -> String {
        format!("{}/audio/bgm/{track}.mp3", self.base_dir())
    }

    fn resolve_se(&self, name: &str) -> String {
        format!("{}/audio/se/{name}.mp3", self.base_dir())
    }

    fn resolve_voice(&self, voice_key: &str, event_name: &str, line: u32) -> String {
        format!(
            "{}/audio/voice/{voice_key}.{event_name}.{line:03}.ogg",
            self.base_dir()
        )
    }
}

/// Default layout under a configurable base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicResolver {
    pub base_dir: String,
}

impl BasicResolver {
    pub fn new(base_dir: impl Into<String>) -> Self {
        let base_dir: String = base_dir.into();
        Self {
            base_dir: base_dir.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for BasicResolver {
    fn default() -> Self {
        Self::new("/assets")
    }
}

impl Resolver for BasicResolver {
    fn base_dir(&self) -> &str {
        &self.base_dir
    }
}
