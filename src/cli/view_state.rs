//! View state management for the terminal player
//!
//! Tracks what is on screen and computes rendering deltas so only changes are printed.

use crate::application::api::{Directive, layer};
use std::collections::HashMap;

/// Clear the terminal screen
pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");

    // Fallback: print newlines
    if std::io::Write::flush(&mut std::io::stdout()).is_err() {
        for _ in 0..50 {
            println!();
        }
    }
}

/// Visual and audio state of the terminal player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Layer name -> image path
    pub images: HashMap<String, String>,
    /// Currently playing BGM
    pub bgm: Option<String>,
    /// Last played SE (for display purposes)
    pub se_last: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply directives to this view state and return the rendering delta
    pub fn apply(&mut self, directives: &[Directive]) -> RenderDelta {
        let mut delta = RenderDelta::new();

        for directive in directives {
            match directive {
                Directive::ShowImage { layer, path } => match path {
                    Some(path) => {
                        if self.images.get(layer) != Some(path) {
                            delta.effects_added.push(format!("ShowImage: {path} ({layer})"));
                            self.images.insert(layer.clone(), path.clone());
                        }
                    }
                    None => {
                        if self.images.remove(layer).is_some() {
                            delta.effects_added.push(format!("ClearLayer: {layer}"));
                        }
                    }
                },
                Directive::PlayBgm { path } => {
                    if self.bgm != *path {
                        match path {
                            Some(path) => delta.effects_added.push(format!("PlayBGM: {path}")),
                            None => delta.effects_added.push("StopBGM".to_string()),
                        }
                        self.bgm = path.clone();
                    }
                }
                // SE and voices always trigger (not persistent state)
                Directive::PlaySe { path } => {
                    delta.effects_added.push(format!("PlaySE: {path}"));
                    self.se_last = Some(path.clone());
                }
                Directive::PlayVoice { path } => {
                    delta.effects_added.push(format!("Voice: {path}"));
                }
                Directive::Say { .. } | Directive::Branch { .. } => {}
            }
        }

        delta
    }

    pub fn background(&self) -> Option<&str> {
        self.images.get(layer::BACKGROUND).map(String::as_str)
    }
}

/// Represents what needs to be rendered (the delta from previous state)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderDelta {
    /// Effects that were added (human-readable strings)
    pub effects_added: Vec<String>,
}

impl RenderDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this delta has any changes
    pub fn is_empty(&self) -> bool {
        self.effects_added.is_empty()
    }
}

/// Render a delta to the console
pub fn render_delta(delta: &RenderDelta) {
    if !delta.effects_added.is_empty() {
        println!("[Effects]");
        for effect in &delta.effects_added {
            println!("  {}", effect);
        }
        println!();
    }
}
