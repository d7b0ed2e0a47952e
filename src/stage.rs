//! Presentation tracking
//!
//! [`Stage`] follows the instruction stream and remembers what is on screen and what is
//! playing, so a save can capture it and a restore can put it back.

use log::trace;

use crate::resolve::{BasicResolver, Resolver};
use crate::runtime::observer::Observer;
use crate::types::instruction::Command;
use crate::types::notification::Notification;
use crate::types::save::PresentationSnapshot;

/// Narrow query contract for externally owned presentation state
pub trait PresentationSource {
    fn snapshot(&self) -> PresentationSnapshot;
}

/// Current background, portrait and music as seen through notifications
#[derive(Debug, Clone, Default)]
pub struct Stage<R = BasicResolver> {
    resolver: R,
    background: Option<String>,
    portrait: Option<String>,
    bgm: Option<String>,
}

impl<R: Resolver> Stage<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            background: None,
            portrait: None,
            bgm: None,
        }
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn portrait(&self) -> Option<&str> {
        self.portrait.as_deref()
    }

    /// Track name of the playing music
    pub fn bgm(&self) -> Option<&str> {
        self.bgm.as_deref()
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    fn apply(&mut self, command: Command<'_>) {
        match command {
            Command::SetBackground { image } => {
                self.background = image.map(|i| self.resolver.resolve_background(i));
            }
            Command::SetPortrait { image } => {
                self.portrait = image.map(|i| self.resolver.resolve_portrait(i));
            }
            Command::ShowCg { name } => {
                self.portrait = None;
                self.background = Some(self.resolver.resolve_cg(name));
            }
            Command::TransitionToGraphics { image } => {
                self.background = Some(match image {
                    Some(i) => self.resolver.resolve_background(i),
                    None => self.resolver.black_screen(),
                });
            }
            Command::PlayBgm { track } => {
                self.bgm = track.filter(|t| !t.is_empty()).map(str::to_string);
            }
            Command::Incomplete { kind } => {
                trace!(target: "tsuzuri::engine", "Ignoring {kind:?} with missing parameters");
            }
            _ => {}
        }
    }
}

impl<R: Resolver> PresentationSource for Stage<R> {
    fn snapshot(&self) -> PresentationSnapshot {
        PresentationSnapshot {
            background: self.background.clone(),
            portrait: self.portrait.clone(),
            bgm: self.bgm.clone(),
        }
    }
}

impl<R: Resolver> Observer for Stage<R> {
    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::Instruction(instruction) => self.apply(instruction.command()),
            Notification::RestoreGraphics {
                background,
                portrait,
            } => {
                self.background = background.clone();
                self.portrait = portrait.clone();
            }
            Notification::RestoreMusic { track } => self.bgm = track.clone(),
            _ => {}
        }
    }
}
