//! Converts engine notifications into host directives

use crate::application::api::{Directive, layer};
use crate::resolve::{BasicResolver, Resolver};
use crate::runtime::observer::Observer;
use crate::types::instruction::Command;
use crate::types::notification::Notification;

/// Observer that buffers [`Directive`]s until the engine drains them
#[derive(Debug, Default)]
pub struct DirectiveCollector<R = BasicResolver> {
    resolver: R,
    pending: Vec<Directive>,
}

impl<R: Resolver> DirectiveCollector<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            pending: Vec::new(),
        }
    }

    /// Take everything collected since the last drain
    pub fn drain(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.pending)
    }

    fn show(&mut self, layer: &str, path: Option<String>) {
        self.pending.push(Directive::ShowImage {
            layer: layer.to_string(),
            path,
        });
    }

    fn command(&mut self, command: Command<'_>) {
        let resolver = &self.resolver;
        match command {
            Command::SetBackground { image } => {
                let path = image.map(|i| resolver.resolve_background(i));
                self.show(layer::BACKGROUND, path);
            }
            Command::SetPortrait { image } => {
                let path = image.map(|i| resolver.resolve_portrait(i));
                self.show(layer::PORTRAIT, path);
            }
            Command::ShowCg { name } => {
                let path = resolver.resolve_cg(name);
                self.show(layer::PORTRAIT, None);
                self.show(layer::BACKGROUND, Some(path));
            }
            Command::TransitionToGraphics { image } => {
                let path = match image {
                    Some(i) => resolver.resolve_background(i),
                    None => resolver.black_screen(),
                };
                self.show(layer::BACKGROUND, Some(path));
            }
            Command::PlayBgm { track } => {
                let path = track.filter(|t| !t.is_empty()).map(|t| resolver.resolve_bgm(t));
                self.pending.push(Directive::PlayBgm { path });
            }
            Command::PlaySe { name } => {
                let path = resolver.resolve_se(name);
                self.pending.push(Directive::PlaySe { path });
            }
            _ => {}
        }
    }
}

impl<R: Resolver> Observer for DirectiveCollector<R> {
    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::Instruction(instruction) => self.command(instruction.command()),
            Notification::DialogLine(line) => self.pending.push(Directive::Say {
                speaker: line.speaker().to_string(),
                text: line.content().to_string(),
                mode: line.mode(),
            }),
            Notification::Decision { labels } => self.pending.push(Directive::Branch {
                choices: labels.clone(),
            }),
            Notification::RestoreGraphics {
                background,
                portrait,
            } => {
                self.show(layer::BACKGROUND, background.clone());
                self.show(layer::PORTRAIT, portrait.clone());
            }
            Notification::RestoreMusic { track } => {
                let path = track.as_deref().map(|t| self.resolver.resolve_bgm(t));
                self.pending.push(Directive::PlayBgm { path });
            }
            Notification::ResetLineCounters => {}
        }
    }
}
