//! Application Engine - High-level API for screenplay playback
//!
//! Wires the interpreter to the stage tracker, the voice cue tracker and the directive
//! collector, and turns each suspension into a [`StepResult`].

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::application::api::{ApiError, Directive, NextAction, StepResult};
use crate::application::directives::DirectiveCollector;
use crate::config::EngineConfig;
use crate::dialog::{VoiceCue, VoiceCueTracker, extract_dialog_data};
use crate::infrastructure::loader;
use crate::resolve::BasicResolver;
use crate::runtime::{Interpreter, Observer, ScreenplayContext, Suspension};
use crate::stage::{PresentationSource, Stage};
use crate::storage;
use crate::types::instruction::InstructionKind;
use crate::types::save::{PresentationSnapshot, SaveState};
use crate::types::screenplay::Screenplay;

/// High-level engine that provides the public API
pub struct Engine {
    interpreter: Interpreter,
    stage: Rc<RefCell<Stage>>,
    voice: Rc<RefCell<VoiceCueTracker>>,
    collector: Rc<RefCell<DirectiveCollector>>,
}

impl Engine {
    pub fn new(screenplay: Screenplay, config: &EngineConfig) -> Self {
        let resolver = BasicResolver::new(config.assets.base_dir.clone());
        let stage = Rc::new(RefCell::new(Stage::new(resolver.clone())));
        let voice = Rc::new(RefCell::new(VoiceCueTracker::new(
            &config.speakers,
            resolver.clone(),
        )));
        let collector = Rc::new(RefCell::new(DirectiveCollector::new(resolver)));

        let mut interpreter = Interpreter::from_config(screenplay, config);
        interpreter.subscribe(Rc::clone(&stage));
        interpreter.subscribe(Rc::clone(&voice));
        interpreter.subscribe(Rc::clone(&collector));

        Self {
            interpreter,
            stage,
            voice,
            collector,
        }
    }

    /// Create engine from JSON screenplay source
    pub fn from_json(src: &str, config: &EngineConfig) -> Result<Self, ApiError> {
        let screenplay = loader::load_screenplay_str(src)?;
        Ok(Self::new(screenplay, config))
    }

    /// Create engine from a screenplay file
    pub async fn load(path: impl AsRef<Path>, config: &EngineConfig) -> Result<Self, ApiError> {
        let screenplay = loader::load_screenplay(path).await?;
        Ok(Self::new(screenplay, config))
    }

    /// Register an extra observer after the built-in ones
    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.interpreter.subscribe(observer);
    }

    /// Run to the next line, decision or the end
    pub fn step(&mut self) -> Result<StepResult, ApiError> {
        if self.interpreter.pending_decision().is_some() {
            return Err(ApiError::invalid("A decision is waiting for a choice"));
        }
        let suspension = self.interpreter.advance_until_suspension(None)?;
        Ok(self.finish_step(suspension))
    }

    /// Choose option by index and run to the next suspension
    pub fn choose(&mut self, index: usize) -> Result<StepResult, ApiError> {
        let Some(labels) = self.interpreter.pending_decision() else {
            return Err(ApiError::invalid("No choices available"));
        };
        if index >= labels.len() {
            return Err(ApiError::invalid(format!(
                "Choice index {} out of range (0-{})",
                index,
                labels.len().saturating_sub(1)
            )));
        }
        let suspension = self.interpreter.apply_decision(index)?;
        Ok(self.finish_step(suspension))
    }

    /// Choice labels of the pending decision
    pub fn choices(&self) -> Option<&[String]> {
        self.interpreter.pending_decision()
    }

    pub fn is_finished(&self) -> bool {
        self.interpreter.is_finished()
    }

    /// Capture a save state at the current suspension
    pub fn save_state(&self) -> SaveState {
        storage::capture(&self.interpreter, &*self.stage.borrow())
    }

    /// Resume from a save state.
    ///
    /// The returned directives re-apply the saved background, portrait and music.
    pub fn restore_state(&mut self, state: &SaveState) -> Result<Vec<Directive>, ApiError> {
        storage::restore(&mut self.interpreter, state)?;
        Ok(self.collector.borrow_mut().drain())
    }

    /// Voice cue of the line on screen, without advancing the line counter
    pub fn replay_voice(&self) -> Option<VoiceCue> {
        let last = self.interpreter.resolve_last_executed_instruction()?;
        if last.kind() != InstructionKind::PlayDialog {
            return None;
        }
        let data = extract_dialog_data(last.text(), self.interpreter.roster());
        self.voice
            .borrow()
            .replay(
                &data,
                self.interpreter.context().current_block_index(),
                last.params.get(1).copied(),
            )
    }

    pub fn presentation(&self) -> PresentationSnapshot {
        self.stage.borrow().snapshot()
    }

    pub fn context(&self) -> &ScreenplayContext {
        self.interpreter.context()
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    fn finish_step(&mut self, suspension: Suspension) -> StepResult {
        let mut directives = self.collector.borrow_mut().drain();

        let next = match suspension {
            Suspension::Line(_) => {
                if let Some(cue) = self.voice.borrow().last_cue() {
                    directives.push(Directive::PlayVoice {
                        path: cue.path.clone(),
                    });
                }
                NextAction::WaitUser
            }
            Suspension::Decision { .. } => NextAction::WaitBranch,
            Suspension::End => NextAction::Halt,
        };

        StepResult { next, directives }
    }
}
