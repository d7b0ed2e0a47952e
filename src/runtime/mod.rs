//! Runtime execution engine for screenplays
//!
//! The [`Interpreter`] walks the cursor instruction by instruction, notifies observers of
//! everything it reads and returns to the caller at the two suspension points: a dialog
//! line and a decision prompt.

use log::warn;

use crate::config::EngineConfig;
use crate::dialog::{SpeakerRoster, extract_dialog_data};
use crate::domain::errors::EngineError;
use crate::text_pool::resolve_instruction;
use crate::types::dialog::DialogLine;
use crate::types::instruction::{InstructionKind, ResolvedInstruction};
use crate::types::notification::Notification;
use crate::types::screenplay::Screenplay;

pub mod context;
pub mod debug;
pub mod observer;

#[cfg(test)]
mod tests;

pub use context::{Cursor, CursorMove, ScreenplayContext};
use debug::{DebugCategory, DebugConfig, LogLevel};
pub use observer::{FnObserver, Observer, ObserverRegistry, Recorder};

/// Default bound on instructions executed by one advance
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// Why the interpreter returned control to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suspension {
    /// A dialog line is ready; the cursor is already past it
    Line(DialogLine),
    /// A decision prompt is ready; the cursor stays on the decision
    Decision { labels: Vec<String> },
    /// The last block has no outgoing edge and its last instruction was consumed
    End,
}

impl Suspension {
    /// Speaker of a dialog line; empty for narration and other suspensions
    pub fn speaker(&self) -> &str {
        match self {
            Self::Line(line) => line.speaker(),
            _ => "",
        }
    }
}

#[derive(Debug, Clone)]
struct PendingDecision {
    cursor: Cursor,
    labels: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    Running,
    /// The cursor cannot move further; the next advance ends the screenplay
    Exhausted,
    Finished,
}

/// Screenplay interpreter: exclusive owner of the [`ScreenplayContext`]
#[derive(Debug)]
pub struct Interpreter {
    context: ScreenplayContext,
    roster: SpeakerRoster,
    observers: ObserverRegistry,
    debug: DebugConfig,
    max_steps: usize,
    last_executed: Option<Cursor>,
    pending: Option<PendingDecision>,
    progress: Progress,
}

impl Interpreter {
    pub fn new(screenplay: Screenplay, roster: SpeakerRoster) -> Self {
        Self {
            context: ScreenplayContext::new(screenplay),
            roster,
            observers: ObserverRegistry::new(),
            debug: DebugConfig::default(),
            max_steps: DEFAULT_MAX_STEPS,
            last_executed: None,
            pending: None,
            progress: Progress::Running,
        }
    }

    pub fn from_config(screenplay: Screenplay, config: &EngineConfig) -> Self {
        Self::new(screenplay, config.speakers.roster())
            .with_debug(config.debug.clone())
            .with_max_steps(config.runtime.max_steps_per_advance)
    }

    pub fn with_debug(mut self, debug: DebugConfig) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Register an observer; observers are notified in registration order
    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.subscribe(observer);
    }

    /// Read-only view of the cursor and the loaded screenplay
    pub fn context(&self) -> &ScreenplayContext {
        &self.context
    }

    pub fn roster(&self) -> &SpeakerRoster {
        &self.roster
    }

    /// Option labels of the decision waiting for a choice
    pub fn pending_decision(&self) -> Option<&[String]> {
        self.pending.as_ref().map(|p| p.labels.as_slice())
    }

    pub fn is_finished(&self) -> bool {
        self.progress == Progress::Finished
    }

    /// Run until the next suspension point.
    ///
    /// A `branch_choice` resumes a pending decision down that outgoing edge first; line
    /// counters are reset once before execution continues.
    pub fn advance_until_suspension(
        &mut self,
        branch_choice: Option<usize>,
    ) -> Result<Suspension, EngineError> {
        if let Some(choice) = branch_choice {
            self.take_branch(choice)?;
            self.observers.broadcast(&Notification::ResetLineCounters);
        }
        self.run()
    }

    /// Resume a pending decision with the chosen option
    pub fn apply_decision(&mut self, choice: usize) -> Result<Suspension, EngineError> {
        self.advance_until_suspension(Some(choice))
    }

    /// The most recently consumed instruction, resolved through the text pool
    pub fn resolve_last_executed_instruction(&self) -> Option<ResolvedInstruction> {
        let cursor = self.last_executed?;
        let instruction = self.context.instruction_at(cursor).ok()?;
        Some(resolve_instruction(instruction, self.context.text_pool()))
    }

    /// Overwrite the cursor from a save. Pending decisions and end state are discarded.
    pub(crate) fn restore_cursor(&mut self, cursor: Cursor) -> Result<(), EngineError> {
        self.context.restore_cursor(cursor)?;
        self.pending = None;
        self.last_executed = None;
        self.progress = Progress::Running;
        self.log(
            DebugCategory::Save,
            LogLevel::Info,
            &format!(
                "[Save] Cursor restored to block {} instruction {}",
                cursor.block_index, cursor.instruction_index
            ),
        );
        Ok(())
    }

    pub(crate) fn broadcast(&mut self, notification: &Notification) {
        self.observers.broadcast(notification);
    }

    fn take_branch(&mut self, choice: usize) -> Result<(), EngineError> {
        let pending = self.pending.as_ref().ok_or(EngineError::NoPendingDecision)?;
        if pending.cursor != self.context.cursor() {
            return Err(EngineError::NoPendingDecision);
        }

        let moved = self.context.advance(choice)?;
        self.pending = None;
        match moved {
            CursorMove::Stepped => warn!(
                target: DebugCategory::Flow.target(),
                "Decision is not the last instruction of its block; choice {choice} ignored"
            ),
            CursorMove::Transferred { from, to } => self.log(
                DebugCategory::Flow,
                LogLevel::Debug,
                &format!("[Flow] Choice {choice}: block {from} -> {to}"),
            ),
            CursorMove::Exhausted => self.progress = Progress::Exhausted,
        }
        Ok(())
    }

    fn run(&mut self) -> Result<Suspension, EngineError> {
        match self.progress {
            Progress::Finished => return Err(EngineError::Finished),
            Progress::Exhausted => return Ok(self.finish()),
            Progress::Running => {}
        }

        let mut steps = 0;
        loop {
            if steps >= self.max_steps {
                return Err(EngineError::RunawayExecution { steps });
            }
            steps += 1;

            let cursor = self.context.cursor();
            let resolved =
                resolve_instruction(self.context.current_instruction()?, self.context.text_pool());
            self.last_executed = Some(cursor);

            self.log(
                DebugCategory::Engine,
                LogLevel::Trace,
                &format!(
                    "[Engine] Block {} instruction {}: {}",
                    cursor.block_index, cursor.instruction_index, resolved.type_tag
                ),
            );
            self.observers
                .broadcast(&Notification::Instruction(resolved.clone()));

            match resolved.kind() {
                InstructionKind::PlayDialog => {
                    self.step_cursor()?;
                    let data = extract_dialog_data(resolved.text(), &self.roster);
                    let line = DialogLine {
                        data,
                        block_index: self.context.current_block_index(),
                        line_number: resolved.params.get(1).copied(),
                    };
                    self.observers
                        .broadcast(&Notification::DialogLine(line.clone()));
                    return Ok(Suspension::Line(line));
                }
                InstructionKind::ShowDecision => {
                    let labels: Vec<String> = resolved
                        .string_params
                        .into_iter()
                        .filter(|label| !label.is_empty())
                        .collect();
                    self.log(
                        DebugCategory::Flow,
                        LogLevel::Debug,
                        &format!("[Flow] Waiting for decision: {labels:?}"),
                    );
                    self.pending = Some(PendingDecision {
                        cursor,
                        labels: labels.clone(),
                    });
                    self.observers.broadcast(&Notification::Decision {
                        labels: labels.clone(),
                    });
                    return Ok(Suspension::Decision { labels });
                }
                _ => {
                    self.step_cursor()?;
                    if self.progress == Progress::Exhausted {
                        return Ok(self.finish());
                    }
                }
            }
        }
    }

    /// Default-edge block transfer after a consumed instruction
    fn step_cursor(&mut self) -> Result<(), EngineError> {
        match self.context.advance(0)? {
            CursorMove::Stepped => {}
            CursorMove::Transferred { from, to } => self.log(
                DebugCategory::Flow,
                LogLevel::Debug,
                &format!("[Flow] Block {from} -> {to}"),
            ),
            CursorMove::Exhausted => self.progress = Progress::Exhausted,
        }
        Ok(())
    }

    fn finish(&mut self) -> Suspension {
        self.progress = Progress::Finished;
        self.log(
            DebugCategory::Engine,
            LogLevel::Info,
            "[Engine] Reached end of screenplay",
        );
        Suspension::End
    }

    fn log(&self, category: DebugCategory, level: LogLevel, message: &str) {
        debug::log(&self.debug, category, level, message);
    }
}
