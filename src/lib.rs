//! # tsuzuri
//!
//! A visual-novel screenplay execution core. A compiled screenplay is a set of event
//! blocks holding typed instructions; the interpreter walks them, notifies observers of
//! every instruction and suspends on dialog lines and decision prompts.
//!
//! ## Quick Start
//!
//! ```rust
//! use tsuzuri::application::{engine::Engine, api::{Directive, NextAction}};
//! use tsuzuri::config::EngineConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let screenplay = r#"{
//!     "events": [
//!         { "evId": 1, "instructions": [
//!             { "type": "PlayDialog", "stringParams": ["$0"] }
//!         ], "returnValues": [] }
//!     ],
//!     "textPool": ["守「こんにちは」"]
//! }"#;
//! let config = EngineConfig::from_json_str(r#"{ "speakers": { "allowed": ["守"] } }"#)?;
//! let mut engine = Engine::from_json(screenplay, &config)?;
//!
//! let mut result = engine.step()?;
//! loop {
//!     for directive in &result.directives {
//!         if let Directive::Say { speaker, text, .. } = directive {
//!             println!("{}: {}", speaker, text);
//!         }
//!     }
//!     result = match result.next {
//!         NextAction::WaitUser => engine.step()?,
//!         // Present the choices, then pass the player's pick
//!         NextAction::WaitBranch => engine.choose(0)?,
//!         NextAction::Halt => break,
//!     };
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving the interpreter directly
//!
//! ```rust
//! use tsuzuri::dialog::SpeakerRoster;
//! use tsuzuri::runtime::{Interpreter, Suspension};
//! use tsuzuri::types::Screenplay;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let screenplay = Screenplay::from_json(r#"{
//!     "events": [
//!         { "evId": 1, "instructions": [
//!             { "type": "ShowDecision", "stringParams": ["はい", "いいえ"] }
//!         ], "returnValues": [2, 3] },
//!         { "evId": 2, "instructions": [{ "type": "PlayDialog", "stringParams": ["yes"] }] },
//!         { "evId": 3, "instructions": [{ "type": "PlayDialog", "stringParams": ["no"] }] }
//!     ]
//! }"#)?;
//! let mut interpreter = Interpreter::new(screenplay, SpeakerRoster::default());
//!
//! let prompt = interpreter.advance_until_suspension(None)?;
//! assert!(matches!(prompt, Suspension::Decision { .. }));
//! let line = interpreter.apply_decision(1)?;
//! assert!(matches!(line, Suspension::Line(l) if l.content() == "no"));
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod dialog;
pub mod domain;
pub mod infrastructure;
pub mod resolve;
pub mod runtime;
pub mod stage;
pub mod storage;
pub mod text_pool;
pub mod types;

// Stable public contracts - the main API for library users
pub use application::api::{ApiError, Directive, NextAction, StepResult};
pub use application::engine::Engine;

pub use config::EngineConfig;
pub use dialog::{SpeakerRoster, extract_dialog_data};
pub use domain::errors::{EngineError, LoadError};
pub use resolve::{BasicResolver, Resolver};
pub use runtime::{Interpreter, Observer, Suspension};
pub use storage::{capture, restore};
pub use text_pool::resolve_strings;
pub use types::{DialogLineData, DisplayMode, Notification, SaveState, Screenplay};
