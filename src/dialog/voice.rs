//! Voice cue sequencing
//!
//! A voiced dialog line yields a cue `{key}.REN{block:04}.{line:03}`. The line number is
//! the authored one (`params[1]` of the dialog instruction); lines without it fall back to
//! a running per-speaker counter, which a decision resets.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{debug, trace};

use crate::config::SpeakerConfig;
use crate::resolve::{BasicResolver, Resolver};
use crate::runtime::observer::Observer;
use crate::types::dialog::{DialogLine, DialogLineData};
use crate::types::notification::Notification;

/// A voice file to play for one dialog line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCue {
    pub voice_key: String,
    pub event_name: String,
    pub line: u32,
    pub path: String,
}

/// Event name for a block index, one-based
pub fn event_name(block_index: usize) -> String {
    format!("REN{:04}", block_index + 1)
}

// Negative authored numbers are treated as missing
fn authored_line(line_number: Option<i32>) -> Option<u32> {
    line_number.and_then(|n| u32::try_from(n).ok())
}

/// Observer that turns dialog lines into voice cues
#[derive(Debug, Clone)]
pub struct VoiceCueTracker<R = BasicResolver> {
    voice_keys: BTreeMap<String, String>,
    silent: HashSet<String>,
    counters: HashMap<String, u32>,
    resolver: R,
    last_cue: Option<VoiceCue>,
}

impl<R: Resolver> VoiceCueTracker<R> {
    pub fn new(speakers: &SpeakerConfig, resolver: R) -> Self {
        Self {
            voice_keys: speakers.voice_keys.clone(),
            silent: speakers.silent.iter().cloned().collect(),
            counters: HashMap::new(),
            resolver,
            last_cue: None,
        }
    }

    /// Voice key for a speaker, `None` for silent or unmapped speakers
    pub fn voice_key(&self, speaker: &str) -> Option<&str> {
        if speaker.is_empty() || self.silent.contains(speaker) {
            return None;
        }
        self.voice_keys.get(speaker).map(String::as_str)
    }

    /// Lines voiced so far for `voice_key` since the last reset
    pub fn count(&self, voice_key: &str) -> u32 {
        self.counters.get(voice_key).copied().unwrap_or(0)
    }

    /// Cue of the most recent dialog line, `None` if it was not voiced
    pub fn last_cue(&self) -> Option<&VoiceCue> {
        self.last_cue.as_ref()
    }

    pub fn reset(&mut self) {
        debug!(target: "tsuzuri::voice", "Resetting {} line counters", self.counters.len());
        self.counters.clear();
    }

    /// Count a dialog line and produce its cue
    pub fn record(&mut self, line: &DialogLine) -> Option<VoiceCue> {
        let key = self.voice_key(line.speaker())?.to_string();
        let counter = self.counters.entry(key.clone()).or_insert(0);
        *counter += 1;
        let number = authored_line(line.line_number).unwrap_or(*counter);
        Some(self.cue(key, line.block_index, number))
    }

    /// Cue for a line that was already counted, without advancing the counter.
    ///
    /// Used to resume a voice after an interruption.
    pub fn replay(
        &self,
        data: &DialogLineData,
        block_index: usize,
        line_number: Option<i32>,
    ) -> Option<VoiceCue> {
        let key = self.voice_key(&data.speaker_name)?;
        let number = match authored_line(line_number) {
            Some(number) => number,
            None => match self.count(key) {
                0 => return None,
                count => count,
            },
        };
        Some(self.cue(key.to_string(), block_index, number))
    }

    fn cue(&self, voice_key: String, block_index: usize, line: u32) -> VoiceCue {
        let event_name = event_name(block_index);
        let path = self.resolver.resolve_voice(&voice_key, &event_name, line);
        VoiceCue {
            voice_key,
            event_name,
            line,
            path,
        }
    }
}

impl<R: Resolver> Observer for VoiceCueTracker<R> {
    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::DialogLine(line) => {
                self.last_cue = self.record(line);
                if let Some(cue) = &self.last_cue {
                    trace!(target: "tsuzuri::voice", "Voice cue {}", cue.path);
                }
            }
            Notification::ResetLineCounters => self.reset(),
            _ => {}
        }
    }
}
