//! Dialog line classification
//!
//! Script lines look like `守「こんにちは」`. The text before the first `「` is a
//! speaker candidate; it is only accepted when it is short and belongs to the
//! known speaker roster. Everything else is treated as narration.

use crate::types::dialog::{DialogLineData, DisplayMode};
use std::collections::HashSet;

pub mod voice;

pub use voice::{VoiceCue, VoiceCueTracker};

const OPEN_QUOTE: char = '「';
const CLOSE_QUOTE: char = '」';
const MARKER: char = '・';
const DOUBLE_MARKER: &str = "・・";

/// Candidates this long (in characters) or longer are never names
pub const MAX_CANDIDATE_CHARS: usize = 8;

/// Set of speaker names the classifier accepts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerRoster {
    names: HashSet<String>,
}

impl SpeakerRoster {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SpeakerRoster {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Extract speaker name, content and display mode from a resolved line.
pub fn extract_dialog_data(line_text: Option<&str>, roster: &SpeakerRoster) -> DialogLineData {
    let line = match line_text {
        Some(line) if !line.is_empty() => line,
        other => return DialogLineData::narration(other.unwrap_or_default()),
    };

    let quote = match line.find(OPEN_QUOTE) {
        Some(0) | None => return DialogLineData::narration(line),
        Some(byte_index) => byte_index,
    };

    let candidate = line[..quote].trim();
    let candidate_len = candidate.chars().count();
    if candidate_len == 0 || candidate_len >= MAX_CANDIDATE_CHARS {
        return DialogLineData::narration(line);
    }

    let body_start = quote + OPEN_QUOTE.len_utf8();
    let content = match line.rfind(CLOSE_QUOTE) {
        Some(close) if close > quote => &line[body_start..close],
        _ => &line[body_start..],
    }
    .trim();

    let (name, display_mode) = classify_candidate(candidate, candidate_len);
    if !roster.contains(name) {
        return DialogLineData::narration(line);
    }

    DialogLineData {
        speaker_name: name.to_string(),
        content: content.to_string(),
        display_mode,
    }
}

// `守:「…」` and `守「…」` name the same speaker; marked candidates keep the separator
fn strip_separator(candidate: &str) -> &str {
    candidate
        .strip_suffix([':', '：'])
        .map(str::trim_end)
        .unwrap_or(candidate)
}

// `・・name・・` strips 2 chars in front and 3 behind; `・name・` strips one each side.
fn classify_candidate(candidate: &str, len: usize) -> (&str, DisplayMode) {
    if len > 4 && candidate.starts_with(DOUBLE_MARKER) && candidate.ends_with(DOUBLE_MARKER) {
        return (char_slice(candidate, 2, len - 3).trim(), DisplayMode::Special);
    }
    if len > 2 && candidate.starts_with(MARKER) && candidate.ends_with(MARKER) {
        return (char_slice(candidate, 1, len - 1).trim(), DisplayMode::Hidden);
    }
    (strip_separator(candidate), DisplayMode::Display)
}

// Substring by character positions `[start, end)`
fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let byte_at = |pos: usize| {
        s.char_indices()
            .nth(pos)
            .map(|(byte, _)| byte)
            .unwrap_or(s.len())
    };
    let (start, end) = (byte_at(start), byte_at(end));
    if start >= end { "" } else { &s[start..end] }
}
