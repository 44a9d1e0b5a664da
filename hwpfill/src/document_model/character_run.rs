//! Character run representation
//!
//! A paragraph stores its text as a sequence of runs, one per UTF-16 code
//! unit. Most runs are rendered characters; the rest are control markers
//! (line breaks, the paragraph terminator, anchors of embedded objects).

use serde::{Deserialize, Serialize};

/// HWP control code for a forced line break
pub const LINE_BREAK_CODE: u16 = 10;

/// HWP control code for the paragraph terminator
pub const PARAGRAPH_END_CODE: u16 = 13;

/// HWP control code for a table/drawing object anchor
pub const OBJECT_ANCHOR_CODE: u16 = 11;

/// Kind of a control run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Forced line break inside the paragraph
    LineBreak,

    /// Paragraph terminator
    ParagraphEnd,

    /// Any other control character, carrying its raw code
    ///
    /// Embedded-object anchors, field markers, bookmarks, etc.
    Other(u16),
}

impl ControlKind {
    /// Classify a raw HWP control code
    pub fn from_code(code: u16) -> Self {
        match code {
            LINE_BREAK_CODE => ControlKind::LineBreak,
            PARAGRAPH_END_CODE => ControlKind::ParagraphEnd,
            other => ControlKind::Other(other),
        }
    }

    /// Raw HWP control code of this kind
    pub fn code(self) -> u16 {
        match self {
            ControlKind::LineBreak => LINE_BREAK_CODE,
            ControlKind::ParagraphEnd => PARAGRAPH_END_CODE,
            ControlKind::Other(code) => code,
        }
    }
}

/// One element of a paragraph's character sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterRun {
    /// A rendered character (one UTF-16 code unit)
    Normal(u16),

    /// A control marker
    Control(ControlKind),
}

impl CharacterRun {
    /// Line break control run
    pub const LINE_BREAK: CharacterRun = CharacterRun::Control(ControlKind::LineBreak);

    /// Paragraph terminator control run
    pub const PARAGRAPH_END: CharacterRun = CharacterRun::Control(ControlKind::ParagraphEnd);

    /// Check if this run is the paragraph terminator
    pub fn is_paragraph_end(&self) -> bool {
        matches!(self, CharacterRun::Control(ControlKind::ParagraphEnd))
    }

    /// Check if this run renders a character
    pub fn is_normal(&self) -> bool {
        matches!(self, CharacterRun::Normal(_))
    }
}

/// Convert plain text into runs
///
/// Every character becomes one `Normal` run per UTF-16 code unit. `\n`,
/// `\r\n` and a lone `\r` become one line break control run; other C0
/// control characters except `\t` are dropped. No terminator is appended.
pub fn runs_from_str(text: &str) -> Vec<CharacterRun> {
    let mut runs = Vec::with_capacity(text.len());
    push_text_runs(&mut runs, text);
    runs
}

/// Append the runs for `text` to `runs`
fn push_text_runs(runs: &mut Vec<CharacterRun>, text: &str) {
    let mut prev = None;
    for ch in text.chars() {
        push_char_runs(runs, ch, prev);
        prev = Some(ch);
    }
}

/// Append the runs for a single character
///
/// `prev` is the character before `ch`, so the `\n` of a `\r\n` pair
/// adds nothing.
pub(crate) fn push_char_runs(runs: &mut Vec<CharacterRun>, ch: char, prev: Option<char>) {
    match ch {
        '\n' if prev == Some('\r') => {}
        '\n' | '\r' => runs.push(CharacterRun::LINE_BREAK),
        '\t' => runs.push(CharacterRun::Normal(ch as u16)),
        // C0 codes would read back as controls (terminator, anchors)
        c if u32::from(c) < 0x20 => {}
        _ => {
            let mut buf = [0u16; 2];
            for unit in ch.encode_utf16(&mut buf) {
                runs.push(CharacterRun::Normal(*unit));
            }
        }
    }
}

/// Convert runs into plain text, for display and diagnostics
///
/// Line breaks become `\n`; the terminator, other controls and
/// unmappable code units are dropped. Use the extractor when positions of
/// dropped runs matter.
pub fn runs_to_string(runs: &[CharacterRun]) -> String {
    let units = runs.iter().filter_map(|run| match run {
        CharacterRun::Normal(code) => Some(*code),
        CharacterRun::Control(ControlKind::LineBreak) => Some(LINE_BREAK_CODE),
        CharacterRun::Control(ControlKind::ParagraphEnd | ControlKind::Other(_)) => None,
    });

    char::decode_utf16(units).filter_map(Result::ok).collect()
}
