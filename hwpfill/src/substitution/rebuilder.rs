//! Rebuild a paragraph's runs from substituted text
//!
//! Rewriting `runs` invalidates everything derived from them, so the
//! rebuilder also rewrites the character count, collapses the style
//! ranges and drops the layout cache.

use super::extractor::Anchor;
use crate::document_model::{push_char_runs, CharacterRun, Paragraph, StyleRange};

/// Convert text plus anchors back into a run sequence
///
/// `anchors` must be sorted by offset (as produced by the extractor and
/// shifted through the edits). Anchors at or past the end of the text are
/// placed after the last character. The sequence always ends with exactly
/// one paragraph terminator.
pub fn rebuild_runs(text: &str, anchors: &[Anchor]) -> Vec<CharacterRun> {
    let mut runs = Vec::with_capacity(text.len() + anchors.len() + 1);
    let mut pending = anchors.iter().peekable();
    let mut prev = None;

    for (offset, ch) in text.chars().enumerate() {
        while let Some(anchor) = pending.next_if(|anchor| anchor.offset <= offset) {
            runs.push(anchor.run);
        }
        push_char_runs(&mut runs, ch, prev);
        prev = Some(ch);
    }
    runs.extend(pending.map(|anchor| anchor.run));

    if !runs.last().is_some_and(CharacterRun::is_paragraph_end) {
        runs.push(CharacterRun::PARAGRAPH_END);
    }

    runs
}

/// Replace a paragraph's runs and bring its metadata in line
///
/// * `character_count` becomes the new run count
/// * style ranges collapse to one range at 0 keeping the first style id
///   (an empty table stays empty)
/// * the layout cache is dropped for the renderer to recompute
pub fn apply_runs(paragraph: &mut Paragraph, runs: Vec<CharacterRun>) {
    paragraph.character_count = runs.len();
    paragraph.runs = runs;

    if let Some(first) = paragraph.style_ranges.first().copied() {
        paragraph.style_ranges = vec![StyleRange::new(0, first.style_id)];
    }

    paragraph.layout_cache = None;
}

/// Rebuild `paragraph` from substituted text and shifted anchors
///
/// `trailing` runs stood after the old terminator and are kept after the
/// new one.
pub fn rebuild(
    paragraph: &mut Paragraph,
    text: &str,
    anchors: &[Anchor],
    trailing: &[CharacterRun],
) {
    let mut runs = rebuild_runs(text, anchors);
    runs.extend_from_slice(trailing);
    apply_runs(paragraph, runs);
}
