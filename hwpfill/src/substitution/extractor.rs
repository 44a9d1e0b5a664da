//! Plain-text view of a run sequence

use crate::document_model::{CharacterRun, ControlKind};

/// A run removed from the extracted text, to be re-inserted on rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Character offset in the text where the run stood
    pub offset: usize,

    /// The run itself
    pub run: CharacterRun,
}

/// Extracted text plus the runs it could not represent
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    /// Text with line breaks as `\n`
    pub text: String,

    /// Anchors in run order
    pub anchors: Vec<Anchor>,

    /// Anchored runs found after the last paragraph terminator
    pub trailing: Vec<CharacterRun>,
}

/// Produce the plain-text view of a run sequence
///
/// `Normal` runs become their character (surrogate pairs are joined), line
/// breaks become `\n` and the paragraph terminator is dropped. Object
/// anchors and lone surrogates do not appear in the text; they are
/// returned as [`Anchor`]s instead, or as `trailing` runs when they
/// follow the last terminator. Never fails.
pub fn extract_text(runs: &[CharacterRun]) -> Extraction {
    let mut extraction = Extraction {
        text: String::with_capacity(runs.len()),
        ..Default::default()
    };
    // Number of anchors seen before the last terminator
    let mut before_end = None;
    let mut chars = 0usize;
    let mut i = 0usize;

    while i < runs.len() {
        let run = runs[i];
        i += 1;

        match run {
            CharacterRun::Normal(code) => {
                if let Some(ch) = char::from_u32(u32::from(code)) {
                    extraction.text.push(ch);
                    chars += 1;
                    continue;
                }

                // High surrogate followed by a low surrogate
                if let Some(CharacterRun::Normal(low)) = runs.get(i) {
                    if let Some(Ok(ch)) = char::decode_utf16([code, *low]).next() {
                        extraction.text.push(ch);
                        chars += 1;
                        i += 1;
                        continue;
                    }
                }

                extraction.anchors.push(Anchor { offset: chars, run });
            }
            CharacterRun::Control(ControlKind::LineBreak) => {
                extraction.text.push('\n');
                chars += 1;
            }
            CharacterRun::Control(ControlKind::ParagraphEnd) => {
                before_end = Some(extraction.anchors.len());
            }
            CharacterRun::Control(ControlKind::Other(_)) => {
                extraction.anchors.push(Anchor { offset: chars, run });
            }
        }
    }

    if let Some(index) = before_end {
        extraction.trailing = extraction
            .anchors
            .split_off(index)
            .into_iter()
            .map(|anchor| anchor.run)
            .collect();
    }

    extraction
}
