//! Paragraph-level placeholder substitution
//!
//! Filling a paragraph runs three steps:
//! 1. **Extract**: runs → plain text, with object anchors set aside
//! 2. **Substitute**: replace `${key}` tokens from the placeholder map
//! 3. **Rebuild**: text + anchors → runs, then fix the paragraph metadata
//!
//! The rebuild only happens when at least one token was replaced, so a
//! paragraph without matching tokens is left exactly as it was.

use crate::document_model::Paragraph;
use crate::placeholder::PlaceholderMap;

// Submodules
mod error;
mod extractor;
mod rebuilder;
mod substituter;

// Re-export public types
pub use error::SubstitutionError;
pub use extractor::{extract_text, Anchor, Extraction};
pub use rebuilder::{apply_runs, rebuild, rebuild_runs};
pub use substituter::{placeholder_keys, shift_offset, substitute, Edit, Substitution};

/// What happened to one paragraph
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphOutcome {
    /// Whether the paragraph's runs were rewritten
    pub rewritten: bool,

    /// Number of replaced tokens
    pub replacements: usize,

    /// Tokens left verbatim because their value could not be rendered
    pub errors: Vec<SubstitutionError>,

    /// Keys of tokens absent from the map
    pub unresolved: Vec<String>,
}

/// Fill the placeholders of a single paragraph in place
///
/// # Parameters
/// * `paragraph` - Paragraph to rewrite
/// * `values` - Placeholder values
///
/// # Returns
/// * `ParagraphOutcome` - Whether the paragraph changed, plus local errors
pub fn fill_paragraph(paragraph: &mut Paragraph, values: &PlaceholderMap) -> ParagraphOutcome {
    if paragraph.is_empty() {
        return ParagraphOutcome::default();
    }

    let Extraction {
        text,
        anchors,
        trailing,
    } = extract_text(&paragraph.runs);
    if text.is_empty() {
        return ParagraphOutcome::default();
    }

    let substitution = substitute(&text, values);
    let mut outcome = ParagraphOutcome {
        rewritten: false,
        replacements: substitution.replacements(),
        errors: substitution.errors,
        unresolved: substitution.unresolved,
    };

    if substitution.edits.is_empty() {
        return outcome;
    }

    let shifted: Vec<Anchor> = anchors
        .into_iter()
        .map(|anchor| Anchor {
            offset: shift_offset(anchor.offset, &substitution.edits),
            run: anchor.run,
        })
        .collect();

    rebuild(paragraph, &substitution.text, &shifted, &trailing);
    outcome.rewritten = true;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::{
        check_paragraph, runs_from_str, CharacterRun, ControlKind, LayoutCache, StyleRange,
        OBJECT_ANCHOR_CODE,
    };
    use crate::placeholder::PlaceholderValue;

    const OBJECT: CharacterRun = CharacterRun::Control(ControlKind::Other(OBJECT_ANCHOR_CODE));

    fn map(entries: &[(&str, &str)]) -> PlaceholderMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_hello_world() {
        let mut para = Paragraph::from_text("Hello ${name}!", 0);

        let outcome = fill_paragraph(&mut para, &map(&[("name", "World")]));

        assert!(outcome.rewritten);
        assert_eq!(outcome.replacements, 1);
        assert_eq!(para.text(), "Hello World!");
        assert_eq!(para.runs.len(), "Hello World!".len() + 1);
        assert_eq!(para.character_count, para.runs.len());
        assert!(check_paragraph(&para).is_empty());
    }

    #[test]
    fn test_missing_key_is_unchanged() {
        let mut para = Paragraph::from_text("${missing}", 2);
        para.style_ranges.push(StyleRange::new(3, 5));
        para.layout_cache = Some(LayoutCache::default());
        let before = para.clone();

        let outcome = fill_paragraph(&mut para, &PlaceholderMap::new());

        assert!(!outcome.rewritten);
        assert_eq!(outcome.unresolved, vec!["missing".to_string()]);
        assert_eq!(para, before);
    }

    #[test]
    fn test_non_matching_map_is_idempotent() {
        let mut para = Paragraph::from_text("plain ${other} text", 1);
        para.character_count = 99; // pre-existing damage is not touched
        let before = para.clone();

        let outcome = fill_paragraph(&mut para, &map(&[("name", "x")]));

        assert!(!outcome.rewritten);
        assert_eq!(para, before);
    }

    #[test]
    fn test_anchor_between_text_and_break_survives() {
        // Arrange: "A", object, line break, "B", terminator
        let runs = vec![
            CharacterRun::Normal('A' as u16),
            OBJECT,
            CharacterRun::LINE_BREAK,
            CharacterRun::Normal('B' as u16),
            CharacterRun::PARAGRAPH_END,
        ];
        let mut para = Paragraph {
            character_count: runs.len(),
            runs: runs.clone(),
            style_ranges: vec![StyleRange::new(0, 0)],
            ..Default::default()
        };

        // Act: empty map leaves everything in place
        let outcome = fill_paragraph(&mut para, &PlaceholderMap::new());

        // Assert
        assert!(!outcome.rewritten);
        assert_eq!(para.runs, runs);
    }

    #[test]
    fn test_anchor_shifted_after_replacement() {
        // "${a}", object, "!" with a -> "xyz"
        let mut runs = runs_from_str("${a}");
        runs.push(OBJECT);
        runs.extend(runs_from_str("!"));
        runs.push(CharacterRun::PARAGRAPH_END);
        let mut para = Paragraph {
            character_count: runs.len(),
            runs,
            style_ranges: vec![StyleRange::new(0, 3), StyleRange::new(4, 8)],
            ..Default::default()
        };

        let outcome = fill_paragraph(&mut para, &map(&[("a", "xyz")]));

        assert!(outcome.rewritten);
        assert_eq!(
            para.runs,
            vec![
                CharacterRun::Normal('x' as u16),
                CharacterRun::Normal('y' as u16),
                CharacterRun::Normal('z' as u16),
                OBJECT,
                CharacterRun::Normal('!' as u16),
                CharacterRun::PARAGRAPH_END,
            ]
        );
        assert_eq!(para.style_ranges, vec![StyleRange::new(0, 3)]);
        assert_eq!(para.character_count, 6);
    }

    #[test]
    fn test_multiline_value_becomes_line_breaks() {
        let mut para = Paragraph::from_text("주소: ${address}", 0);
        let values = map(&[("address", "서울특별시 강남구\n○○빌딩 5층\n우편번호: 12345")]);

        fill_paragraph(&mut para, &values);

        let breaks = para
            .runs
            .iter()
            .filter(|run| **run == CharacterRun::LINE_BREAK)
            .count();
        assert_eq!(breaks, 2);
        assert_eq!(
            para.text(),
            "주소: 서울특별시 강남구\n○○빌딩 5층\n우편번호: 12345"
        );
        assert!(check_paragraph(&para).is_empty());
    }

    #[test]
    fn test_crlf_value_becomes_one_line_break() {
        let mut para = Paragraph::from_text("${a}", 0);

        fill_paragraph(&mut para, &map(&[("a", "x\r\ny")]));

        assert_eq!(
            para.runs,
            vec![
                CharacterRun::Normal('x' as u16),
                CharacterRun::LINE_BREAK,
                CharacterRun::Normal('y' as u16),
                CharacterRun::PARAGRAPH_END,
            ]
        );
        assert!(check_paragraph(&para).is_empty());
    }

    #[test]
    fn test_tab_kept_other_control_characters_dropped() {
        let mut para = Paragraph::from_text("${a}", 0);

        fill_paragraph(&mut para, &map(&[("a", "y\tz\u{b}")]));

        assert_eq!(
            para.runs,
            vec![
                CharacterRun::Normal('y' as u16),
                CharacterRun::Normal('\t' as u16),
                CharacterRun::Normal('z' as u16),
                CharacterRun::PARAGRAPH_END,
            ]
        );
    }

    #[test]
    fn test_anchor_after_terminator_stays_after() {
        let mut runs = runs_from_str("${a}");
        runs.push(CharacterRun::PARAGRAPH_END);
        runs.push(OBJECT);
        let mut para = Paragraph {
            character_count: runs.len(),
            runs,
            style_ranges: vec![StyleRange::new(0, 0)],
            ..Default::default()
        };

        fill_paragraph(&mut para, &map(&[("a", "v")]));

        assert_eq!(
            para.runs,
            vec![
                CharacterRun::Normal('v' as u16),
                CharacterRun::PARAGRAPH_END,
                OBJECT,
            ]
        );
        assert_eq!(para.character_count, 3);
    }

    #[test]
    fn test_existing_line_breaks_preserved() {
        let mut para = Paragraph::from_text("${a}\n${b}", 0);

        fill_paragraph(&mut para, &map(&[("a", "1"), ("b", "2")]));

        assert_eq!(
            para.runs,
            vec![
                CharacterRun::Normal('1' as u16),
                CharacterRun::LINE_BREAK,
                CharacterRun::Normal('2' as u16),
                CharacterRun::PARAGRAPH_END,
            ]
        );
    }

    #[test]
    fn test_error_token_kept_rest_replaced() {
        let mut para = Paragraph::from_text("${bad}-${good}", 0);
        let mut values = PlaceholderMap::new();
        values.insert("bad", PlaceholderValue::Table(Default::default()));
        values.insert("good", "ok");

        let outcome = fill_paragraph(&mut para, &values);

        assert!(outcome.rewritten);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(para.text(), "${bad}-ok");
    }

    #[test]
    fn test_empty_paragraph_untouched() {
        let mut para = Paragraph::default();

        let outcome = fill_paragraph(&mut para, &map(&[("a", "b")]));

        assert_eq!(outcome, ParagraphOutcome::default());
        assert_eq!(para, Paragraph::default());
    }

    #[test]
    fn test_value_outside_bmp() {
        let mut para = Paragraph::from_text("${e}", 0);

        fill_paragraph(&mut para, &map(&[("e", "😀")]));

        // two code units plus terminator
        assert_eq!(para.character_count, 3);
        assert_eq!(para.text(), "😀");
    }
}
