use hwpfill::document_model::{BlockContainer, CharacterRun, ControlKind, Paragraph, StyleRange};
use hwpfill::{collect_keys, fill_template, Document, DocumentCodec, JsonCodec, PlaceholderMap};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_template() -> Document {
    JsonCodec::default().read(&fixture("template.json")).unwrap()
}

fn fill_fixture() -> (Document, hwpfill::FillReport) {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("filled.json");
    let values = PlaceholderMap::load(fixture("values.toml")).unwrap();
    let codec = JsonCodec::default();

    let report = fill_template(&codec, &fixture("template.json"), &output, &values).unwrap();
    let filled = codec.read(&output).unwrap();
    (filled, report)
}

fn cell_paragraph(paragraph: &Paragraph, row: usize, column: usize) -> &Paragraph {
    let BlockContainer::Table(table) = &paragraph.containers[0] else {
        panic!("expected a table container");
    };
    &table.rows[row].cells[column].paragraphs[0]
}

#[test]
fn test_fixture_is_consistent() {
    let template = load_template();

    assert!(template.check().is_empty(), "{:?}", template.check());
    assert_eq!(template.paragraph_count(), 9);
}

#[test]
fn test_collect_keys_from_fixture() {
    let keys: Vec<String> = collect_keys(&load_template()).into_iter().collect();

    assert_eq!(
        keys,
        ["company", "item", "missing", "name", "title", "total"]
    );
}

#[test]
fn test_fill_fixture_report() {
    let (_, report) = fill_fixture();

    assert_eq!(report.paragraphs_visited, 9);
    assert_eq!(report.paragraphs_rewritten, 5);
    assert_eq!(report.replacements, 6);
    assert!(report.errors.is_empty());
    assert_eq!(
        report.unresolved.into_iter().collect::<Vec<_>>(),
        ["missing"]
    );
}

#[test]
fn test_fill_fixture_body_paragraphs() {
    let (filled, _) = fill_fixture();
    let paragraphs = &filled.sections[0].paragraphs;

    // rewritten paragraphs are consistent again
    assert!(filled.check().is_empty(), "{:?}", filled.check());

    assert_eq!(paragraphs[0].text(), "Contract: Employment");
    assert_eq!(paragraphs[0].style_ranges, vec![StyleRange::new(0, 1)]);
    assert!(paragraphs[0].layout_cache.is_none());

    assert_eq!(paragraphs[1].text(), "Dear 홍길동,\nWelcome to 테스트회사.");
    assert_eq!(paragraphs[1].style_ranges, vec![StyleRange::new(0, 3)]);
    assert_eq!(paragraphs[1].runs[9], CharacterRun::LINE_BREAK);
    assert_eq!(
        paragraphs[1].character_count,
        paragraphs[1].runs.len()
    );
}

#[test]
fn test_fill_fixture_keeps_object_anchor_and_fills_table() {
    let (filled, _) = fill_fixture();
    let details = &filled.sections[0].paragraphs[2];

    assert_eq!(details.runs[0], CharacterRun::Control(ControlKind::Other(11)));
    assert_eq!(details.text(), "Details: 홍길동");
    assert_eq!(details.runs.last(), Some(&CharacterRun::PARAGRAPH_END));

    assert_eq!(cell_paragraph(details, 0, 0).text(), "Item");
    assert_eq!(cell_paragraph(details, 0, 1).text(), "Laptop");
    assert_eq!(cell_paragraph(details, 1, 0).text(), "Total");
    assert_eq!(cell_paragraph(details, 1, 1).text(), "1500000");
}

#[test]
fn test_fill_fixture_leaves_other_paragraphs_untouched() {
    let template = load_template();
    let (filled, _) = fill_fixture();

    // No tokens: byte-for-byte the same, layout cache included
    assert_eq!(
        filled.sections[0].paragraphs[3],
        template.sections[0].paragraphs[3]
    );
    // Unresolved token only
    assert_eq!(
        filled.sections[0].paragraphs[4],
        template.sections[0].paragraphs[4]
    );
    // Label cells without tokens
    assert_eq!(
        cell_paragraph(&filled.sections[0].paragraphs[2], 0, 0),
        cell_paragraph(&template.sections[0].paragraphs[2], 0, 0)
    );
}

#[test]
fn test_refill_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    let values = PlaceholderMap::load(fixture("values.toml")).unwrap();
    let codec = JsonCodec::default();
    fill_template(&codec, &fixture("template.json"), &first, &values).unwrap();

    let report = fill_template(&codec, &first, &second, &values).unwrap();

    assert_eq!(report.replacements, 0);
    assert_eq!(report.paragraphs_rewritten, 0);
    assert_eq!(codec.read(&first).unwrap(), codec.read(&second).unwrap());
}
