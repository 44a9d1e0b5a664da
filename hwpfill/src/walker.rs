//! Document walker: applies paragraph substitution to the whole tree
//!
//! Sections are walked in document order. Every paragraph is filled, then
//! the tables anchored in it are descended into row by row, cell by cell,
//! and their paragraphs are filled the same way (nested tables included).
//! Other block containers are left alone.

use std::collections::BTreeSet;

use crate::document_model::{
    check_paragraph, BlockContainer, Document, Paragraph, ParagraphPath, PathStep, Section,
};
use crate::placeholder::PlaceholderMap;
use crate::substitution::{extract_text, fill_paragraph, placeholder_keys, SubstitutionError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A substitution error together with where it happened
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedError {
    /// Paragraph containing the token
    pub path: ParagraphPath,

    /// The error
    pub error: SubstitutionError,
}

/// Summary of one fill pass over a document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FillReport {
    /// Paragraphs visited, table cell paragraphs included
    pub paragraphs_visited: usize,

    /// Paragraphs whose runs were rewritten
    pub paragraphs_rewritten: usize,

    /// Tokens replaced
    pub replacements: usize,

    /// Tokens left verbatim because their value could not be rendered
    pub errors: Vec<LocatedError>,

    /// Keys found in the document but absent from the map
    pub unresolved: BTreeSet<String>,
}

impl FillReport {
    /// Append another report (in document order)
    pub fn merge(&mut self, other: FillReport) {
        self.paragraphs_visited += other.paragraphs_visited;
        self.paragraphs_rewritten += other.paragraphs_rewritten;
        self.replacements += other.replacements;
        self.errors.extend(other.errors);
        self.unresolved.extend(other.unresolved);
    }

    /// Check if every token in the document was resolved and rendered
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty() && self.unresolved.is_empty()
    }
}

/// Fill every placeholder of `document` in place
///
/// # Parameters
/// * `document` - Parsed document tree, exclusively borrowed for the walk
/// * `values` - Placeholder values
///
/// # Returns
/// * `FillReport` - Counts plus the local errors collected along the way
pub fn fill_document(document: &mut Document, values: &PlaceholderMap) -> FillReport {
    if values.is_empty() {
        log::info!("No placeholder values supplied; paragraphs are left untouched");
    }

    // Each section owns its paragraphs, so sections can be filled
    // independently and the reports merged in document order.
    #[cfg(feature = "parallel")]
    let reports: Vec<FillReport> = document
        .sections
        .par_iter_mut()
        .enumerate()
        .map(|(index, section)| fill_section(section, index, values))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let reports: Vec<FillReport> = document
        .sections
        .iter_mut()
        .enumerate()
        .map(|(index, section)| fill_section(section, index, values))
        .collect();

    let mut report = FillReport::default();
    for section_report in reports {
        report.merge(section_report);
    }

    for located in &report.errors {
        log::warn!("{}: {}", located.path, located.error);
    }
    if !report.unresolved.is_empty() {
        log::warn!(
            "Placeholders without a value were left as-is: {}",
            report
                .unresolved
                .iter()
                .map(|key| format!("${{{}}}", key))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    report
}

/// Fill one section
fn fill_section(section: &mut Section, index: usize, values: &PlaceholderMap) -> FillReport {
    let mut report = FillReport::default();
    let path = ParagraphPath::root().join(PathStep::Section(index));
    fill_paragraphs(&mut section.paragraphs, &path, values, &mut report);
    log::debug!(
        "Section {}: {} paragraphs visited, {} rewritten",
        index + 1,
        report.paragraphs_visited,
        report.paragraphs_rewritten
    );
    report
}

/// Fill a paragraph list and every table anchored in it
fn fill_paragraphs(
    paragraphs: &mut [Paragraph],
    parent: &ParagraphPath,
    values: &PlaceholderMap,
    report: &mut FillReport,
) {
    for (p, paragraph) in paragraphs.iter_mut().enumerate() {
        let path = parent.join(PathStep::Paragraph(p));

        if log::log_enabled!(log::Level::Debug) {
            for issue in check_paragraph(paragraph) {
                log::debug!("{}: pre-existing inconsistency: {}", path, issue);
            }
        }

        let outcome = fill_paragraph(paragraph, values);
        report.paragraphs_visited += 1;
        report.replacements += outcome.replacements;
        if outcome.rewritten {
            report.paragraphs_rewritten += 1;
            log::debug!(
                "{}: replaced {} placeholder(s), {} runs",
                path,
                outcome.replacements,
                paragraph.character_count
            );
        }
        report.errors.extend(outcome.errors.into_iter().map(|error| LocatedError {
            path: path.clone(),
            error,
        }));
        report.unresolved.extend(outcome.unresolved);

        for (c, container) in paragraph.containers.iter_mut().enumerate() {
            let BlockContainer::Table(table) = container else {
                continue;
            };
            for (r, row) in table.rows.iter_mut().enumerate() {
                for (col, cell) in row.cells.iter_mut().enumerate() {
                    let cell_path = path.join(PathStep::Container(c)).join(PathStep::Cell {
                        row: r,
                        column: col,
                    });
                    fill_paragraphs(&mut cell.paragraphs, &cell_path, values, report);
                }
            }
        }
    }
}

/// Collect every placeholder key used in the document
///
/// # Returns
/// * `BTreeSet<String>` - Distinct keys, table cells included
pub fn collect_keys(document: &Document) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    document.visit_paragraphs(&mut |_, paragraph| {
        let text = extract_text(&paragraph.runs).text;
        keys.extend(placeholder_keys(&text).map(str::to_string));
    });
    keys
}
