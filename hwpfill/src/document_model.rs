//! In-memory document tree
//!
//! This is the tree a document codec produces from a template and consumes
//! when writing the result. Ownership is strictly tree-shaped: the document
//! owns its sections, sections own paragraphs, paragraphs own their runs
//! and block containers.

use serde::{Deserialize, Serialize};
use std::fmt;

// Submodules
mod character_run;
mod paragraph;
mod table;
mod validation;

// Re-export public types
pub use character_run::{
    runs_from_str, runs_to_string, CharacterRun, ControlKind, LINE_BREAK_CODE,
    OBJECT_ANCHOR_CODE, PARAGRAPH_END_CODE,
};
pub(crate) use character_run::push_char_runs;
pub use paragraph::{LayoutCache, LineSegment, Paragraph, StyleRange};
pub use table::{BlockContainer, Cell, Row, Table};
pub use validation::{check_paragraph, StructureIssue};

/// A whole document: ordered sections
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Sections in document order
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A section: the top-level narrative flow of paragraphs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    /// Paragraphs in document order
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Create a document from its sections
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Total number of paragraphs, including paragraphs inside table cells
    pub fn paragraph_count(&self) -> usize {
        let mut count = 0;
        self.visit_paragraphs(&mut |_, _| count += 1);
        count
    }

    /// Visit every paragraph in document order
    ///
    /// Table cell paragraphs are visited right after the paragraph that
    /// anchors the table.
    pub fn visit_paragraphs<F>(&self, f: &mut F)
    where
        F: FnMut(&ParagraphPath, &Paragraph),
    {
        for (s, section) in self.sections.iter().enumerate() {
            let path = ParagraphPath::root().join(PathStep::Section(s));
            visit_paragraph_list(&section.paragraphs, &path, f);
        }
    }

    /// Check every paragraph for structural inconsistencies
    ///
    /// # Returns
    /// * `Vec<(ParagraphPath, StructureIssue)>` - Issues in document order
    pub fn check(&self) -> Vec<(ParagraphPath, StructureIssue)> {
        let mut issues = Vec::new();
        self.visit_paragraphs(&mut |path, paragraph| {
            issues.extend(
                check_paragraph(paragraph)
                    .into_iter()
                    .map(|issue| (path.clone(), issue)),
            );
        });
        issues
    }
}

impl Section {
    /// Create a section from its paragraphs
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }
}

fn visit_paragraph_list<F>(paragraphs: &[Paragraph], parent: &ParagraphPath, f: &mut F)
where
    F: FnMut(&ParagraphPath, &Paragraph),
{
    for (p, paragraph) in paragraphs.iter().enumerate() {
        let path = parent.join(PathStep::Paragraph(p));
        f(&path, paragraph);

        for (c, container) in paragraph.containers.iter().enumerate() {
            let BlockContainer::Table(table) = container else {
                continue;
            };
            for (r, row) in table.rows.iter().enumerate() {
                for (col, cell) in row.cells.iter().enumerate() {
                    let cell_path = path.join(PathStep::Container(c)).join(PathStep::Cell {
                        row: r,
                        column: col,
                    });
                    visit_paragraph_list(&cell.paragraphs, &cell_path, f);
                }
            }
        }
    }
}

/// One step of a [`ParagraphPath`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Section index
    Section(usize),
    /// Paragraph index within its list
    Paragraph(usize),
    /// Container index within its paragraph
    Container(usize),
    /// Cell coordinates within a table
    Cell {
        /// Row index
        row: usize,
        /// Column index
        column: usize,
    },
}

/// Location of a paragraph in the document tree, used in logs and reports
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParagraphPath {
    steps: Vec<PathStep>,
}

impl ParagraphPath {
    /// The empty path
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path by one step
    pub fn join(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// Steps from the document root
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Check if the path passes through a table cell
    pub fn is_in_table(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, PathStep::Cell { .. }))
    }
}

impl fmt::Display for ParagraphPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .steps
            .iter()
            .map(|step| match step {
                PathStep::Section(i) => format!("section {}", i + 1),
                PathStep::Paragraph(i) => format!("paragraph {}", i + 1),
                PathStep::Container(i) => format!("table {}", i + 1),
                PathStep::Cell { row, column } => format!("cell {}:{}", row + 1, column + 1),
            })
            .collect::<Vec<_>>()
            .join(" / ");
        write!(f, "{}", s)
    }
}
