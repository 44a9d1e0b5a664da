//! Structural consistency checks
//!
//! The engine never repairs a template; these checks only report what is
//! already inconsistent so it can be told apart from damage done by a
//! substitution.

use super::paragraph::Paragraph;
use itertools::Itertools;
use std::fmt;

/// A structural inconsistency found in a paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureIssue {
    /// `character_count` differs from the number of runs
    CountMismatch {
        /// Count recorded in the paragraph
        recorded: usize,
        /// Actual number of runs
        actual: usize,
    },
    /// The first style range does not start at position 0
    StyleRangeStart {
        /// Position of the first range
        position: u32,
    },
    /// Style range positions are not strictly increasing
    StyleRangeOrder {
        /// Index of the offending range
        index: usize,
    },
    /// A non-empty paragraph does not end with a terminator
    MissingTerminator,
    /// More than one terminator in the run sequence
    ExtraTerminator {
        /// Number of terminators found
        count: usize,
    },
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch { recorded, actual } => write!(
                f,
                "character count is {} but paragraph has {} runs",
                recorded, actual
            ),
            Self::StyleRangeStart { position } => {
                write!(f, "first style range starts at {} instead of 0", position)
            }
            Self::StyleRangeOrder { index } => {
                write!(f, "style range {} does not increase", index)
            }
            Self::MissingTerminator => write!(f, "paragraph does not end with a terminator"),
            Self::ExtraTerminator { count } => {
                write!(f, "paragraph has {} terminators", count)
            }
        }
    }
}

/// Check a single paragraph for structural inconsistencies
///
/// # Returns
/// * `Vec<StructureIssue>` - Empty when the paragraph is consistent
pub fn check_paragraph(paragraph: &Paragraph) -> Vec<StructureIssue> {
    let mut issues = Vec::new();
    let actual = paragraph.runs.len();

    if paragraph.character_count != actual {
        issues.push(StructureIssue::CountMismatch {
            recorded: paragraph.character_count,
            actual,
        });
    }

    if let Some(first) = paragraph.style_ranges.first() {
        if first.position != 0 {
            issues.push(StructureIssue::StyleRangeStart {
                position: first.position,
            });
        }
    }

    if let Some((index, _)) = paragraph
        .style_ranges
        .iter()
        .tuple_windows()
        .enumerate()
        .find(|(_, (a, b))| a.position >= b.position)
    {
        issues.push(StructureIssue::StyleRangeOrder { index: index + 1 });
    }

    if !paragraph.is_empty() {
        let terminators = paragraph
            .runs
            .iter()
            .filter(|run| run.is_paragraph_end())
            .count();

        if !paragraph.runs.last().is_some_and(|run| run.is_paragraph_end()) {
            issues.push(StructureIssue::MissingTerminator);
        }
        if terminators > 1 {
            issues.push(StructureIssue::ExtraTerminator { count: terminators });
        }
    }

    issues
}
