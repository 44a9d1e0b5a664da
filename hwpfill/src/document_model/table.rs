//! Block containers embedded in paragraph flow

use super::paragraph::Paragraph;
use serde::{Deserialize, Serialize};

/// A structural element anchored in a paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockContainer {
    /// A table whose cells hold their own paragraphs
    Table(Table),

    /// Any other embedded object (picture, equation, shape, ...)
    ///
    /// Carried through untouched, its content is never substituted.
    Object {
        /// Object kind as named by the codec (e.g. "picture")
        kind: String,
    },
}

/// A table: rows of cells
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows in top-to-bottom order
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// A table row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    /// Cells in left-to-right order
    #[serde(default)]
    pub cells: Vec<Cell>,
}

/// A table cell owning its own paragraph list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Paragraphs of the cell
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl Table {
    /// Build a table of single-paragraph cells from plain text
    ///
    /// # Parameters
    /// * `rows` - Cell texts, row by row
    /// * `style_id` - Character style of every cell paragraph
    pub fn from_text_rows(rows: &[&[&str]], style_id: u32) -> Self {
        let rows = rows
            .iter()
            .map(|row| Row {
                cells: row
                    .iter()
                    .map(|text| Cell {
                        paragraphs: vec![Paragraph::from_text(text, style_id)],
                    })
                    .collect(),
            })
            .collect();

        Self { rows }
    }
}
