//! Paragraph representation
//!
//! Besides its runs, a paragraph carries metadata derived from them: the
//! character count, the style range table and the cached line layout.
//! All three have to be kept in step with `runs`.

use super::character_run::{runs_from_str, runs_to_string, CharacterRun};
use super::table::BlockContainer;
use serde::{Deserialize, Serialize};

/// A character style applied from `position` up to the next range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRange {
    /// Run index where the style starts
    pub position: u32,

    /// Character shape id in the document's style table
    pub style_id: u32,
}

impl StyleRange {
    /// Create a new style range
    pub fn new(position: u32, style_id: u32) -> Self {
        Self { position, style_id }
    }
}

/// One laid-out line of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSegment {
    /// Run index where the line starts
    pub text_start: u32,

    /// Vertical position of the line (HWPUNIT)
    pub vertical_position: i32,

    /// Height of the line (HWPUNIT)
    pub line_height: i32,

    /// Width of the line (HWPUNIT)
    pub segment_width: i32,
}

/// Renderer-facing line layout snapshot
///
/// Describes the run sequence as it was when the layout was computed, so it
/// must be dropped whenever the runs change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutCache {
    /// Line segments in display order
    pub segments: Vec<LineSegment>,
}

/// A paragraph: the unit of substitution
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Character sequence
    #[serde(default)]
    pub runs: Vec<CharacterRun>,

    /// Block containers (tables, objects) anchored in this paragraph
    #[serde(default)]
    pub containers: Vec<BlockContainer>,

    /// Style ranges, strictly increasing by position, first at 0
    #[serde(default)]
    pub style_ranges: Vec<StyleRange>,

    /// Cached line layout, `None` when it has to be recomputed
    #[serde(default)]
    pub layout_cache: Option<LayoutCache>,

    /// Number of runs, as recorded in the paragraph header
    #[serde(default)]
    pub character_count: usize,
}

impl Paragraph {
    /// Create a consistent paragraph from plain text
    ///
    /// # Parameters
    /// * `text` - Paragraph text, `\n` marks line breaks
    /// * `style_id` - Character style applied to the whole paragraph
    ///
    /// # Returns
    /// * `Paragraph` - Paragraph ending in a terminator, single style range,
    ///   no layout cache and no containers
    pub fn from_text(text: &str, style_id: u32) -> Self {
        let mut runs = runs_from_str(text);
        runs.push(CharacterRun::PARAGRAPH_END);

        Self {
            character_count: runs.len(),
            runs,
            containers: Vec::new(),
            style_ranges: vec![StyleRange::new(0, style_id)],
            layout_cache: None,
        }
    }

    /// Attach a block container, returning the paragraph
    pub fn with_container(mut self, container: BlockContainer) -> Self {
        self.containers.push(container);
        self
    }

    /// Plain text view of the paragraph (line breaks as `\n`)
    pub fn text(&self) -> String {
        runs_to_string(&self.runs)
    }

    /// Check if the paragraph has no runs at all
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
