//! Overlay output data model.
//!
//! Everything the engine asks the host to draw is expressed here: ranged decorations with a
//! style tag, an inserted view block previewing added text, and reveal (scroll) requests. None of
//! these mutate the document.

use crate::layout::visual_row_count;
use crate::line_index::ResolvedRange;

/// Where a decoration is drawn relative to its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationPlacement {
    /// Styled inline over the range's characters.
    Inline,
    /// A marker in the gutter/margin of the range's first line.
    Gutter,
    /// Styled across the whole line.
    WholeLine,
}

/// A coarse decoration kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecorationKind {
    /// Text a pending edit would remove (distinct background + strikethrough).
    Removal,
    /// Margin indicator on the first line of a pending removal.
    RemovalMarker,
    /// Word-level emphasis for a navigation target.
    NavigationWord,
    /// Line-level emphasis for a navigation target.
    NavigationLine,
}

impl DecorationKind {
    /// The host-facing style tag for this kind.
    pub fn style_tag(&self) -> &'static str {
        match self {
            Self::Removal => "review-removal",
            Self::RemovalMarker => "review-removal-marker",
            Self::NavigationWord => "navigation-highlight",
            Self::NavigationLine => "navigation-highlight-line",
        }
    }
}

/// A single decoration instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    /// Anchor range.
    pub range: ResolvedRange,
    /// Placement relative to the range.
    pub placement: DecorationPlacement,
    /// Kind (and therefore style tag).
    pub kind: DecorationKind,
}

impl Decoration {
    /// Create a new decoration.
    pub fn new(range: ResolvedRange, placement: DecorationPlacement, kind: DecorationKind) -> Self {
        Self {
            range,
            placement,
            kind,
        }
    }
}

/// One logical line of a preview block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    /// Addition marker drawn before the text.
    pub marker: String,
    /// The added line's text.
    pub text: String,
    /// Estimated display rows for `marker + text` at the current viewport width.
    pub visual_rows: usize,
}

/// A synthetic, non-editable block inserted after a document line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewBlock {
    /// The block is drawn immediately after this line (1-based).
    pub after_line: usize,
    /// Rows previewing the added text, one per logical line.
    pub rows: Vec<PreviewRow>,
    /// Total height in display rows.
    pub height: usize,
}

impl ViewBlock {
    /// Style tag for the whole block.
    pub const STYLE_TAG: &'static str = "review-insertion";

    /// Build a block previewing `lines` after `after_line`, measured for `viewport_width`.
    pub fn new(
        after_line: usize,
        lines: Vec<String>,
        marker: &str,
        viewport_width: usize,
        tab_width: usize,
    ) -> Self {
        let rows = lines
            .into_iter()
            .map(|text| PreviewRow {
                marker: marker.to_string(),
                text,
                visual_rows: 1,
            })
            .collect();
        let mut block = Self {
            after_line,
            rows,
            height: 0,
        };
        block.relayout(viewport_width, tab_width);
        block
    }

    /// Re-estimate row heights for a new viewport width. Returns the new total height.
    pub fn relayout(&mut self, viewport_width: usize, tab_width: usize) -> usize {
        let mut height = 0usize;
        for row in &mut self.rows {
            let mut display = String::with_capacity(row.marker.len() + row.text.len());
            display.push_str(&row.marker);
            display.push_str(&row.text);
            row.visual_rows = visual_row_count(&display, viewport_width, tab_width);
            height += row.visual_rows;
        }
        self.height = height;
        height
    }
}

/// How the host should scroll a range into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAlign {
    /// Center the range in the viewport.
    Center,
    /// Scroll the minimum amount needed.
    Nearest,
}

/// A request to bring a range into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealRequest {
    /// The range to reveal.
    pub range: ResolvedRange,
    /// Scroll alignment.
    pub align: RevealAlign,
}
