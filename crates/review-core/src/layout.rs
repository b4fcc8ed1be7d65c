//! Display-width measurement and wrap estimation.
//!
//! The host reserves vertical space for inserted preview blocks before it lays them out, so the
//! engine estimates how many display rows each logical line occupies at a given viewport width.
//! Widths follow UAX #11 (via `unicode-width`) and are measured per grapheme cluster so a cluster is
//! never split across rows.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Default tab width (in cells) used when a caller does not specify a tab width.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Visual width (in cells) of a grapheme cluster at a given cell offset within the line.
///
/// `'\t'` advances to the next tab stop based on `tab_width`.
pub fn grapheme_width_at(grapheme: &str, cell_offset_in_line: usize, tab_width: usize) -> usize {
    if grapheme == "\t" {
        let tab_width = tab_width.max(1);
        tab_width - cell_offset_in_line % tab_width
    } else {
        UnicodeWidthStr::width(grapheme)
    }
}

/// Number of display rows a single logical line wraps into.
///
/// Wrapping happens at grapheme boundaries: a cluster that does not fit in the remaining cells
/// moves to the next row intact. A `viewport_width` of `0` disables wrapping. Always returns at
/// least `1`.
pub fn visual_row_count(line: &str, viewport_width: usize, tab_width: usize) -> usize {
    if viewport_width == 0 {
        return 1;
    }

    let mut rows = 1usize;
    let mut x_in_row = 0usize;
    let mut x_in_line = 0usize;
    for grapheme in line.graphemes(true) {
        let width = grapheme_width_at(grapheme, x_in_line, tab_width);
        if x_in_row > 0 && x_in_row + width > viewport_width {
            rows += 1;
            x_in_row = 0;
        }
        x_in_row = x_in_row.saturating_add(width);
        x_in_line = x_in_line.saturating_add(width);
    }
    rows
}
