//! Line/column geometry over a document snapshot.
//!
//! All public coordinates are **1-based**: line `1` is the first line and column `1` is the first
//! character of a line. Columns count Unicode scalar values (`char`), not bytes. Only `'\n'`
//! terminates a line; a `'\r'` before it belongs to the line's text.

use ropey::Rope;

/// A 1-based line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineColumn {
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based, in `char`s from the start of the line).
    pub column: usize,
}

impl LineColumn {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// An exact span in the current document.
///
/// The start is inclusive and the end is exclusive; `end_column` is relative to `end_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedRange {
    /// First line of the span (1-based).
    pub start_line: usize,
    /// Last line of the span (1-based).
    pub end_line: usize,
    /// Start column on `start_line` (1-based, inclusive).
    pub start_column: usize,
    /// End column on `end_line` (1-based, exclusive).
    pub end_column: usize,
}

impl ResolvedRange {
    /// Create a range from its start and end positions.
    pub fn new(start: LineColumn, end: LineColumn) -> Self {
        Self {
            start_line: start.line,
            end_line: end.line,
            start_column: start.column,
            end_column: end.column,
        }
    }

    /// Create a range contained in a single line.
    pub fn on_line(line: usize, start_column: usize, end_column: usize) -> Self {
        Self {
            start_line: line,
            end_line: line,
            start_column,
            end_column,
        }
    }

    /// Start position.
    pub fn start(&self) -> LineColumn {
        LineColumn::new(self.start_line, self.start_column)
    }

    /// End position (exclusive).
    pub fn end(&self) -> LineColumn {
        LineColumn::new(self.end_line, self.end_column)
    }

    /// Returns `true` if the span starts and ends on the same line.
    pub fn is_single_line(&self) -> bool {
        self.start_line == self.end_line
    }

    /// Returns `true` if the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start() >= self.end()
    }

    /// The last line that holds at least one character of the span.
    ///
    /// A span that ends right after a newline reports `end_column == 1` on the following line;
    /// that line contributes nothing, so the previous line is returned instead.
    pub fn last_content_line(&self) -> usize {
        if self.end_column <= 1 && self.end_line > self.start_line {
            self.end_line - 1
        } else {
            self.end_line
        }
    }
}

/// Logical line index for one document snapshot, backed by a [`Rope`].
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build an index for `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Number of lines (`N` newlines => `N + 1` lines; an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Number of characters in the document.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Convert a character offset into a position. Offsets past the end are clamped.
    pub fn position_of(&self, char_offset: usize) -> LineColumn {
        let offset = char_offset.min(self.rope.len_chars());
        let line_idx = self.rope.char_to_line(offset);
        let line_start = self.rope.line_to_char(line_idx);
        LineColumn::new(line_idx + 1, offset - line_start + 1)
    }

    /// Convert a position back into a character offset.
    ///
    /// Lines are clamped to the document and columns to the line's length + 1.
    pub fn offset_of(&self, position: LineColumn) -> usize {
        let line = position.line.clamp(1, self.line_count());
        let line_start = self.rope.line_to_char(line - 1);
        let max_column = self.line_len(line) + 1;
        line_start + position.column.clamp(1, max_column) - 1
    }

    /// Build the range covering the character offsets `start..end`.
    pub fn range_of(&self, start: usize, end: usize) -> ResolvedRange {
        ResolvedRange::new(self.position_of(start), self.position_of(end.max(start)))
    }

    /// Number of characters on `line`, excluding its terminating `'\n'`.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_chars(line).len()
    }

    /// Characters of `line` (1-based), excluding the terminating `'\n'`.
    ///
    /// Returns an empty vector for lines outside the document.
    pub fn line_chars(&self, line: usize) -> Vec<char> {
        if line == 0 || line > self.line_count() {
            return Vec::new();
        }
        let mut chars: Vec<char> = self.rope.line(line - 1).chars().collect();
        if chars.last() == Some(&'\n') {
            chars.pop();
        }
        chars
    }

    /// Text of `line` (1-based), excluding the terminating `'\n'`.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        Some(self.line_chars(line).into_iter().collect())
    }

    /// Range covering the whole content of `line`.
    pub fn line_range(&self, line: usize) -> ResolvedRange {
        ResolvedRange::on_line(line, 1, self.line_len(line) + 1)
    }

    /// Extract the text covered by `range`.
    pub fn slice(&self, range: &ResolvedRange) -> String {
        let start = self.offset_of(range.start());
        let end = self.offset_of(range.end()).max(start);
        self.rope.slice(start..end).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_round_trip_across_lines() {
        let index = LineIndex::from_text("ab\ncd\n\nef");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.position_of(0), LineColumn::new(1, 1));
        assert_eq!(index.position_of(2), LineColumn::new(1, 3));
        assert_eq!(index.position_of(3), LineColumn::new(2, 1));
        assert_eq!(index.position_of(6), LineColumn::new(3, 1));
        assert_eq!(index.position_of(9), LineColumn::new(4, 3));
        assert_eq!(index.offset_of(LineColumn::new(4, 3)), 9);
    }

    #[test]
    fn test_only_line_feed_breaks_lines() {
        let index = LineIndex::from_text("a\r\nb\rc");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_text(1).as_deref(), Some("a\r"));
        assert_eq!(index.line_text(2).as_deref(), Some("b\rc"));
    }

    #[test]
    fn test_offsets_are_clamped() {
        let index = LineIndex::from_text("héllo");
        assert_eq!(index.position_of(99), LineColumn::new(1, 6));
        assert_eq!(index.offset_of(LineColumn::new(7, 40)), 5);
        assert_eq!(index.line_text(2), None);
    }

    #[test]
    fn test_last_content_line_skips_trailing_newline() {
        let range = ResolvedRange::new(LineColumn::new(2, 1), LineColumn::new(4, 1));
        assert_eq!(range.last_content_line(), 3);
        let range = ResolvedRange::on_line(5, 1, 1);
        assert_eq!(range.last_content_line(), 5);
    }
}
