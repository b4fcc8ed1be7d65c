//! Expanding a navigation point into a highlightable word span.
//!
//! External locators (cross-reference and navigation systems) often report approximate columns
//! that land between tokens. [`resolve`] never fails: it snaps to the nearest token, or degrades to
//! the whole line or to a fixed window around the anchor.

use crate::line_index::{LineIndex, ResolvedRange};

/// Tuning for [`resolve_span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpanOptions {
    /// Columns before the anchor included in the fallback window.
    pub fallback_before: usize,
    /// Columns after the anchor included in the fallback window.
    pub fallback_after: usize,
    /// Tokens shorter than this (in `char`s) are treated as degenerate.
    pub min_token_chars: usize,
}

impl Default for WordSpanOptions {
    fn default() -> Self {
        Self {
            fallback_before: 5,
            fallback_after: 15,
            min_token_chars: 1,
        }
    }
}

/// Which resolution path produced a [`WordSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// A maximal run of non-whitespace characters containing the anchor.
    Token,
    /// The whole line (empty or whitespace-only lines).
    WholeLine,
    /// A fixed window around the anchor, used when the token is degenerate.
    FallbackWindow,
}

/// A resolved navigation span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan {
    /// The span to emphasize.
    pub range: ResolvedRange,
    /// The full content of the line the span lives on.
    pub line_range: ResolvedRange,
    /// How the span was produced.
    pub kind: SpanKind,
}

/// Resolve `(line, column)` in `document` to a highlight range using default options.
///
/// `line` is clamped to the document and `column` to the line's bounds.
pub fn resolve(document: &str, line: usize, column: usize) -> ResolvedRange {
    resolve_span(document, line, column, WordSpanOptions::default()).range
}

/// Resolve `(line, column)` in `document` to a [`WordSpan`].
pub fn resolve_span(
    document: &str,
    line: usize,
    column: usize,
    options: WordSpanOptions,
) -> WordSpan {
    let index = LineIndex::from_text(document);
    let line = line.clamp(1, index.line_count());
    let chars = index.line_chars(line);
    let len = chars.len();
    let line_range = ResolvedRange::on_line(line, 1, len + 1);
    let whole_line = WordSpan {
        range: line_range,
        line_range,
        kind: SpanKind::WholeLine,
    };

    if len == 0 {
        return whole_line;
    }

    let idx = column.clamp(1, len) - 1;
    let anchor = if chars[idx].is_whitespace() {
        let forward = (idx + 1..len).find(|&i| !chars[i].is_whitespace());
        let backward = (0..idx).rev().find(|&i| !chars[i].is_whitespace());
        match forward.or(backward) {
            Some(anchor) => anchor,
            None => return whole_line,
        }
    } else {
        idx
    };

    let mut start = anchor;
    while start > 0 && !chars[start - 1].is_whitespace() {
        start -= 1;
    }
    let mut end = anchor + 1;
    while end < len && !chars[end].is_whitespace() {
        end += 1;
    }

    if end - start < options.min_token_chars.max(1) {
        let anchor_column = anchor + 1;
        let start_column = anchor_column.saturating_sub(options.fallback_before).max(1);
        let end_column = (anchor_column + options.fallback_after)
            .max(start_column + 1)
            .min(len + 1);
        return WordSpan {
            range: ResolvedRange::on_line(line, start_column, end_column),
            line_range,
            kind: SpanKind::FallbackWindow,
        };
    }

    WordSpan {
        range: ResolvedRange::on_line(line, start + 1, end + 1),
        line_range,
        kind: SpanKind::Token,
    }
}
