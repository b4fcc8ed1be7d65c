//! Locating a proposed edit's "old text" in the live document.
//!
//! The search runs in two passes:
//!
//! 1. an exact substring search (leftmost occurrence)
//! 2. a whitespace-normalized search, where every run of whitespace (newlines included) counts as
//!    a single space and both ends are trimmed
//!
//! A normalized hit is mapped back onto the original text by walking the original characters and
//! the normalized characters in lockstep. Both passes always pick the leftmost match.

use crate::line_index::{LineIndex, ResolvedRange};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// How a [`LocatedMatch`] was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The search text occurs verbatim.
    Exact,
    /// The search text only occurs after collapsing whitespace runs.
    WhitespaceNormalized,
}

/// A located occurrence of the search text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedMatch {
    /// Line/column span of the occurrence in the original document.
    pub range: ResolvedRange,
    /// Inclusive start character offset in the original document.
    pub start_offset: usize,
    /// Exclusive end character offset in the original document.
    pub end_offset: usize,
    /// Which search pass produced the match.
    pub kind: MatchKind,
}

/// Collapse every whitespace run in `text` to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Locate `search` in `document`.
///
/// Returns `None` when either input is empty or when `search` occurs neither verbatim nor after
/// whitespace normalization.
pub fn locate(document: &str, search: &str) -> Option<ResolvedRange> {
    locate_match(document, search).map(|m| m.range)
}

/// Like [`locate`], but also reports character offsets and the pass that matched.
pub fn locate_match(document: &str, search: &str) -> Option<LocatedMatch> {
    if document.is_empty() || search.is_empty() {
        return None;
    }

    let (start, end, kind) = match document.find(search) {
        Some(byte_offset) => {
            let start = document[..byte_offset].chars().count();
            (start, start + search.chars().count(), MatchKind::Exact)
        }
        None => {
            let (start, end) = locate_normalized(document, search)?;
            (start, end, MatchKind::WhitespaceNormalized)
        }
    };

    let index = LineIndex::from_text(document);
    Some(LocatedMatch {
        range: index.range_of(start, end),
        start_offset: start,
        end_offset: end,
        kind,
    })
}

/// Find `search` in the whitespace-normalized `document` and map the hit back to character
/// offsets in the original text.
fn locate_normalized(document: &str, search: &str) -> Option<(usize, usize)> {
    let normalized_search = normalize_whitespace(search);
    if normalized_search.is_empty() {
        return None;
    }
    let normalized_document = normalize_whitespace(document);
    let byte_offset = normalized_document.find(&normalized_search)?;

    let normalized_start = normalized_document[..byte_offset].chars().count();
    let normalized_len = normalized_search.chars().count();

    let chars: Vec<char> = document.chars().collect();
    // Leading whitespace was trimmed away and has no normalized counterpart.
    let origin = chars.iter().take_while(|ch| ch.is_whitespace()).count();
    let start = advance_normalized(&chars, origin, normalized_start);
    let end = advance_normalized(&chars, start, normalized_len);
    Some((start, end))
}

/// Walk `units` normalized characters forward from `from` in the original text.
///
/// A whitespace run in the original consumes exactly one normalized character; any other
/// character consumes one.
fn advance_normalized(chars: &[char], from: usize, units: usize) -> usize {
    let mut pos = from;
    let mut consumed = 0usize;
    while consumed < units && pos < chars.len() {
        if chars[pos].is_whitespace() {
            while pos < chars.len() && chars[pos].is_whitespace() {
                pos += 1;
            }
        } else {
            pos += 1;
        }
        consumed += 1;
    }
    pos
}
