//! String locator behaviour.
//!
//! Fixed examples plus randomized checks of the exact-match, leftmost-match and
//! normalized-match properties over generated documents.

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use review_core::{
    LineIndex, MatchKind, ResolvedRange, locate, locate_match, normalize_whitespace,
};

const WORDS: &[&str] = &[
    "alpha", "beta", "\\section{Intro}", "{", "}", "x", "中文", "👋", "let", "=", ";",
];
const GAPS: &[&str] = &[" ", "  ", "\n", "\t", " \n  ", "\n\n"];

fn random_document(rng: &mut StdRng, words: usize) -> String {
    let mut text = String::new();
    for i in 0..words {
        if i > 0 {
            text.push_str(GAPS[rng.gen_range(0..GAPS.len())]);
        }
        text.push_str(WORDS[rng.gen_range(0..WORDS.len())]);
    }
    text
}

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

#[test]
fn test_single_line_exact_match() {
    let range = locate("The \\section{Intro} begins here.", "\\section{Intro}").unwrap();
    assert_eq!(range, ResolvedRange::on_line(1, 5, 20));
}

#[test]
fn test_normalized_match_across_newline() {
    let m = locate_match("a\nb   c", "b c").unwrap();
    assert_eq!(m.kind, MatchKind::WhitespaceNormalized);
    assert_eq!(m.range, ResolvedRange::on_line(2, 1, 6));
}

#[test]
fn test_normalized_search_with_newlines_in_query() {
    let document = "fn main() {\n    let x = 1;\n    let y = 2;\n}\n";
    let m = locate_match(document, "let x = 1; let y = 2;").unwrap();
    assert_eq!(m.kind, MatchKind::WhitespaceNormalized);
    assert_eq!(m.range.start_line, 2);
    assert_eq!(m.range.start_column, 5);
    assert_eq!(m.range.end_line, 3);
    assert_eq!(m.range.end_column, 15);
}

#[test]
fn test_multi_line_exact_match_end_column_is_relative_to_last_line() {
    let document = "first\nsecond line\nthird\n";
    let range = locate(document, "line\nthi").unwrap();
    assert_eq!(range.start_line, 2);
    assert_eq!(range.start_column, 8);
    assert_eq!(range.end_line, 3);
    assert_eq!(range.end_column, 4);
}

#[test]
fn test_no_match() {
    assert_eq!(locate("xyz", "abc"), None);
    assert_eq!(locate("", "abc"), None);
    assert_eq!(locate("abc", ""), None);
    assert_eq!(locate("a b c", "a  b  d"), None);
}

#[test]
fn test_leftmost_match_wins() {
    let range = locate("foo bar\nfoo bar\nfoo", "foo").unwrap();
    assert_eq!(range, ResolvedRange::on_line(1, 1, 4));

    // Normalized pass is leftmost too.
    let range = locate("x  y\nx\ny", "x y").unwrap();
    assert_eq!(range, ResolvedRange::on_line(1, 1, 5));
}

#[test]
fn test_columns_count_chars_not_bytes() {
    let range = locate("héllo wörld", "wörld").unwrap();
    assert_eq!(range, ResolvedRange::on_line(1, 7, 12));
}

#[test]
fn test_exact_match_property() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let document = random_document(&mut rng, 40);
        let chars: Vec<char> = document.chars().collect();
        let start = rng.gen_range(0..chars.len());
        let end = rng.gen_range(start + 1..=chars.len());
        let search = char_slice(&document, start, end);

        let m = locate_match(&document, &search).unwrap();
        assert_eq!(m.kind, MatchKind::Exact);
        let index = LineIndex::from_text(&document);
        assert_eq!(index.slice(&m.range), search);

        // Leftmost: no earlier occurrence exists.
        let first = document.find(&search).unwrap();
        assert_eq!(m.start_offset, document[..first].chars().count());
    }
}

#[test]
fn test_normalized_match_property() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let document = random_document(&mut rng, 30);
        let tokens: Vec<&str> = document.split_whitespace().collect();
        let start = rng.gen_range(0..tokens.len());
        let end = rng.gen_range(start + 1..=tokens.len());
        // Re-space the tokens differently from the document.
        let search = tokens[start..end].join("\n   ");

        let range = locate(&document, &search).unwrap();
        let index = LineIndex::from_text(&document);
        assert_eq!(
            normalize_whitespace(&index.slice(&range)),
            normalize_whitespace(&search)
        );
    }
}
