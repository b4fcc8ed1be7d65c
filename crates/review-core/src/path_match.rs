//! Tolerant file identity matching.
//!
//! Edit sources and editors routinely disagree on absolute vs. relative paths, separators, and
//! `file://` prefixes. Two paths are considered the same file when any of these hold:
//!
//! - they are equal after normalization
//! - their final segments (file names) are equal
//! - one is a suffix of the other, starting right after a path separator

/// Returns `true` if `a` and `b` plausibly name the same file.
///
/// Empty paths never match anything.
pub fn paths_refer_to_same_file(a: &str, b: &str) -> bool {
    let a = normalize_path(a);
    let b = normalize_path(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a == b {
        return true;
    }

    let (name_a, name_b) = (file_name(&a), file_name(&b));
    if !name_a.is_empty() && name_a == name_b {
        return true;
    }

    is_segment_suffix(&a, &b) || is_segment_suffix(&b, &a)
}

fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let path = path.strip_prefix("file://").unwrap_or(path);
    let mut normalized = path.replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn is_segment_suffix(long: &str, short: &str) -> bool {
    long.len() > short.len()
        && long.ends_with(short)
        && long[..long.len() - short.len()].ends_with('/')
}
