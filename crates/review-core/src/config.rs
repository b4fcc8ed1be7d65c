//! Overlay configuration.

use crate::layout::DEFAULT_TAB_WIDTH;
use crate::word_span::WordSpanOptions;
use std::time::Duration;

/// Default lifetime of a navigation highlight.
pub const DEFAULT_HIGHLIGHT_DURATION: Duration = Duration::from_secs(2);

/// Tunables for [`OverlayController`](crate::OverlayController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    /// How long a navigation highlight stays visible.
    pub highlight_duration: Duration,
    /// Columns before the anchor included in the navigation fallback window.
    pub fallback_before: usize,
    /// Columns after the anchor included in the navigation fallback window.
    pub fallback_after: usize,
    /// Navigation tokens shorter than this are treated as degenerate.
    pub min_token_chars: usize,
    /// Tab width used when estimating preview wrapping.
    pub tab_width: usize,
    /// Prefix drawn before each preview row.
    pub addition_marker: String,
    /// Whether reveal requests ask the host to center the range.
    pub center_on_reveal: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            highlight_duration: DEFAULT_HIGHLIGHT_DURATION,
            fallback_before: 5,
            fallback_after: 15,
            min_token_chars: 1,
            tab_width: DEFAULT_TAB_WIDTH,
            addition_marker: "+ ".to_string(),
            center_on_reveal: true,
        }
    }
}

impl OverlayConfig {
    /// Word-span options derived from this configuration.
    pub fn word_span_options(&self) -> WordSpanOptions {
        WordSpanOptions {
            fallback_before: self.fallback_before,
            fallback_after: self.fallback_after,
            min_token_chars: self.min_token_chars,
        }
    }
}
