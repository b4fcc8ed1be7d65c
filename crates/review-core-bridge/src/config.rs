//! JSON configuration for the overlay.
//!
//! Every key is optional; missing keys keep [`OverlayConfig::default`] values.
//!
//! ```json
//! { "highlightMs": 1500, "tabWidth": 8, "additionMarker": "> " }
//! ```

use crate::error::BridgeError;
use review_core::OverlayConfig;
use serde::Deserialize;
use std::time::Duration;

/// On-the-wire shape of [`OverlayConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct OverlayConfigFile {
    /// Navigation highlight lifetime, in milliseconds.
    pub highlight_ms: Option<u64>,
    /// Columns before the anchor in the navigation fallback window.
    pub fallback_before: Option<usize>,
    /// Columns after the anchor in the navigation fallback window.
    pub fallback_after: Option<usize>,
    /// Minimum navigation token length before falling back to the window.
    pub min_token_chars: Option<usize>,
    /// Tab width for preview wrap estimation.
    pub tab_width: Option<usize>,
    /// Prefix for preview rows.
    pub addition_marker: Option<String>,
    /// Whether reveal requests center the range.
    pub center_on_reveal: Option<bool>,
}

impl OverlayConfigFile {
    /// Validate and merge over the defaults.
    pub fn into_config(self) -> Result<OverlayConfig, BridgeError> {
        let mut config = OverlayConfig::default();
        if let Some(ms) = self.highlight_ms {
            config.highlight_duration = Duration::from_millis(ms);
        }
        if let Some(before) = self.fallback_before {
            config.fallback_before = before;
        }
        if let Some(after) = self.fallback_after {
            config.fallback_after = after;
        }
        if let Some(min) = self.min_token_chars {
            if min == 0 {
                return Err(BridgeError::InvalidConfig(
                    "minTokenChars must be at least 1".to_string(),
                ));
            }
            config.min_token_chars = min;
        }
        if let Some(tab_width) = self.tab_width {
            if tab_width == 0 {
                return Err(BridgeError::InvalidConfig(
                    "tabWidth must be at least 1".to_string(),
                ));
            }
            config.tab_width = tab_width;
        }
        if let Some(marker) = self.addition_marker {
            config.addition_marker = marker;
        }
        if let Some(center) = self.center_on_reveal {
            config.center_on_reveal = center;
        }
        Ok(config)
    }
}

/// Parse an [`OverlayConfig`] from JSON text.
pub fn parse_config(json: &str) -> Result<OverlayConfig, BridgeError> {
    let file: OverlayConfigFile = serde_json::from_str(json)?;
    file.into_config()
}
