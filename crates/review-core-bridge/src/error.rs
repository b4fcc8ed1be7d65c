//! Error types for the bridge layer.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while decoding bridge messages or configuration.
pub enum BridgeError {
    #[error("JSON error: {0}")]
    /// The payload was not valid JSON or did not match the expected shape.
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    /// A configuration value was out of range.
    InvalidConfig(String),
}
