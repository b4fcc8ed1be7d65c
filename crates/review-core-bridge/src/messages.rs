//! Inbound message shapes.
//!
//! Messages are JSON objects tagged by a `"type"` field, with camelCase keys:
//!
//! ```json
//! {"type": "pendingEdit", "requestId": "7", "filePath": "main.tex",
//!  "oldString": "\\section{Intro}", "newString": "\\section{Introduction}"}
//! {"type": "navigate", "line": 12, "column": 4}
//! ```

use serde::Deserialize;

/// A message from the host or an external edit/navigation source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    /// A (different) file is now open in the view.
    #[serde(rename_all = "camelCase")]
    OpenDocument {
        /// Path of the open file, if it has one.
        #[serde(default)]
        path: Option<String>,
        /// Full document text.
        text: String,
    },
    /// The open document's text changed.
    #[serde(rename_all = "camelCase")]
    DocumentChanged {
        /// Full document text.
        text: String,
    },
    /// A new proposed edit.
    #[serde(rename_all = "camelCase")]
    PendingEdit {
        /// Opaque request token.
        request_id: String,
        /// Target file path.
        file_path: String,
        /// Text to replace.
        old_string: String,
        /// Replacement text.
        new_string: String,
    },
    /// The edit source withdrew its pending edit.
    ClearPendingEdit,
    /// The user accepted the rendered edit.
    #[serde(rename_all = "camelCase")]
    Accept {
        /// Request id being accepted.
        request_id: String,
    },
    /// The user rejected the pending edit.
    #[serde(rename_all = "camelCase")]
    Reject {
        /// Request id being rejected.
        request_id: String,
    },
    /// Focus a point in the document.
    #[serde(rename_all = "camelCase")]
    Navigate {
        /// Line (1-based).
        line: usize,
        /// Column (1-based).
        #[serde(default)]
        column: Option<usize>,
    },
    /// The viewport width changed.
    #[serde(rename_all = "camelCase")]
    ViewportResized {
        /// New width in character cells.
        width: usize,
    },
    /// A timer armed from a previous `nextDeadline` fired.
    Tick,
}
