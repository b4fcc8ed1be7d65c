#![warn(missing_docs)]
//! Review Core - Headless Edit Review Overlay Engine
//!
//! # Overview
//!
//! `review-core` takes a proposed textual change, expressed as an "old text → new text" pair,
//! finds where the old text lives in a live (possibly already diverged) document, and describes a
//! non-destructive review overlay for it: a strike-through removal over the exact range plus an
//! inserted block previewing the new text. The host renders the overlay and decides whether to
//! commit or discard the change.
//!
//! The same text geometry also resolves external line/column navigation targets to a meaningful
//! word span that the host highlights briefly.
//!
//! It does not render anything and never mutates the document.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  OverlayController (state machine)          │  ← Public API
//! ├──────────────────────┬──────────────────────┤
//! │  StringLocator       │  WordSpanResolver    │  ← Pure resolvers
//! ├──────────────────────┴──────────────────────┤
//! │  Layout (width / wrap estimate)             │  ← Preview sizing
//! ├─────────────────────────────────────────────┤
//! │  Line Index (Rope-based)                    │  ← Line/column geometry
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use review_core::{locate, resolve, ResolvedRange};
//!
//! let range = locate("a\nb   c", "b c").unwrap();
//! assert_eq!(range, ResolvedRange::on_line(2, 1, 6));
//!
//! let word = resolve("hello   world", 1, 6);
//! assert_eq!(word, ResolvedRange::on_line(1, 9, 14));
//! ```
//!
//! # Module Description
//!
//! - [`locator`] - exact and whitespace-normalized substring location
//! - [`word_span`] - point → word span expansion with graceful fallbacks
//! - [`overlay`] - per-view overlay controller
//! - [`line_index`] - 1-based line/column geometry
//! - [`layout`] - display widths and wrap-row estimation
//! - [`decorations`] - decoration, view block and reveal instructions
//! - [`path_match`] - tolerant file identity
//! - [`timer`] - cancellable delayed action driven by host time
//! - [`config`] - overlay tunables

pub mod config;
pub mod decorations;
pub mod layout;
pub mod line_index;
pub mod locator;
pub mod overlay;
pub mod path_match;
pub mod timer;
pub mod word_span;

pub use config::{DEFAULT_HIGHLIGHT_DURATION, OverlayConfig};
pub use decorations::{
    Decoration, DecorationKind, DecorationPlacement, PreviewRow, RevealAlign, RevealRequest,
    ViewBlock,
};
pub use layout::{DEFAULT_TAB_WIDTH, visual_row_count};
pub use line_index::{LineColumn, LineIndex, ResolvedRange};
pub use locator::{LocatedMatch, MatchKind, locate, locate_match, normalize_whitespace};
pub use overlay::{
    ClearReason, DocumentContext, EditCommit, EditKey, EditOutcome, NavigationTarget,
    OverlayController, OverlayEvent, OverlayEventCallback, OverlayStatus, PendingEdit,
    UnresolvedReason,
};
pub use path_match::paths_refer_to_same_file;
pub use timer::CancellableDelay;
pub use word_span::{SpanKind, WordSpan, WordSpanOptions, resolve, resolve_span};
