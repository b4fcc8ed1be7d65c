//! Review overlay controller.
//!
//! One [`OverlayController`] exists per document view. It owns two independent slots:
//!
//! - the **edit overlay**: at most one rendered [`PendingEdit`] (removal decoration, margin
//!   marker, and an inserted [`ViewBlock`] previewing the new text)
//! - the **navigation highlight**: at most one transient [`WordSpan`] that expires on its own
//!
//! ```text
//! Idle ──show_edit──▶ EditPending ──accept / reject / clear──────────▶ Idle
//!                         │
//!                         └──new edit / text change / file change──▶ clear, re-resolve
//! ```
//!
//! The controller never mutates the document. Accepting emits an [`EditCommit`]; the host applies
//! it and reports the new text through [`OverlayController::document_changed`]. A rendered range
//! is never patched in place: any change to the inputs clears it and resolves from scratch.
//!
//! Time is supplied by the host. [`OverlayController::next_deadline`] says when the navigation
//! highlight expires and [`OverlayController::tick`] performs the expiry.
//!
//! # Example
//!
//! ```rust
//! use review_core::{DocumentContext, OverlayConfig, OverlayController, OverlayStatus, PendingEdit};
//!
//! let mut overlay = OverlayController::new(OverlayConfig::default(), 80);
//! let text = "The \\section{Intro} begins here.";
//! let doc = DocumentContext::new(Some("/work/main.tex"), text);
//!
//! overlay.show_edit(
//!     PendingEdit::new("req-1", "main.tex", "\\section{Intro}", "\\section{Introduction}"),
//!     doc,
//! );
//! assert_eq!(overlay.status(), OverlayStatus::EditPending);
//!
//! let commit = overlay.accept("req-1").unwrap();
//! assert_eq!(commit.apply_to(text), "The \\section{Introduction} begins here.");
//! assert_eq!(overlay.status(), OverlayStatus::Idle);
//! ```

use crate::config::OverlayConfig;
use crate::decorations::{
    Decoration, DecorationKind, DecorationPlacement, RevealAlign, RevealRequest, ViewBlock,
};
use crate::line_index::{LineColumn, LineIndex, ResolvedRange};
use crate::locator::{MatchKind, locate_match};
use crate::path_match::paths_refer_to_same_file;
use crate::timer::CancellableDelay;
use crate::word_span::{WordSpan, resolve_span};
use std::time::Instant;
use tracing::{debug, trace};

/// A proposed replacement awaiting accept/reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PendingEdit {
    /// Opaque token identifying the proposal.
    pub request_id: String,
    /// Path of the file the proposal targets.
    pub file_path: String,
    /// Text to be replaced.
    pub old_string: String,
    /// Replacement text.
    pub new_string: String,
}

impl PendingEdit {
    /// Create a new pending edit.
    pub fn new(
        request_id: impl Into<String>,
        file_path: impl Into<String>,
        old_string: impl Into<String>,
        new_string: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            file_path: file_path.into(),
            old_string: old_string.into(),
            new_string: new_string.into(),
        }
    }
}

/// An external request to focus a point in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTarget {
    /// Line (1-based).
    pub line: usize,
    /// Column (1-based). `None` means the start of the line.
    pub column: Option<usize>,
}

impl NavigationTarget {
    /// Target a line, optionally at a column.
    pub fn new(line: usize, column: Option<usize>) -> Self {
        Self { line, column }
    }
}

/// The host's view of the open document, supplied on every resolution.
#[derive(Debug, Clone, Copy)]
pub struct DocumentContext<'a> {
    /// Path of the open file, if any.
    pub path: Option<&'a str>,
    /// Current document text.
    pub text: &'a str,
}

impl<'a> DocumentContext<'a> {
    /// Create a document context.
    pub fn new(path: Option<&'a str>, text: &'a str) -> Self {
        Self { path, text }
    }
}

/// Identifies one rendering of a pending edit.
///
/// Resize recomputations carry the key that was current when they were requested; a key that no
/// longer matches the rendered overlay is stale and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditKey {
    /// Request id of the rendered edit.
    pub request_id: String,
    /// Render generation (bumped on every render).
    pub generation: u64,
}

/// Edit overlay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStatus {
    /// No edit overlay is rendered.
    Idle,
    /// An edit overlay is rendered and awaits accept/reject.
    EditPending,
}

/// Why a rendered edit overlay was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearReason {
    /// The user accepted the edit.
    Accepted,
    /// The user rejected the edit.
    Rejected,
    /// A newer pending edit arrived.
    Superseded,
    /// The document text changed.
    DocumentChanged,
    /// The open file changed.
    FileChanged,
    /// The owning request was withdrawn.
    Cleared,
}

/// Why a pending edit could not be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The edit targets a different file than the one open.
    FileMismatch,
    /// The old text no longer occurs in the document.
    NoMatch,
}

/// Result of resolving a pending edit against the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The overlay is rendered over this range.
    Shown(ResolvedRange),
    /// Nothing is rendered.
    Unresolved(UnresolvedReason),
}

/// Commit intent emitted on accept. The host performs the replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommit {
    /// Request id of the accepted edit.
    pub request_id: String,
    /// Target file path, as supplied with the edit.
    pub file_path: String,
    /// The resolved range to replace.
    pub range: ResolvedRange,
    /// The text the edit expected to replace.
    pub old_string: String,
    /// The replacement text.
    pub new_string: String,
}

impl EditCommit {
    /// Replace `range` in `document` with `new_string`.
    ///
    /// The range (not `old_string`) is authoritative, so whitespace-normalized matches replace
    /// the original spacing.
    pub fn apply_to(&self, document: &str) -> String {
        let index = LineIndex::from_text(document);
        let start = index.offset_of(self.range.start());
        let end = index.offset_of(self.range.end()).max(start);
        let byte_at = |char_offset: usize| {
            document
                .char_indices()
                .nth(char_offset)
                .map_or(document.len(), |(byte, _)| byte)
        };
        let (start_byte, end_byte) = (byte_at(start), byte_at(end));

        let mut out = String::with_capacity(
            document.len() - (end_byte - start_byte) + self.new_string.len(),
        );
        out.push_str(&document[..start_byte]);
        out.push_str(&self.new_string);
        out.push_str(&document[end_byte..]);
        out
    }
}

/// Notifications emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    /// An edit overlay was rendered.
    EditShown {
        /// Request id of the edit.
        request_id: String,
        /// Range covered by the removal decoration.
        range: ResolvedRange,
        /// Which search pass located the old text.
        kind: MatchKind,
    },
    /// A pending edit could not be rendered.
    EditUnresolved {
        /// Request id of the edit.
        request_id: String,
        /// Why nothing was rendered.
        reason: UnresolvedReason,
    },
    /// A rendered edit overlay was removed.
    EditCleared {
        /// Request id of the edit.
        request_id: String,
        /// Why it was removed.
        reason: ClearReason,
    },
    /// The user accepted an edit; the host should apply it.
    AcceptEdit(EditCommit),
    /// The user rejected an edit; the document stays untouched.
    RejectEdit {
        /// Request id of the edit.
        request_id: String,
    },
    /// The preview block height changed after a viewport resize.
    BlockResized {
        /// Request id of the edit.
        request_id: String,
        /// New block height in display rows.
        height: usize,
    },
    /// The host should scroll a range into view.
    Reveal(RevealRequest),
    /// A navigation highlight was painted; the host should move the cursor.
    NavigationHighlighted {
        /// The highlighted span.
        span: WordSpan,
        /// Where to place the cursor.
        cursor: LineColumn,
    },
    /// The navigation highlight was removed.
    ScrollComplete,
}

/// Callback invoked for every [`OverlayEvent`].
pub type OverlayEventCallback = Box<dyn FnMut(&OverlayEvent) + Send>;

#[derive(Debug)]
struct ActiveOverlay {
    key: EditKey,
    range: ResolvedRange,
    block: Option<ViewBlock>,
}

/// Per-view controller for the edit overlay and the navigation highlight.
pub struct OverlayController {
    config: OverlayConfig,
    pending: Option<PendingEdit>,
    generation: u64,
    active: Option<ActiveOverlay>,
    highlight: Option<WordSpan>,
    highlight_clear: CancellableDelay,
    viewport_width: usize,
    version: u64,
    callbacks: Vec<OverlayEventCallback>,
}

impl OverlayController {
    /// Create an idle controller for a view `viewport_width` cells wide.
    pub fn new(config: OverlayConfig, viewport_width: usize) -> Self {
        Self {
            config,
            pending: None,
            generation: 0,
            active: None,
            highlight: None,
            highlight_clear: CancellableDelay::new(),
            viewport_width,
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Subscribe to overlay events.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&OverlayEvent) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// The active configuration.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Incremented on every visible change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Edit overlay state.
    pub fn status(&self) -> OverlayStatus {
        if self.active.is_some() {
            OverlayStatus::EditPending
        } else {
            OverlayStatus::Idle
        }
    }

    /// While an edit overlay is rendered the host should keep the document read-only.
    pub fn is_read_only(&self) -> bool {
        self.active.is_some()
    }

    /// The retained pending edit, rendered or not.
    pub fn pending_edit(&self) -> Option<&PendingEdit> {
        self.pending.as_ref()
    }

    /// Range of the rendered edit overlay.
    pub fn active_range(&self) -> Option<ResolvedRange> {
        self.active.as_ref().map(|active| active.range)
    }

    /// Key of the rendered edit overlay.
    pub fn edit_key(&self) -> Option<EditKey> {
        self.active.as_ref().map(|active| active.key.clone())
    }

    /// The inserted preview block, if any.
    pub fn view_block(&self) -> Option<&ViewBlock> {
        self.active.as_ref().and_then(|active| active.block.as_ref())
    }

    /// The current navigation highlight.
    pub fn navigation_highlight(&self) -> Option<&WordSpan> {
        self.highlight.as_ref()
    }

    /// Current viewport width (in cells).
    pub fn viewport_width(&self) -> usize {
        self.viewport_width
    }

    /// When the host should next call [`tick`](Self::tick).
    pub fn next_deadline(&self) -> Option<Instant> {
        self.highlight_clear.deadline()
    }

    /// All decorations to draw, edit overlay first.
    pub fn decorations(&self) -> Vec<Decoration> {
        let mut decorations = Vec::with_capacity(4);
        if let Some(active) = &self.active {
            decorations.push(Decoration::new(
                active.range,
                DecorationPlacement::Inline,
                DecorationKind::Removal,
            ));
            decorations.push(Decoration::new(
                ResolvedRange::on_line(active.range.start_line, 1, 1),
                DecorationPlacement::Gutter,
                DecorationKind::RemovalMarker,
            ));
        }
        if let Some(span) = &self.highlight {
            decorations.push(Decoration::new(
                span.range,
                DecorationPlacement::Inline,
                DecorationKind::NavigationWord,
            ));
            decorations.push(Decoration::new(
                span.line_range,
                DecorationPlacement::WholeLine,
                DecorationKind::NavigationLine,
            ));
        }
        decorations
    }

    /// Receive a new pending edit, superseding any previous one, and try to render it.
    pub fn show_edit(&mut self, edit: PendingEdit, doc: DocumentContext<'_>) -> EditOutcome {
        self.clear_active(ClearReason::Superseded);
        if let Some(previous) = self.pending.replace(edit.clone()) {
            trace!(request_id = %previous.request_id, "pending edit superseded");
        }
        self.evaluate(edit, doc)
    }

    /// The document text changed: clear everything and re-resolve the retained edit.
    pub fn document_changed(&mut self, doc: DocumentContext<'_>) -> Option<EditOutcome> {
        self.context_changed(doc, ClearReason::DocumentChanged)
    }

    /// The open file changed: clear everything and re-resolve the retained edit.
    pub fn file_changed(&mut self, doc: DocumentContext<'_>) -> Option<EditOutcome> {
        self.context_changed(doc, ClearReason::FileChanged)
    }

    /// Accept the rendered edit with `request_id`.
    ///
    /// Returns the commit intent (also emitted as [`OverlayEvent::AcceptEdit`]) or `None` when no
    /// rendered edit has that id.
    pub fn accept(&mut self, request_id: &str) -> Option<EditCommit> {
        let range = match &self.active {
            Some(active) if active.key.request_id == request_id => active.range,
            _ => {
                trace!(request_id, "accept ignored: no rendered edit with this id");
                return None;
            }
        };
        let edit = self.pending.take()?;

        let commit = EditCommit {
            request_id: edit.request_id,
            file_path: edit.file_path,
            range,
            old_string: edit.old_string,
            new_string: edit.new_string,
        };
        debug!(request_id, "pending edit accepted");
        self.notify(OverlayEvent::AcceptEdit(commit.clone()));
        self.clear_active(ClearReason::Accepted);
        Some(commit)
    }

    /// Reject the pending edit with `request_id`, rendered or not.
    pub fn reject(&mut self, request_id: &str) -> bool {
        if !self
            .pending
            .as_ref()
            .is_some_and(|edit| edit.request_id == request_id)
        {
            trace!(request_id, "reject ignored: no pending edit with this id");
            return false;
        }
        self.pending = None;
        debug!(request_id, "pending edit rejected");
        self.notify(OverlayEvent::RejectEdit {
            request_id: request_id.to_string(),
        });
        self.clear_active(ClearReason::Rejected);
        true
    }

    /// Drop the pending edit without an accept/reject signal.
    pub fn clear_edit(&mut self) -> bool {
        let had_pending = self.pending.take().is_some();
        self.clear_active(ClearReason::Cleared) || had_pending
    }

    /// Update the viewport width and re-estimate the preview block height.
    pub fn set_viewport_width(&mut self, viewport_width: usize) {
        self.viewport_width = viewport_width;
        if let Some(key) = self.edit_key() {
            self.recompute_block_height(&key, viewport_width);
        }
    }

    /// Re-estimate the preview block height for the render identified by `key`.
    ///
    /// Returns `false` without doing anything when `key` is stale.
    pub fn recompute_block_height(&mut self, key: &EditKey, viewport_width: usize) -> bool {
        let tab_width = self.config.tab_width;
        let Some(active) = self.active.as_mut().filter(|active| &active.key == key) else {
            trace!(request_id = %key.request_id, generation = key.generation, "stale resize ignored");
            return false;
        };
        self.viewport_width = viewport_width;

        let Some(block) = active.block.as_mut() else {
            return true;
        };
        let before = block.height;
        let height = block.relayout(viewport_width, tab_width);
        if height != before {
            let request_id = key.request_id.clone();
            self.mark_changed();
            self.notify(OverlayEvent::BlockResized { request_id, height });
        }
        true
    }

    /// Highlight the word at `target`, replacing any current highlight.
    ///
    /// The highlight expires `highlight_duration` after `now`.
    pub fn navigate(&mut self, target: NavigationTarget, document: &str, now: Instant) -> WordSpan {
        self.clear_highlight(false);

        let column = target.column.unwrap_or(1);
        let span = resolve_span(
            document,
            target.line,
            column,
            self.config.word_span_options(),
        );
        self.highlight = Some(span);
        self.highlight_clear
            .schedule(now, self.config.highlight_duration);
        self.mark_changed();

        debug!(
            line = span.range.start_line,
            start_column = span.range.start_column,
            end_column = span.range.end_column,
            kind = ?span.kind,
            "navigation highlight set"
        );
        self.notify(OverlayEvent::NavigationHighlighted {
            span,
            cursor: span.range.start(),
        });
        self.notify(OverlayEvent::Reveal(RevealRequest {
            range: span.range,
            align: self.reveal_align(),
        }));
        span
    }

    /// Expire the navigation highlight if its deadline has passed.
    ///
    /// Returns `true` if the highlight was removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.highlight_clear.fire_if_due(now) {
            return false;
        }
        if self.highlight.take().is_none() {
            return false;
        }
        debug!("navigation highlight expired");
        self.mark_changed();
        self.notify(OverlayEvent::ScrollComplete);
        true
    }

    fn context_changed(
        &mut self,
        doc: DocumentContext<'_>,
        reason: ClearReason,
    ) -> Option<EditOutcome> {
        self.clear_highlight(true);
        self.clear_active(reason);
        let edit = self.pending.clone()?;
        Some(self.evaluate(edit, doc))
    }

    fn evaluate(&mut self, edit: PendingEdit, doc: DocumentContext<'_>) -> EditOutcome {
        let same_file = doc
            .path
            .is_some_and(|path| paths_refer_to_same_file(&edit.file_path, path));
        if !same_file {
            debug!(
                request_id = %edit.request_id,
                edit_path = %edit.file_path,
                open_path = doc.path.unwrap_or("<none>"),
                "pending edit targets another file"
            );
            return self.unresolved(edit.request_id, UnresolvedReason::FileMismatch);
        }

        let Some(found) = locate_match(doc.text, &edit.old_string) else {
            debug!(request_id = %edit.request_id, "old text not found; edit is stale");
            return self.unresolved(edit.request_id, UnresolvedReason::NoMatch);
        };

        // Moving focus to the edit supersedes a pending navigation highlight.
        self.clear_highlight(true);

        self.generation += 1;
        let key = EditKey {
            request_id: edit.request_id.clone(),
            generation: self.generation,
        };
        let block = preview_lines(&edit.new_string).map(|lines| {
            ViewBlock::new(
                found.range.last_content_line(),
                lines,
                &self.config.addition_marker,
                self.viewport_width,
                self.config.tab_width,
            )
        });
        let range = found.range;
        self.active = Some(ActiveOverlay { key, range, block });
        self.mark_changed();

        debug!(
            request_id = %edit.request_id,
            start_line = range.start_line,
            end_line = range.end_line,
            kind = ?found.kind,
            "review overlay shown"
        );
        self.notify(OverlayEvent::EditShown {
            request_id: edit.request_id,
            range,
            kind: found.kind,
        });
        self.notify(OverlayEvent::Reveal(RevealRequest {
            range,
            align: self.reveal_align(),
        }));
        EditOutcome::Shown(range)
    }

    fn unresolved(&mut self, request_id: String, reason: UnresolvedReason) -> EditOutcome {
        self.notify(OverlayEvent::EditUnresolved { request_id, reason });
        EditOutcome::Unresolved(reason)
    }

    fn clear_active(&mut self, reason: ClearReason) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        debug!(request_id = %active.key.request_id, ?reason, "review overlay cleared");
        self.mark_changed();
        self.notify(OverlayEvent::EditCleared {
            request_id: active.key.request_id,
            reason,
        });
        true
    }

    /// Remove the navigation highlight early. `complete` reports the navigation as finished.
    fn clear_highlight(&mut self, complete: bool) -> bool {
        self.highlight_clear.cancel();
        if self.highlight.take().is_none() {
            return false;
        }
        self.mark_changed();
        if complete {
            self.notify(OverlayEvent::ScrollComplete);
        }
        true
    }

    fn reveal_align(&self) -> RevealAlign {
        if self.config.center_on_reveal {
            RevealAlign::Center
        } else {
            RevealAlign::Nearest
        }
    }

    fn mark_changed(&mut self) {
        self.version += 1;
    }

    fn notify(&mut self, event: OverlayEvent) {
        for callback in &mut self.callbacks {
            callback(&event);
        }
    }
}

/// Logical preview lines for `new_string`. Pure deletions have no preview.
fn preview_lines(new_string: &str) -> Option<Vec<String>> {
    if new_string.is_empty() {
        return None;
    }
    let body = new_string.strip_suffix('\n').unwrap_or(new_string);
    Some(
        body.split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect(),
    )
}
