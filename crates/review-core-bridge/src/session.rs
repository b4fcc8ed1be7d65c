//! One review session per document view.
//!
//! [`ReviewSession`] keeps the host-owned document context (open path and text) next to an
//! [`OverlayController`], applies inbound messages in order, and returns the outbound messages each
//! one produced.

use crate::encode::{event_to_value, snapshot_to_value};
use crate::error::BridgeError;
use crate::messages::InboundMessage;
use review_core::{
    DocumentContext, NavigationTarget, OverlayConfig, OverlayController, OverlayEvent, PendingEdit,
};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{trace, warn};

/// A controller plus the document context it resolves against.
pub struct ReviewSession {
    controller: OverlayController,
    path: Option<String>,
    text: String,
    outbox: Arc<Mutex<Vec<OverlayEvent>>>,
}

impl ReviewSession {
    /// Create a session with no open document.
    pub fn new(config: OverlayConfig, viewport_width: usize) -> Self {
        let mut controller = OverlayController::new(config, viewport_width);
        let outbox = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&outbox);
        controller.subscribe(move |event| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        });
        Self {
            controller,
            path: None,
            text: String::new(),
            outbox,
        }
    }

    /// The underlying controller.
    pub fn controller(&self) -> &OverlayController {
        &self.controller
    }

    /// Path of the open document.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Text of the open document.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Apply one inbound message and return the outbound messages it produced.
    pub fn handle(&mut self, message: InboundMessage, now: Instant) -> Vec<Value> {
        match message {
            InboundMessage::OpenDocument { path, text } => {
                self.path = path;
                self.text = text;
                self.controller.file_changed(DocumentContext::new(
                    self.path.as_deref(),
                    &self.text,
                ));
            }
            InboundMessage::DocumentChanged { text } => {
                if text == self.text {
                    trace!("document change without new text ignored");
                } else {
                    self.text = text;
                    self.controller.document_changed(DocumentContext::new(
                        self.path.as_deref(),
                        &self.text,
                    ));
                }
            }
            InboundMessage::PendingEdit {
                request_id,
                file_path,
                old_string,
                new_string,
            } => {
                let edit = PendingEdit::new(request_id, file_path, old_string, new_string);
                self.controller.show_edit(
                    edit,
                    DocumentContext::new(self.path.as_deref(), &self.text),
                );
            }
            InboundMessage::ClearPendingEdit => {
                self.controller.clear_edit();
            }
            InboundMessage::Accept { request_id } => {
                self.controller.accept(&request_id);
            }
            InboundMessage::Reject { request_id } => {
                self.controller.reject(&request_id);
            }
            InboundMessage::Navigate { line, column } => {
                self.controller
                    .navigate(NavigationTarget::new(line, column), &self.text, now);
            }
            InboundMessage::ViewportResized { width } => {
                self.controller.set_viewport_width(width);
            }
            InboundMessage::Tick => {
                self.controller.tick(now);
            }
        }
        self.drain()
    }

    /// Decode and apply one JSON message.
    pub fn handle_json(&mut self, raw: &str, now: Instant) -> Result<Vec<Value>, BridgeError> {
        let message: InboundMessage = serde_json::from_str(raw).inspect_err(|err| {
            warn!(error = %err, "failed to decode inbound message");
        })?;
        Ok(self.handle(message, now))
    }

    /// Everything the host should currently draw.
    pub fn snapshot(&self) -> Value {
        snapshot_to_value(&self.controller)
    }

    fn drain(&self) -> Vec<Value> {
        let events = std::mem::take(
            &mut *self
                .outbox
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        events.iter().map(event_to_value).collect()
    }
}
