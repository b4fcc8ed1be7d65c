#![warn(missing_docs)]
//! `review-core-bridge` - JSON message layer for `review-core`.
//!
//! Edit sources and navigation providers usually talk to the editor over some JSON channel. This
//! crate decodes their message shapes (pending edits, navigation targets, accept/reject actions,
//! document and viewport updates), drives one [`review_core::OverlayController`] per view through
//! a [`ReviewSession`], and encodes what comes back (signals and decoration snapshots) as JSON
//! values. Message framing is left to the transport.

pub mod config;
pub mod encode;
pub mod error;
pub mod messages;
pub mod session;

pub use config::{OverlayConfigFile, parse_config};
pub use encode::{event_to_value, range_to_value, snapshot_to_value};
pub use error::BridgeError;
pub use messages::InboundMessage;
pub use session::ReviewSession;
