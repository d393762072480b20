//! Shared vocabulary types for the banter runtime.
//!
//! Everything the transport, the plugin layer, and the dispatcher exchange
//! lives here: inbound [`Event`]s, outbound messages, and the session
//! identity captured during the handshake.

pub mod types;

pub use types::{BotIdentity, Event, EventKind, Outbox, OutboundMessage};
