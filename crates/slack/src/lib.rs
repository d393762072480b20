//! Slack RTM transport.
//!
//! [`RtmSession::connect`] performs the `rtm.connect` handshake over HTTP,
//! opens the returned websocket URL, and snapshots the channel directory.
//! The live session then exposes a non-blocking event drain, paced message
//! sends, and keep-alive pings — the full transport surface the dispatcher
//! consumes.

pub mod api;
pub mod directory;
pub mod error;
pub mod session;

pub use {
    directory::{Channel, ChannelDirectory},
    error::{Error, Result},
    session::RtmSession,
};
