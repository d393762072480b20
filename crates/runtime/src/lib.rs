//! The dispatch runtime: the poll → route → flush → keep-alive loop.

pub mod dispatcher;
pub mod transport;

pub use {
    dispatcher::{Dispatcher, KEEP_ALIVE_INTERVAL, POLL_INTERVAL, SEND_SPACING},
    transport::Transport,
};
