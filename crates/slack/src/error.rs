//! Typed errors for the RTM transport.

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Web API answered `ok: false` (e.g. `invalid_auth`).
    #[error("slack api error: {error}")]
    Api { error: String },

    /// HTTP-level failure during the handshake.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// WebSocket failure on the live session.
    #[error(transparent)]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The peer closed the RTM session.
    #[error("rtm session closed by peer")]
    SessionClosed,

    /// A response or frame did not have the expected shape.
    #[error("malformed rtm payload: {message}")]
    Protocol { message: String },
}

impl Error {
    #[must_use]
    pub fn api(error: impl Into<String>) -> Self {
        Self::Api {
            error: error.into(),
        }
    }

    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}
