//! The seam between the dispatcher and the messaging service.

use {anyhow::Result, async_trait::async_trait};

use {
    banter_common::{BotIdentity, Event},
    banter_slack::RtmSession,
};

/// Long-lived connection to the messaging service.
///
/// [`banter_slack::RtmSession`] is the production implementation; tests
/// drive the dispatcher with scripted fakes.
#[async_trait]
pub trait Transport: Send {
    /// Identity of the connected bot user.
    fn identity(&self) -> &BotIdentity;

    /// Drain every event delivered since the last call. Returns an empty
    /// batch when nothing is pending and never blocks waiting for more;
    /// an error means the session is gone.
    async fn read_events(&mut self) -> Result<Vec<Event>>;

    /// Resolve a channel id, `#name`, or bare name to a channel id.
    fn resolve_channel(&self, destination: &str) -> Option<String>;

    /// Send `text` to a resolved channel id. Best effort.
    async fn send_message(&mut self, channel_id: &str, text: &str) -> Result<()>;

    /// Send a keep-alive frame.
    async fn send_keep_alive(&mut self) -> Result<()>;
}

#[async_trait]
impl Transport for RtmSession {
    fn identity(&self) -> &BotIdentity {
        RtmSession::identity(self)
    }

    async fn read_events(&mut self) -> Result<Vec<Event>> {
        Ok(RtmSession::read_events(self).await?)
    }

    fn resolve_channel(&self, destination: &str) -> Option<String> {
        self.channels().resolve(destination).map(|c| c.id.clone())
    }

    async fn send_message(&mut self, channel_id: &str, text: &str) -> Result<()> {
        Ok(RtmSession::send_message(self, channel_id, text).await?)
    }

    async fn send_keep_alive(&mut self) -> Result<()> {
        Ok(self.send_ping().await?)
    }
}
