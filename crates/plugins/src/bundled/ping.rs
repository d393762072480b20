//! `ping`: answers "ping" with "pong" in the same channel.

use {anyhow::Result, async_trait::async_trait};

use banter_common::{Event, EventKind, Outbox, OutboundMessage};

use crate::plugin::Plugin;

#[derive(Default)]
pub struct PingPlugin {
    outbox: Outbox,
}

impl PingPlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Plugin for PingPlugin {
    fn name(&self) -> &str {
        "ping"
    }

    fn subscriptions(&self) -> &[EventKind] {
        &[EventKind::Message]
    }

    async fn on_event(&mut self, event: &Event) -> Result<()> {
        if let (Some(text), Some(channel)) = (event.text(), event.channel())
            && text.trim().eq_ignore_ascii_case("ping")
        {
            self.outbox.send(channel, "pong");
        }
        Ok(())
    }

    fn drain_outputs(&mut self) -> Vec<OutboundMessage> {
        self.outbox.drain()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn answers_ping_with_pong() {
        let mut plugin = PingPlugin::new();
        let event = Event::new(json!({"type": "message", "text": "ping", "channel": "C1"}));
        plugin.on_event(&event).await.unwrap();
        assert_eq!(plugin.drain_outputs(), vec![OutboundMessage::new("C1", "pong")]);
    }

    #[tokio::test]
    async fn trims_and_ignores_case() {
        let mut plugin = PingPlugin::new();
        let event = Event::new(json!({"type": "message", "text": "  PING ", "channel": "C1"}));
        plugin.on_event(&event).await.unwrap();
        assert_eq!(plugin.drain_outputs().len(), 1);
    }

    #[tokio::test]
    async fn ignores_other_text_and_missing_fields() {
        let mut plugin = PingPlugin::new();
        plugin
            .on_event(&Event::new(json!({"type": "message", "text": "hello", "channel": "C1"})))
            .await
            .unwrap();
        plugin
            .on_event(&Event::new(json!({"type": "message", "text": "ping"})))
            .await
            .unwrap();
        assert!(plugin.drain_outputs().is_empty());
    }
}
