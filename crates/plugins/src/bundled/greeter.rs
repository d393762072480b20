//! `greeter`: welcomes new team members in a configured channel.

use {
    anyhow::Result,
    async_trait::async_trait,
    serde::Deserialize,
    serde_json::Value,
};

use banter_common::{Event, EventKind, Outbox, OutboundMessage};

use crate::plugin::Plugin;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct GreeterConfig {
    /// Channel the greeting is posted to.
    channel: String,
    /// Greeting template; `{user}` expands to the new member's name.
    greeting: String,
}

impl Default for GreeterConfig {
    fn default() -> Self {
        Self {
            channel: "#general".to_string(),
            greeting: "Welcome to the team, {user}!".to_string(),
        }
    }
}

#[derive(Default)]
pub struct GreeterPlugin {
    config: GreeterConfig,
    outbox: Outbox,
}

impl GreeterPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    fn joined_user(event: &Event) -> &str {
        event
            .payload()
            .get("user")
            .and_then(|user| user.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("there")
    }
}

#[async_trait]
impl Plugin for GreeterPlugin {
    fn name(&self) -> &str {
        "greeter"
    }

    fn subscriptions(&self) -> &[EventKind] {
        &[EventKind::TeamJoin]
    }

    fn configure(&mut self, config: Value) -> Result<()> {
        self.config = serde_json::from_value(config)?;
        Ok(())
    }

    async fn on_event(&mut self, event: &Event) -> Result<()> {
        let user = Self::joined_user(event);
        let greeting = self.config.greeting.replace("{user}", user);
        self.outbox.send(self.config.channel.clone(), greeting);
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

    fn team_join(name: &str) -> Event {
        Event::new(json!({"type": "team_join", "user": {"id": "U1", "name": name}}))
    }

    #[tokio::test]
    async fn greets_with_defaults() {
        let mut plugin = GreeterPlugin::new();
        plugin.on_event(&team_join("ada")).await.unwrap();
        assert_eq!(plugin.drain_outputs(), vec![OutboundMessage::new(
            "#general",
            "Welcome to the team, ada!"
        )]);
    }

    #[tokio::test]
    async fn configured_channel_and_template() {
        let mut plugin = GreeterPlugin::new();
        plugin
            .configure(json!({"channel": "#intros", "greeting": "hi {user}"}))
            .unwrap();
        plugin.on_event(&team_join("grace")).await.unwrap();
        assert_eq!(plugin.drain_outputs(), vec![OutboundMessage::new("#intros", "hi grace")]);
    }

    #[tokio::test]
    async fn falls_back_when_user_name_is_missing() {
        let mut plugin = GreeterPlugin::new();
        plugin
            .on_event(&Event::new(json!({"type": "team_join"})))
            .await
            .unwrap();
        let outputs = plugin.drain_outputs();
        assert_eq!(outputs[0].text, "Welcome to the team, there!");
    }

    #[test]
    fn rejects_malformed_config() {
        let mut plugin = GreeterPlugin::new();
        assert!(plugin.configure(json!({"channel": 42})).is_err());
    }
}
