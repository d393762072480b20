//! The plugin contract.

use {anyhow::Result, async_trait::async_trait, serde_json::Value};

use banter_common::{BotIdentity, Event, EventKind, OutboundMessage};

/// How the adapter treats a failing named handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Log the failure and keep dispatching. Production default.
    #[default]
    Contain,
    /// Surface the failure to the caller, stopping the run. Development aid.
    Propagate,
}

impl FailureMode {
    /// Mode selected by the `debug` config flag.
    pub fn from_debug(debug: bool) -> Self {
        if debug {
            Self::Propagate
        } else {
            Self::Contain
        }
    }
}

/// An independently-authored handler bundle dispatched by the runtime.
///
/// Only `name` and the subscription table are required; every other
/// capability defaults to a no-op. Plugins that produce replies embed a
/// [`banter_common::Outbox`] and hand it over through `drain_outputs`.
#[async_trait]
pub trait Plugin: Send {
    /// Name used for config lookup and logging.
    fn name(&self) -> &str;

    /// Event kinds routed to [`Plugin::on_event`].
    fn subscriptions(&self) -> &[EventKind];

    /// Receive this plugin's config block, before any dispatch.
    fn configure(&mut self, _config: Value) -> Result<()> {
        Ok(())
    }

    /// One-time initialization after the session is established.
    fn setup(&mut self, _bot: &BotIdentity) -> Result<()> {
        Ok(())
    }

    /// Handle an event whose kind is in [`Plugin::subscriptions`].
    async fn on_event(&mut self, _event: &Event) -> Result<()> {
        Ok(())
    }

    /// Observe every event regardless of kind.
    async fn catch_all(&mut self, _event: &Event) -> Result<()> {
        Ok(())
    }

    /// Hand over queued outbound messages, oldest first. Never redelivered.
    fn drain_outputs(&mut self) -> Vec<OutboundMessage> {
        Vec::new()
    }
}
