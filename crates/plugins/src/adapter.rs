//! Fault-isolation wrapper around a single plugin.

use {
    anyhow::{Context, Result},
    serde_json::Value,
    tracing::{info, warn},
};

use banter_common::{BotIdentity, Event, EventKind, OutboundMessage};

use crate::plugin::{FailureMode, Plugin};

/// Wraps exactly one plugin, guaranteeing that its failures never stop the
/// dispatch loop or affect sibling plugins.
pub struct PluginAdapter {
    plugin: Box<dyn Plugin>,
    name: String,
}

impl PluginAdapter {
    /// Wrap `plugin`: assign its config block (when present) and run its
    /// one-time setup. Errors here are construction errors — startup-fatal,
    /// not contained.
    pub fn new(
        mut plugin: Box<dyn Plugin>,
        config: Option<Value>,
        bot: &BotIdentity,
    ) -> Result<Self> {
        let name = plugin.name().to_string();
        if let Some(block) = config {
            info!(plugin = %name, "config block found");
            plugin
                .configure(block)
                .with_context(|| format!("configuring plugin {name}"))?;
        }
        plugin
            .setup(bot)
            .with_context(|| format!("setting up plugin {name}"))?;
        Ok(Self { plugin, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Route one typed event through the plugin.
    ///
    /// The named handler runs only when the plugin subscribes to `kind`.
    /// Under [`FailureMode::Contain`] its errors are logged and swallowed;
    /// under [`FailureMode::Propagate`] they return to the caller. The
    /// catch-all runs for every event and is contained in both modes.
    pub async fn dispatch(
        &mut self,
        kind: EventKind,
        event: &Event,
        mode: FailureMode,
    ) -> Result<()> {
        if self.plugin.subscriptions().contains(&kind) {
            if let Err(error) = self.plugin.on_event(event).await {
                match mode {
                    FailureMode::Propagate => {
                        return Err(error.context(format!(
                            "plugin {} failed handling {kind}",
                            self.name
                        )));
                    },
                    FailureMode::Contain => {
                        warn!(plugin = %self.name, event = %kind, error = %error, "plugin handler failed");
                    },
                }
            }
        }

        if let Err(error) = self.plugin.catch_all(event).await {
            warn!(plugin = %self.name, event = %kind, error = %error, "plugin catch-all failed");
        }

        Ok(())
    }

    /// Drain the plugin's queued outbound messages. Validity checks (known
    /// channel, non-empty text) are the flush step's job, not ours.
    pub fn drain_outputs(&mut self) -> Vec<OutboundMessage> {
        self.plugin.drain_outputs()
    }
}
