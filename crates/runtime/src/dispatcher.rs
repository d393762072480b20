//! The dispatcher: owns the transport and the ordered plugin adapters.

use std::time::Duration;

use {
    anyhow::{Context, Result},
    tokio::time::{Instant, sleep},
    tracing::{debug, info, warn},
};

use {
    banter_common::Event,
    banter_config::BanterConfig,
    banter_plugins::{FailureMode, Plugin, PluginAdapter},
    banter_slack::RtmSession,
};

use crate::transport::Transport;

/// Delay between poll cycles. Bounds CPU usage and event latency at once;
/// the loop is a busy-poll with a sleep, not an edge-triggered read.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Forced gap between consecutive sends within one flush burst.
pub const SEND_SPACING: Duration = Duration::from_millis(100);

/// Keep-alive cadence.
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(3);

/// Drives the event loop: read pending events, broadcast them to every
/// plugin in registration order, flush plugin outputs under pacing, and
/// keep the session alive.
pub struct Dispatcher<T> {
    transport: T,
    adapters: Vec<PluginAdapter>,
    failure_mode: FailureMode,
    last_ping: Option<Instant>,
}

impl Dispatcher<RtmSession> {
    /// Establish the RTM session from `config`.
    ///
    /// Bad credentials or an unreachable service fail here, before the loop
    /// ever starts; there is no retry.
    pub async fn connect(config: &BanterConfig) -> Result<Self> {
        config.ensure_token()?;
        let session = RtmSession::connect(&config.slack_token)
            .await
            .context("establishing rtm session")?;
        Ok(Self::new(session, FailureMode::from_debug(config.debug)))
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, failure_mode: FailureMode) -> Self {
        Self {
            transport,
            adapters: Vec::new(),
            failure_mode,
            last_ping: None,
        }
    }

    /// Wrap and append a plugin; dispatch order is registration order.
    /// Registration happens once at startup, never at runtime.
    pub fn register(
        &mut self,
        plugin: Box<dyn Plugin>,
        config: Option<serde_json::Value>,
    ) -> Result<()> {
        let adapter = PluginAdapter::new(plugin, config, self.transport.identity())?;
        info!(plugin = %adapter.name(), "plugin registered");
        self.adapters.push(adapter);
        Ok(())
    }

    /// Drive the loop until the transport fails. There is no normal exit;
    /// the process leaves this via an interrupt or an error.
    pub async fn run(&mut self) -> Result<()> {
        info!(plugins = self.adapters.len(), "dispatcher running");
        loop {
            self.poll_once().await?;
            sleep(POLL_INTERVAL).await;
        }
    }

    /// One poll cycle: read → route → flush → keep-alive. Public so hosts
    /// and tests can drive the loop at their own cadence.
    pub async fn poll_once(&mut self) -> Result<()> {
        let events = self
            .transport
            .read_events()
            .await
            .context("reading events")?;
        for event in &events {
            self.route(event).await?;
        }
        self.flush_outputs().await;
        self.maybe_ping().await?;
        Ok(())
    }

    /// Broadcast one event to every adapter in registration order. Events
    /// without a type are a valid "nothing to route" signal, not an error.
    async fn route(&mut self, event: &Event) -> Result<()> {
        let Some(kind) = event.kind() else {
            return Ok(());
        };
        debug!(event = %kind, "routing event");
        for adapter in &mut self.adapters {
            adapter.dispatch(kind, event, self.failure_mode).await?;
        }
        Ok(())
    }

    /// Drain every adapter's queued outputs and send them, pacing
    /// consecutive sends within an adapter's burst. Messages with blank
    /// text or an unknown destination are dropped silently — not retried.
    async fn flush_outputs(&mut self) {
        for adapter in &mut self.adapters {
            let mut pace = false;
            for message in adapter.drain_outputs() {
                if message.text.trim().is_empty() {
                    debug!(plugin = %adapter.name(), "dropping blank outbound message");
                    continue;
                }
                let Some(channel_id) = self.transport.resolve_channel(&message.channel) else {
                    debug!(
                        plugin = %adapter.name(),
                        channel = %message.channel,
                        "dropping message for unknown channel"
                    );
                    continue;
                };
                if pace {
                    sleep(SEND_SPACING).await;
                }
                if let Err(error) = self.transport.send_message(&channel_id, &message.text).await {
                    warn!(channel = %channel_id, error = %error, "send failed");
                }
                pace = true;
            }
        }
    }

    /// Send a keep-alive when none has been sent yet or the interval has
    /// elapsed. This is the sole liveness signal on the session.
    async fn maybe_ping(&mut self) -> Result<()> {
        let due = self
            .last_ping
            .is_none_or(|at| at.elapsed() >= KEEP_ALIVE_INTERVAL);
        if due {
            self.transport
                .send_keep_alive()
                .await
                .context("sending keep-alive")?;
            self.last_ping = Some(Instant::now());
        }
        Ok(())
    }
}
