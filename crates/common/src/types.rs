//! Event and message types shared across the workspace.

use std::{collections::VecDeque, fmt};

use serde_json::Value;

// ── EventKind ───────────────────────────────────────────────────────────────

/// Kinds of RTM events the dispatcher can route to plugin handlers.
///
/// Event types without a dedicated variant map to [`EventKind::Unknown`];
/// plugins still observe them through their catch-all handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Hello,
    Message,
    ChannelCreated,
    ChannelJoined,
    ChannelLeft,
    ChannelRename,
    GroupJoined,
    ImCreated,
    PresenceChange,
    ReactionAdded,
    ReactionRemoved,
    StarAdded,
    StarRemoved,
    TeamJoin,
    UserChange,
    UserTyping,
    Pong,
    Goodbye,
    Unknown,
}

impl EventKind {
    /// Decode a wire-level `type` string.
    pub fn from_type(name: &str) -> Self {
        match name {
            "hello" => Self::Hello,
            "message" => Self::Message,
            "channel_created" => Self::ChannelCreated,
            "channel_joined" => Self::ChannelJoined,
            "channel_left" => Self::ChannelLeft,
            "channel_rename" => Self::ChannelRename,
            "group_joined" => Self::GroupJoined,
            "im_created" => Self::ImCreated,
            "presence_change" => Self::PresenceChange,
            "reaction_added" => Self::ReactionAdded,
            "reaction_removed" => Self::ReactionRemoved,
            "star_added" => Self::StarAdded,
            "star_removed" => Self::StarRemoved,
            "team_join" => Self::TeamJoin,
            "user_change" => Self::UserChange,
            "user_typing" => Self::UserTyping,
            "pong" => Self::Pong,
            "goodbye" => Self::Goodbye,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::Message => "message",
            Self::ChannelCreated => "channel_created",
            Self::ChannelJoined => "channel_joined",
            Self::ChannelLeft => "channel_left",
            Self::ChannelRename => "channel_rename",
            Self::GroupJoined => "group_joined",
            Self::ImCreated => "im_created",
            Self::PresenceChange => "presence_change",
            Self::ReactionAdded => "reaction_added",
            Self::ReactionRemoved => "reaction_removed",
            Self::StarAdded => "star_added",
            Self::StarRemoved => "star_removed",
            Self::TeamJoin => "team_join",
            Self::UserChange => "user_change",
            Self::UserTyping => "user_typing",
            Self::Pong => "pong",
            Self::Goodbye => "goodbye",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Event ───────────────────────────────────────────────────────────────────

/// One inbound occurrence delivered by the transport.
///
/// The raw JSON payload is kept whole; `kind` is decoded from the frame's
/// `type` field and is `None` when the frame carries no type at all (such
/// frames are never routed to handlers).
#[derive(Debug, Clone)]
pub struct Event {
    kind: Option<EventKind>,
    payload: Value,
}

impl Event {
    pub fn new(payload: Value) -> Self {
        let kind = payload
            .get("type")
            .and_then(Value::as_str)
            .map(EventKind::from_type);
        Self { kind, payload }
    }

    pub fn kind(&self) -> Option<EventKind> {
        self.kind
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// A top-level string field of the payload, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.payload.get(name).and_then(Value::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.field("text")
    }

    pub fn channel(&self) -> Option<&str> {
        self.field("channel")
    }

    pub fn user(&self) -> Option<&str> {
        self.field("user")
    }
}

// ── Outbound messages ───────────────────────────────────────────────────────

/// A message queued by a plugin for delivery to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Destination: a channel id (`C024BE91L`), `#name`, or bare name.
    pub channel: String,
    pub text: String,
}

impl OutboundMessage {
    pub fn new(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
        }
    }
}

/// FIFO buffer of pending outbound messages, owned by a plugin.
///
/// Plugins push replies as they handle events; the dispatcher drains the
/// buffer once per poll cycle. Drained messages are never requeued.
#[derive(Debug, Default)]
pub struct Outbox {
    queue: VecDeque<OutboundMessage>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `text` for `channel`.
    pub fn send(&mut self, channel: impl Into<String>, text: impl Into<String>) {
        self.queue.push_back(OutboundMessage::new(channel, text));
    }

    pub fn push(&mut self, message: OutboundMessage) {
        self.queue.push_back(message);
    }

    /// Hand over all queued messages, oldest first, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<OutboundMessage> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// ── BotIdentity ─────────────────────────────────────────────────────────────

/// Identity of the connected bot user, captured during the handshake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotIdentity {
    pub user_id: String,
    pub user_name: String,
    pub team: String,
}
