//! The live RTM websocket session.

use {
    futures::{FutureExt, SinkExt, StreamExt},
    secrecy::Secret,
    serde_json::{Value, json},
    tokio::net::TcpStream,
    tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message},
    tracing::{debug, info},
};

use banter_common::{BotIdentity, Event};

use crate::{
    api::ApiClient,
    directory::ChannelDirectory,
    error::{Error, Result},
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// An established RTM session.
///
/// Holds the websocket, the bot identity from the handshake, and the channel
/// directory snapshot. There is no reconnect: once the session drops, every
/// operation fails and the caller is expected to exit.
pub struct RtmSession {
    stream: WsStream,
    identity: BotIdentity,
    channels: ChannelDirectory,
    next_id: u64,
}

impl RtmSession {
    /// Perform the full handshake: `rtm.connect`, open the websocket, and
    /// snapshot the channel directory. Any failure here is startup-fatal.
    pub async fn connect(token: &Secret<String>) -> Result<Self> {
        let api = ApiClient::new(token.clone())?;
        let handshake = api.rtm_connect().await?;
        let channels = ChannelDirectory::new(api.list_channels().await?);
        let (stream, _) = connect_async(handshake.websocket_url.as_str()).await?;

        info!(
            bot = %handshake.identity.user_name,
            team = %handshake.identity.team,
            channels = channels.len(),
            "rtm session established"
        );

        Ok(Self {
            stream,
            identity: handshake.identity,
            channels,
            next_id: 1,
        })
    }

    pub fn identity(&self) -> &BotIdentity {
        &self.identity
    }

    pub fn channels(&self) -> &ChannelDirectory {
        &self.channels
    }

    /// Drain every frame currently buffered on the socket without waiting
    /// for more. Returns an empty batch when nothing is pending; a closed
    /// socket is an error.
    pub async fn read_events(&mut self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        while let Some(next) = self.stream.next().now_or_never() {
            match next {
                Some(Ok(frame)) => {
                    if let Some(event) = decode_frame(&frame) {
                        events.push(event);
                    }
                },
                Some(Err(e)) => return Err(e.into()),
                None => return Err(Error::SessionClosed),
            }
        }
        Ok(events)
    }

    /// Send `text` to a channel id over the RTM socket.
    pub async fn send_message(&mut self, channel_id: &str, text: &str) -> Result<()> {
        let frame = message_frame(self.bump_id(), channel_id, text);
        debug!(channel = %channel_id, "sending rtm message");
        self.stream.send(Message::text(frame)).await?;
        Ok(())
    }

    /// Send an RTM-level ping; Slack answers with a `pong` event.
    pub async fn send_ping(&mut self) -> Result<()> {
        let frame = ping_frame(self.bump_id());
        self.stream.send(Message::text(frame)).await?;
        Ok(())
    }

    fn bump_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Decode one websocket frame into an [`Event`].
///
/// Only JSON-object text frames become events; everything else (binary,
/// control frames, malformed text) is skipped.
fn decode_frame(frame: &Message) -> Option<Event> {
    let Message::Text(raw) = frame else {
        return None;
    };
    match serde_json::from_str::<Value>(raw.as_str()) {
        Ok(value) if value.is_object() => Some(Event::new(value)),
        _ => {
            debug!("skipping non-object rtm frame");
            None
        },
    }
}

fn message_frame(id: u64, channel_id: &str, text: &str) -> String {
    json!({
        "id": id,
        "type": "message",
        "channel": channel_id,
        "text": text,
    })
    .to_string()
}

fn ping_frame(id: u64) -> String {
    json!({"id": id, "type": "ping"}).to_string()
}
