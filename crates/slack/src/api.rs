//! Slack Web API calls used to establish an RTM session.

use std::time::Duration;

use {
    secrecy::{ExposeSecret, Secret},
    serde::Deserialize,
    tracing::debug,
};

use banter_common::BotIdentity;

use crate::{
    directory::Channel,
    error::{Error, Result},
};

const API_BASE: &str = "https://slack.com/api";

/// Page size for `conversations.list`.
const CHANNEL_PAGE_LIMIT: u32 = 200;

// ── Response shapes ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RtmConnectResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "self")]
    pub bot: Option<RtmSelf>,
    #[serde(default)]
    pub team: Option<RtmTeam>,
}

#[derive(Debug, Deserialize)]
pub struct RtmSelf {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RtmTeam {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ConversationsListResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub channels: Vec<ChannelInfo>,
    #[serde(default)]
    pub response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

/// The useful parts of a successful `rtm.connect` call.
#[derive(Debug)]
pub struct Handshake {
    pub websocket_url: String,
    pub identity: BotIdentity,
}

impl RtmConnectResponse {
    /// Validate the response and extract the websocket URL and identity.
    pub fn into_handshake(self) -> Result<Handshake> {
        if !self.ok {
            return Err(Error::api(self.error.unwrap_or_else(|| "unknown".into())));
        }
        let websocket_url = self
            .url
            .ok_or_else(|| Error::protocol("rtm.connect response missing url"))?;
        let bot = self
            .bot
            .ok_or_else(|| Error::protocol("rtm.connect response missing self"))?;
        Ok(Handshake {
            websocket_url,
            identity: BotIdentity {
                user_id: bot.id,
                user_name: bot.name,
                team: self.team.map(|t| t.name).unwrap_or_default(),
            },
        })
    }
}

// ── Client ──────────────────────────────────────────────────────────────────

/// Thin Web API client; only the two calls the handshake needs.
pub struct ApiClient {
    http: reqwest::Client,
    token: Secret<String>,
    base: String,
}

impl ApiClient {
    pub fn new(token: Secret<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            token,
            base: API_BASE.to_string(),
        })
    }

    /// Start an RTM session, returning the websocket URL and bot identity.
    pub async fn rtm_connect(&self) -> Result<Handshake> {
        let response: RtmConnectResponse = self
            .http
            .post(format!("{}/rtm.connect", self.base))
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?
            .json()
            .await?;
        response.into_handshake()
    }

    /// Fetch the full channel directory, following cursor pagination.
    pub async fn list_channels(&self) -> Result<Vec<Channel>> {
        let mut channels = Vec::new();
        let mut cursor = String::new();

        loop {
            let mut request = self
                .http
                .get(format!("{}/conversations.list", self.base))
                .bearer_auth(self.token.expose_secret())
                .query(&[("limit", CHANNEL_PAGE_LIMIT.to_string())]);
            if !cursor.is_empty() {
                request = request.query(&[("cursor", cursor.as_str())]);
            }

            let page: ConversationsListResponse = request.send().await?.json().await?;
            if !page.ok {
                return Err(Error::api(page.error.unwrap_or_else(|| "unknown".into())));
            }

            debug!(count = page.channels.len(), "fetched channel page");
            channels.extend(page.channels.into_iter().map(|c| Channel {
                id: c.id,
                name: c.name,
            }));

            cursor = page
                .response_metadata
                .map(|m| m.next_cursor)
                .unwrap_or_default();
            if cursor.is_empty() {
                break;
            }
        }

        Ok(channels)
    }
}
