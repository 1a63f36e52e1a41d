//! Telegram Bot API payloads and client.

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::coordinates::parse_coordinates;
use crate::error::{BotError, Result};
use crate::types::{ChatId, Command, Coordinates, InboundMessage};

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Webhook update envelope. Only `message` is used.
#[derive(Debug, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramMessage {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Location> for Coordinates {
    fn from(location: Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

impl TelegramMessage {
    /// Classify the message. `None` when it carries neither a location nor text.
    ///
    /// Precedence: `/start`, shared location, coordinates typed as text, other text.
    pub fn to_inbound(&self) -> Option<InboundMessage> {
        if let Some(text) = &self.text
            && let Ok(command) = text.parse::<Command>()
        {
            return Some(InboundMessage::Command(command));
        }

        if let Some(location) = self.location {
            return Some(InboundMessage::Location(location.into()));
        }

        let text = self.text.as_ref()?;
        Some(match parse_coordinates(text) {
            Some(coordinates) => InboundMessage::Location(coordinates),
            None => InboundMessage::Text(text.clone()),
        })
    }
}

/// Delivers replies to a chat.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the messaging provider rejects or never receives the message.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: ChatId,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SetWebhookRequest<'a> {
    url: &'a str,
}

pub struct TelegramClient {
    token: String,
    client: reqwest::Client,
}

impl TelegramClient {
    pub fn new(token: String) -> Self {
        Self {
            token,
            client: reqwest::Client::new(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{TELEGRAM_API_URL}/bot{}/{method}", self.token)
    }

    async fn call<T: Serialize + Sync>(&self, method: &str, body: &T) -> Result<()> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(BotError::TelegramApi { status, message });
        }

        Ok(())
    }

    /// Point Telegram at this process's webhook endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Telegram rejects the URL.
    pub async fn set_webhook(&self, url: &Url) -> Result<()> {
        debug!("Registering webhook {url}");
        self.call("setWebhook", &SetWebhookRequest { url: url.as_str() })
            .await?;
        info!("Webhook registered at {url}");
        Ok(())
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.call("sendMessage", &SendMessageRequest { chat_id, text })
            .await?;
        debug!("Sent message to chat {chat_id}");
        Ok(())
    }
}
