//! Telegram Bot API notifier

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::notify::Notifier;

/// Telegram Bot API base URL
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Configuration for the Telegram notifier
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope of every Bot API reply
#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to a single chat
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: String,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String, config: TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BotError::NotifyFailure {
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            bot_token,
            chat_id,
            config,
        })
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        // reqwest errors embed the URL, which contains the bot token
        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::NotifyFailure {
                reason: e.without_url().to_string(),
            })?;

        let status = response.status();
        let reply: Option<ApiReply> = response.json().await.ok();

        match reply {
            Some(ApiReply { ok: true, .. }) if status.is_success() => {
                tracing::info!("Message delivered to chat {}", self.chat_id);
                Ok(())
            }
            Some(ApiReply { description, .. }) => Err(BotError::NotifyFailure {
                reason: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    description.unwrap_or_else(|| "no description".to_string())
                ),
            }),
            None => Err(BotError::NotifyFailure {
                reason: format!("HTTP {}: unreadable reply", status.as_u16()),
            }),
        }
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_base", &self.config.api_base)
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
