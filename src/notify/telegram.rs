use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::MessageSink;
use crate::error::{BotError, Result};

/// Telegram Bot API `sendMessage` for a single chat.
#[derive(Clone)]
pub struct TelegramSink {
    url: String,
    chat_id: String,
    client: Client,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramSink {
    pub fn new(api_base: &str, bot_token: &str, chat_id: impl Into<String>) -> Self {
        Self {
            url: format!("{}/bot{bot_token}/sendMessage", api_base.trim_end_matches('/')),
            chat_id: chat_id.into(),
            client: Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if let Ok(client) = Client::builder().timeout(timeout).build() {
            self.client = client;
        }
        self
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

#[async_trait::async_trait]
impl MessageSink for TelegramSink {
    async fn send(&self, text: &str) -> Result<()> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        // Never format the request error with the URL: it embeds the bot token.
        let rsp = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| BotError::Delivery(format!("request failed: {}", e.without_url())))?;

        let status = rsp.status();
        let reply: Option<BotApiReply> = rsp.json().await.ok();

        match reply {
            Some(BotApiReply { ok: true, .. }) if status.is_success() => Ok(()),
            Some(BotApiReply { description, .. }) => Err(BotError::Delivery(format!(
                "HTTP {}: {}",
                status.as_u16(),
                description.unwrap_or_else(|| "not confirmed".to_string())
            ))),
            None => Err(BotError::Delivery(format!(
                "HTTP {}: unreadable reply",
                status.as_u16()
            ))),
        }
    }
}
