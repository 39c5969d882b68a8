use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::Messenger;
use crate::config::{BotSettings, BotToken};
use crate::{Error, Result};

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram Bot API client. Messages are sent with HTML parse mode.
pub struct TelegramClient {
    client: Client,
    api_base_url: String,
    token: BotToken,
}

impl TelegramClient {
    pub fn new(client: Client, api_base_url: impl Into<String>, token: BotToken) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into(),
            token,
        }
    }

    pub fn from_settings(client: Client, settings: &BotSettings) -> Self {
        Self::new(client, settings.api_base_url.clone(), settings.token.clone())
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.token.expose(),
            method
        )
    }

    /// Send an HTML formatted text message
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };

        // reqwest errors carry the request URL, which embeds the token
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Telegram(format!("HTTP {} for chat {}: {}", status, chat_id, error_text)));
        }

        let reply: TelegramResponse = response
            .json()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        if !reply.ok {
            return Err(Error::Telegram(
                reply.description.unwrap_or_else(|| "Unknown Telegram API error".to_string()),
            ));
        }

        tracing::debug!("Sent message to chat {}", chat_id);
        Ok(())
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send(&self, chat_id: i64, text: &str) -> Result<()> {
        self.send_message(chat_id, text).await
    }
}
