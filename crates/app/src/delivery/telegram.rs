//! Telegram Bot API client.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::delivery::{DeliveryError, MessageSender, OutboundMessage};

/// Formatting mode for every outbound message.
const PARSE_MODE: &str = "Markdown";

/// Configuration for reaching the Bot API.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot API base URL, e.g. `"https://api.telegram.org"`.
    pub api_url: String,

    /// Bot credential issued by the platform.
    pub bot_token: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_url", &self.api_url)
            .field("bot_token", &"**redacted**")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP client for `sendMessage`.
#[derive(Clone)]
pub struct TelegramClient {
    send_message_url: String,
    http: Client,
}

impl TelegramClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &TelegramConfig) -> Result<Self, DeliveryError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            send_message_url: send_message_url(&config.api_url, &config.bot_token),
            http,
        })
    }
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient").finish_non_exhaustive()
    }
}

fn send_message_url(api_url: &str, bot_token: &str) -> String {
    format!("{}/bot{bot_token}/sendMessage", api_url.trim_end_matches('/'))
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
}

impl<'a> From<&'a OutboundMessage> for SendMessageRequest<'a> {
    fn from(message: &'a OutboundMessage) -> Self {
        Self {
            chat_id: message.chat_id.get(),
            text: &message.text,
            parse_mode: PARSE_MODE,
        }
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_message(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        let response = self
            .http
            .post(&self.send_message_url)
            .json(&SendMessageRequest::from(message))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            return Err(DeliveryError::Rejected { status, body });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::ids::ChatId;

    use super::*;

    fn config() -> TelegramConfig {
        TelegramConfig {
            api_url: "https://api.telegram.org/".to_string(),
            bot_token: "123:secret".to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn send_message_url_embeds_the_bot_token() {
        assert_eq!(
            send_message_url("https://api.telegram.org/", "123:secret"),
            "https://api.telegram.org/bot123:secret/sendMessage"
        );
    }

    #[test]
    fn debug_output_never_contains_the_bot_token() -> TestResult {
        let config = config();
        let client = TelegramClient::new(&config)?;

        assert!(!format!("{config:?}").contains("secret"));
        assert!(!format!("{client:?}").contains("secret"));

        Ok(())
    }

    #[test]
    fn request_body_uses_markdown() -> TestResult {
        let message = OutboundMessage::new(ChatId::new(-100), "*hi*");
        let body = serde_json::to_value(SendMessageRequest::from(&message))?;

        assert_eq!(
            body,
            json!({ "chat_id": -100, "text": "*hi*", "parse_mode": "Markdown" })
        );

        Ok(())
    }
}
