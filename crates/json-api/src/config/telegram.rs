//! Telegram Config

use std::fmt;

use clap::Args;

/// Messaging platform settings.
#[derive(Args)]
pub struct TelegramSettings {
    /// Bot credential
    #[arg(long = "bot-token", env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Bot API base URL
    #[arg(
        long = "telegram-api-url",
        env = "TELEGRAM_API_URL",
        default_value = "https://api.telegram.org"
    )]
    pub api_url: String,

    /// Timeout for each outbound request, in milliseconds
    #[arg(long = "telegram-timeout-ms", env = "TELEGRAM_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Messages that may wait for delivery before new ones are refused
    #[arg(long, env = "DELIVERY_QUEUE_CAPACITY", default_value_t = 1_024)]
    pub delivery_queue_capacity: usize,

    /// Outbound requests allowed in flight at once
    #[arg(long, env = "DELIVERY_MAX_IN_FLIGHT", default_value_t = 16)]
    pub delivery_max_in_flight: usize,
}

impl fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &"**redacted**")
            .field("api_url", &self.api_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("delivery_queue_capacity", &self.delivery_queue_capacity)
            .field("delivery_max_in_flight", &self.delivery_max_in_flight)
            .finish()
    }
}
