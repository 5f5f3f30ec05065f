//! Server configuration module

use std::time::Duration;

use clap::Parser;

use relay_app::{auth::Salt, context::AppConfig, delivery::TelegramConfig};

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    telegram::TelegramSettings,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod telegram;

pub(crate) use observability::LogFormat;

/// Relay server configuration
#[derive(Debug, Parser)]
#[command(name = "relay-json", about = "Token-authenticated chat relay server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Token store settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Legacy token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Messaging platform settings.
    #[command(flatten)]
    pub telegram: TelegramSettings,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for building the application context.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database.database_url.clone(),
            max_connections: self.database.max_connections,
            store_timeout: Duration::from_millis(self.database.store_timeout_ms),
            salt: Salt::new(self.auth.salt.as_str()),
            telegram: TelegramConfig {
                api_url: self.telegram.api_url.clone(),
                bot_token: self.telegram.bot_token.clone(),
                timeout: Duration::from_millis(self.telegram.timeout_ms),
            },
            delivery_queue_capacity: self.telegram.delivery_queue_capacity,
            delivery_max_in_flight: self.telegram.delivery_max_in_flight,
        }
    }
}
