//! App Context

use std::{sync::Arc, time::Duration};

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgTokensRepository, Salt, TokenAuthService, TokenManager, TokensService},
    bot::{BotCommands, CommandService},
    database::{self, PoolSettings},
    delivery::{self, DeliveryError, DeliveryWorker, Dispatcher, TelegramClient, TelegramConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] MigrateError),

    #[error("failed to build telegram client")]
    Telegram(#[source] DeliveryError),
}

/// Everything needed to build an [`AppContext`].
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,

    /// Upper bound on each token store call and on waiting for a pooled connection.
    pub store_timeout: Duration,

    pub salt: Salt,
    pub telegram: TelegramConfig,
    pub delivery_queue_capacity: usize,

    /// Platform calls allowed in flight at once.
    pub delivery_max_in_flight: usize,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub tokens: Arc<dyn TokensService>,
    pub commands: Arc<dyn CommandService>,
    pub dispatcher: Dispatcher,
}

impl AppContext {
    /// Connect to the token store, apply migrations, and wire the services.
    ///
    /// The returned worker drains the delivery queue and must be spawned by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable, a migration fails, or the
    /// HTTP client for the messaging platform cannot be built.
    pub async fn from_config(config: AppConfig) -> Result<(Self, DeliveryWorker), AppInitError> {
        let pool = database::connect(
            &config.database_url,
            &PoolSettings {
                max_connections: config.max_connections,
                acquire_timeout: config.store_timeout,
            },
        )
        .await
        .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let telegram = TelegramClient::new(&config.telegram).map_err(AppInitError::Telegram)?;

        let repository = Arc::new(PgTokensRepository::new(pool, config.store_timeout));
        let tokens: Arc<dyn TokensService> =
            Arc::new(TokenManager::new(repository.clone(), config.salt.clone()));

        let (dispatcher, queue) = delivery::channel(config.delivery_queue_capacity);
        let worker = DeliveryWorker::new(queue, Arc::new(telegram))
            .with_max_in_flight(config.delivery_max_in_flight);

        let context = Self {
            auth: Arc::new(TokenAuthService::new(
                tokens.clone(),
                repository,
                config.salt,
            )),
            commands: Arc::new(BotCommands::new(tokens.clone(), dispatcher.clone())),
            tokens,
            dispatcher,
        };

        Ok((context, worker))
    }
}
