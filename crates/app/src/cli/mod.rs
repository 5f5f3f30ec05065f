//! Admin command line

use std::{sync::Arc, time::Duration};

use clap::{Args, Parser, Subcommand};
use relay_app::{
    auth::{PgTokensRepository, Salt, TokenManager},
    database::{self, PoolSettings},
};

mod legacy;
mod token;

#[derive(Debug, Parser)]
#[command(name = "relay-app", about = "Relay token administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Token(token::TokenCommand),
    Legacy(legacy::LegacyCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Token(command) => token::run(command).await,
            Commands::Legacy(command) => legacy::run(command).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct SaltArgs {
    /// Secret salt for legacy tokens
    #[arg(long, env = "SALT", hide_env_values = true)]
    salt: String,
}

impl SaltArgs {
    pub(crate) fn salt(&self) -> Salt {
        Salt::new(self.salt.as_str())
    }
}

#[derive(Debug, Args)]
pub(crate) struct StoreArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Timeout for each token store call, in milliseconds
    #[arg(long, env = "STORE_TIMEOUT_MS", default_value_t = 5000)]
    store_timeout_ms: u64,

    #[command(flatten)]
    salt: SaltArgs,
}

impl StoreArgs {
    pub(crate) async fn token_manager(&self) -> Result<TokenManager, String> {
        let timeout = Duration::from_millis(self.store_timeout_ms);

        let pool = database::connect(
            &self.database_url,
            &PoolSettings {
                acquire_timeout: timeout,
                ..PoolSettings::default()
            },
        )
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

        database::migrate(&pool)
            .await
            .map_err(|error| format!("failed to run migrations: {error}"))?;

        Ok(TokenManager::new(
            Arc::new(PgTokensRepository::new(pool, timeout)),
            self.salt.salt(),
        ))
    }
}
