//! Token manager: issuance, rotation, and legacy migration.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    auth::{
        Salt, TokenManagerError, TokenRecord, TokenStoreError, TokensRepository,
        legacy::validate_legacy_token, token::generate_store_token,
    },
    ids::UserId,
};

/// How many fresh tokens to try before giving up on a uniqueness conflict.
pub const MAX_GENERATION_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct TokenManager {
    repository: Arc<dyn TokensRepository>,
    salt: Salt,
}

impl TokenManager {
    #[must_use]
    pub fn new(repository: Arc<dyn TokensRepository>, salt: Salt) -> Self {
        Self { repository, salt }
    }

    async fn store_fresh_token(&self, user: UserId) -> Result<TokenRecord, TokenManagerError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let token = generate_store_token()?;

            match self.repository.upsert_token(user, &token).await {
                Ok(record) => return Ok(record),
                Err(TokenStoreError::TokenCollision) => {
                    warn!(%user, attempt, "generated token collided with an existing token");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(TokenManagerError::Exhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}

#[async_trait]
impl TokensService for TokenManager {
    async fn issue_or_fetch(&self, user: UserId) -> Result<TokenRecord, TokenManagerError> {
        if let Some(existing) = self.repository.find_token_by_user(user).await? {
            return Ok(existing);
        }

        let record = self.store_fresh_token(user).await?;

        info!(%user, "issued token");

        Ok(record)
    }

    async fn revoke(&self, user: UserId) -> Result<TokenRecord, TokenManagerError> {
        let record = self.store_fresh_token(user).await?;

        info!(%user, "rotated token");

        Ok(record)
    }

    async fn migrate_legacy(&self, token: &str) -> Result<UserId, TokenManagerError> {
        let user = validate_legacy_token(token, &self.salt)?;

        self.repository.upsert_token(user, token).await?;

        info!(%user, "migrated legacy token into the store");

        Ok(user)
    }

    async fn find_token(&self, user: UserId) -> Result<Option<TokenRecord>, TokenManagerError> {
        self.repository
            .find_token_by_user(user)
            .await
            .map_err(TokenManagerError::from)
    }
}

#[automock]
#[async_trait]
/// Token lifecycle operations.
pub trait TokensService: Send + Sync {
    /// Return the user's active token, issuing one if they have none. Never rotates.
    async fn issue_or_fetch(&self, user: UserId) -> Result<TokenRecord, TokenManagerError>;

    /// Replace the user's token with a fresh one. The previous token stops working.
    async fn revoke(&self, user: UserId) -> Result<TokenRecord, TokenManagerError>;

    /// Promote a valid legacy token into the store as the user's active token.
    async fn migrate_legacy(&self, token: &str) -> Result<UserId, TokenManagerError>;

    /// The user's active token without issuing one.
    async fn find_token(&self, user: UserId) -> Result<Option<TokenRecord>, TokenManagerError>;
}
