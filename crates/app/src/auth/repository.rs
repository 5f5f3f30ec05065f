//! Token store repository.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};
use tokio::time::timeout;

use crate::{
    auth::{TokenRecord, TokenStoreError},
    ids::UserId,
};

const UPSERT_TOKEN_SQL: &str = include_str!("sql/upsert_token.sql");
const FIND_TOKEN_BY_USER_SQL: &str = include_str!("sql/find_token_by_user.sql");
const FIND_USER_BY_TOKEN_SQL: &str = include_str!("sql/find_user_by_token.sql");

/// PostgreSQL-backed token store. Every call is bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct PgTokensRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgTokensRepository {
    #[must_use]
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, TokenStoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        timeout(self.timeout, operation)
            .await
            .map_err(|_elapsed| TokenStoreError::Timeout(self.timeout))?
            .map_err(TokenStoreError::from)
    }
}

impl<'r> FromRow<'r, PgRow> for TokenRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_id: UserId::new(row.try_get("user_id")?),
            token: row.try_get("token_hash")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

#[async_trait]
impl TokensRepository for PgTokensRepository {
    async fn upsert_token(
        &self,
        user: UserId,
        token: &str,
    ) -> Result<TokenRecord, TokenStoreError> {
        self.bounded(
            query_as::<Postgres, TokenRecord>(UPSERT_TOKEN_SQL)
                .bind(user.get())
                .bind(token)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn find_token_by_user(
        &self,
        user: UserId,
    ) -> Result<Option<TokenRecord>, TokenStoreError> {
        self.bounded(
            query_as::<Postgres, TokenRecord>(FIND_TOKEN_BY_USER_SQL)
                .bind(user.get())
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn find_user_by_token(&self, token: &str) -> Result<Option<UserId>, TokenStoreError> {
        self.bounded(
            query_scalar::<Postgres, i64>(FIND_USER_BY_TOKEN_SQL)
                .bind(token)
                .fetch_optional(&self.pool),
        )
        .await
        .map(|user| user.map(UserId::new))
    }
}

#[automock]
#[async_trait]
/// Durable mapping from user to their single active token.
pub trait TokensRepository: Send + Sync {
    /// Insert or replace the user's token in one statement, refreshing `created_at`.
    async fn upsert_token(&self, user: UserId, token: &str)
    -> Result<TokenRecord, TokenStoreError>;

    /// The user's active token, or `None` for a user that never had one.
    async fn find_token_by_user(&self, user: UserId)
    -> Result<Option<TokenRecord>, TokenStoreError>;

    /// The owner of `token`, or `None` when no user holds it.
    async fn find_user_by_token(&self, token: &str) -> Result<Option<UserId>, TokenStoreError>;
}
