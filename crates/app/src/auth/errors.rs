//! Token store, manager, and gateway errors.

use std::{num::ParseIntError, time::Duration};

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Legacy token validation failures.
#[derive(Debug, Error)]
pub enum LegacyTokenError {
    #[error("legacy token format is invalid")]
    InvalidFormat,

    #[error("legacy token user id is invalid")]
    InvalidUserId(#[from] ParseIntError),

    #[error("legacy token does not match its user id")]
    Mismatch,
}

/// Token store failures. Absence is not an error.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token is already assigned to another user")]
    TokenCollision,

    #[error("token store did not respond within {0:?}")]
    Timeout(Duration),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TokenStoreError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::TokenCollision,
            Some(_) | None => Self::Sql(error),
        }
    }
}

/// Token issuance, rotation, and migration failures.
#[derive(Debug, Error)]
pub enum TokenManagerError {
    #[error("token store error")]
    Store(#[from] TokenStoreError),

    #[error("failed to read from the system random source")]
    Generation(#[from] rand::Error),

    #[error("could not generate a unique token after {attempts} attempts")]
    Exhausted { attempts: usize },

    #[error("legacy token rejected")]
    Legacy(#[from] LegacyTokenError),
}

/// Token authentication failures.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid token")]
    Unauthorized,

    #[error("invalid user id in token")]
    InvalidUserId,

    #[error("token lookup failed")]
    Storage(#[source] TokenStoreError),
}

impl From<TokenStoreError> for AuthServiceError {
    fn from(error: TokenStoreError) -> Self {
        Self::Storage(error)
    }
}
