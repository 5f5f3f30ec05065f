//! Token data models.

use std::fmt;

use jiff::Timestamp;

use crate::ids::UserId;

/// The active token of one user, as persisted in `user_tokens`.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRecord {
    /// Owner of the token. Primary key.
    pub user_id: UserId,

    /// Raw token string presented by third parties. Unique across users.
    pub token: String,

    /// When this token was issued, rotated, or migrated.
    pub created_at: Timestamp,
}

impl fmt::Debug for TokenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRecord")
            .field("user_id", &self.user_id)
            .field("token", &"**redacted**")
            .field("created_at", &self.created_at)
            .finish()
    }
}
