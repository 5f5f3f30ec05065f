//! Legacy deterministic tokens.
//!
//! Before tokens were stored, a user's token was derived from their id and a
//! process-wide salt: `"{user_id}:{md5_hex(user_id ++ salt)}"`. Those tokens
//! are still accepted, so the derivation must stay byte-for-byte identical.

use std::fmt;

use md5::{Digest, Md5};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::{auth::LegacyTokenError, ids::UserId};

const SEPARATOR: char = ':';

/// Secret salt mixed into legacy auth codes.
#[derive(Clone)]
pub struct Salt(String);

impl Salt {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Salt(**redacted**)")
    }
}

impl Drop for Salt {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Lowercase hex MD5 of the decimal user id followed by the salt.
#[must_use]
pub fn derive_auth_code(user: UserId, salt: &Salt) -> String {
    let mut hasher = Md5::new();

    hasher.update(user.to_string().as_bytes());
    hasher.update(salt.as_bytes());

    hex::encode(hasher.finalize())
}

#[must_use]
pub fn format_legacy_token(user: UserId, salt: &Salt) -> String {
    format!("{user}{SEPARATOR}{}", derive_auth_code(user, salt))
}

/// Structural check only: exactly two non-empty colon-delimited parts.
///
/// A store token that happened to contain exactly one colon would be
/// classified as legacy. Store tokens are hex, so this cannot happen today.
#[must_use]
pub fn is_legacy_format(token: &str) -> bool {
    split_legacy(token).is_some()
}

/// Validate a legacy token against the salt and return the user it names.
///
/// # Errors
///
/// Returns [`LegacyTokenError::InvalidFormat`] when the token is not
/// structurally legacy, [`LegacyTokenError::InvalidUserId`] when the first
/// part is not an integer, and [`LegacyTokenError::Mismatch`] when the auth
/// code does not match the one derived from the salt.
pub fn validate_legacy_token(token: &str, salt: &Salt) -> Result<UserId, LegacyTokenError> {
    let (user_part, _auth_code) = split_legacy(token).ok_or(LegacyTokenError::InvalidFormat)?;

    let user = user_part.parse::<UserId>()?;
    let expected = format_legacy_token(user, salt);

    if bool::from(token.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(user)
    } else {
        Err(LegacyTokenError::Mismatch)
    }
}

fn split_legacy(token: &str) -> Option<(&str, &str)> {
    let mut parts = token.split(SEPARATOR);

    match (parts.next(), parts.next(), parts.next()) {
        (Some(user), Some(code), None) if !user.is_empty() && !code.is_empty() => {
            Some((user, code))
        }
        _ => None,
    }
}
