//! Store token generation and presented-token classification.

use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroize;

use crate::auth::legacy::is_legacy_format;

/// Number of random bytes in a store token.
pub const STORE_TOKEN_BYTES: usize = 32;

/// Length of a rendered store token.
pub const STORE_TOKEN_HEX_CHARS: usize = STORE_TOKEN_BYTES * 2;

/// Generate a fresh store token: OS randomness rendered as lowercase hex.
///
/// # Errors
///
/// Returns an error when the system random source cannot be read.
pub fn generate_store_token() -> Result<String, rand::Error> {
    let mut bytes = [0_u8; STORE_TOKEN_BYTES];

    OsRng.try_fill_bytes(&mut bytes)?;

    let token = hex::encode(bytes);

    bytes.zeroize();

    Ok(token)
}

/// A token as presented by a third party, classified once at the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentedToken<'a> {
    /// `user_id:auth_code`, verified by recomputation.
    Legacy(&'a str),

    /// Opaque random string, verified by store lookup.
    Stored(&'a str),
}

impl<'a> PresentedToken<'a> {
    #[must_use]
    pub fn classify(token: &'a str) -> Self {
        if is_legacy_format(token) {
            Self::Legacy(token)
        } else {
            Self::Stored(token)
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'a str {
        match self {
            Self::Legacy(token) | Self::Stored(token) => token,
        }
    }
}
