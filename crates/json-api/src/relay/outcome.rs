//! Relay responses.
//!
//! Callers match on the plain-text bodies, so they are fixed strings.

use salvo::{Response, Scribe, http::StatusCode, writing::Text};
use tracing::error;

use relay_app::auth::AuthServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelayOutcome {
    /// Message queued for delivery.
    Delivered,
    MalformedBody,
    InvalidUserId,
    InvalidToken,
    Internal,
}

impl RelayOutcome {
    pub(crate) fn status(self) -> StatusCode {
        match self {
            Self::Delivered => StatusCode::OK,
            Self::MalformedBody | Self::InvalidUserId => StatusCode::BAD_REQUEST,
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn body(self) -> &'static str {
        match self {
            Self::Delivered => "OK",
            Self::MalformedBody => "Invalid request body",
            Self::InvalidUserId => "Invalid user ID in token",
            Self::InvalidToken => "Invalid token",
            Self::Internal => "Internal server error",
        }
    }

    /// Metric label.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::MalformedBody => "malformed_body",
            Self::InvalidUserId => "invalid_user_id",
            Self::InvalidToken => "invalid_token",
            Self::Internal => "internal_error",
        }
    }
}

impl From<AuthServiceError> for RelayOutcome {
    fn from(error: AuthServiceError) -> Self {
        match error {
            AuthServiceError::Unauthorized => Self::InvalidToken,
            AuthServiceError::InvalidUserId => Self::InvalidUserId,
            AuthServiceError::Storage(source) => {
                error!("failed to resolve relay token: {source}");

                Self::Internal
            }
        }
    }
}

impl Scribe for RelayOutcome {
    fn render(self, res: &mut Response) {
        res.status_code(self.status());
        res.render(Text::Plain(self.body()));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use relay_app::auth::TokenStoreError;

    use super::*;

    #[test]
    fn auth_errors_map_onto_http_outcomes() {
        assert_eq!(
            RelayOutcome::from(AuthServiceError::Unauthorized),
            RelayOutcome::InvalidToken
        );
        assert_eq!(
            RelayOutcome::from(AuthServiceError::InvalidUserId),
            RelayOutcome::InvalidUserId
        );
        assert_eq!(
            RelayOutcome::from(AuthServiceError::Storage(TokenStoreError::Timeout(
                Duration::from_secs(5)
            ))),
            RelayOutcome::Internal
        );
    }

    #[test]
    fn every_outcome_has_a_distinct_label() {
        let outcomes = [
            RelayOutcome::Delivered,
            RelayOutcome::MalformedBody,
            RelayOutcome::InvalidUserId,
            RelayOutcome::InvalidToken,
            RelayOutcome::Internal,
        ];

        let mut labels: Vec<_> = outcomes.iter().map(|outcome| outcome.label()).collect();

        labels.sort_unstable();
        labels.dedup();

        assert_eq!(labels.len(), outcomes.len());
    }
}
