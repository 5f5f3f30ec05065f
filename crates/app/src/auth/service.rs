//! Auth gateway: resolves presented tokens to users.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    auth::{
        AuthServiceError, LegacyTokenError, PresentedToken, Salt, TokensRepository,
        TokensService, legacy::validate_legacy_token,
    },
    ids::UserId,
};

#[derive(Clone)]
pub struct TokenAuthService {
    tokens: Arc<dyn TokensService>,
    repository: Arc<dyn TokensRepository>,
    salt: Salt,
}

impl TokenAuthService {
    #[must_use]
    pub fn new(
        tokens: Arc<dyn TokensService>,
        repository: Arc<dyn TokensRepository>,
        salt: Salt,
    ) -> Self {
        Self {
            tokens,
            repository,
            salt,
        }
    }

    async fn authenticate_legacy(&self, token: &str) -> Result<UserId, AuthServiceError> {
        let user = match validate_legacy_token(token, &self.salt) {
            Ok(user) => user,
            Err(LegacyTokenError::InvalidUserId(_)) => return Err(AuthServiceError::InvalidUserId),
            Err(LegacyTokenError::InvalidFormat | LegacyTokenError::Mismatch) => {
                return Err(AuthServiceError::Unauthorized);
            }
        };

        // Best-effort: the request succeeds on the legacy check alone.
        if let Err(source) = self.tokens.migrate_legacy(token).await {
            warn!(%user, "failed to migrate legacy token: {source}");
        }

        Ok(user)
    }

    async fn authenticate_stored(&self, token: &str) -> Result<UserId, AuthServiceError> {
        self.repository
            .find_user_by_token(token)
            .await?
            .ok_or(AuthServiceError::Unauthorized)
    }
}

#[async_trait]
impl AuthService for TokenAuthService {
    async fn authenticate(&self, token: &str) -> Result<UserId, AuthServiceError> {
        let presented = PresentedToken::classify(token);

        let result = match presented {
            PresentedToken::Legacy(token) => self.authenticate_legacy(token).await,
            PresentedToken::Stored(token) => self.authenticate_stored(token).await,
        };

        if let Err(error) = &result {
            debug!(legacy = matches!(presented, PresentedToken::Legacy(_)), "token rejected: {error}");
        }

        result
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a presented token to the user it authorises messages for.
    async fn authenticate(&self, token: &str) -> Result<UserId, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use crate::{
        auth::{
            MockTokensRepository, MockTokensService, TokenManager, TokenManagerError,
            TokenStoreError, legacy::format_legacy_token,
        },
        test::InMemoryTokensRepository,
    };

    use super::*;

    fn salt() -> Salt {
        Salt::new("gateway-salt")
    }

    fn gateway(tokens: MockTokensService, repository: MockTokensRepository) -> TokenAuthService {
        TokenAuthService::new(Arc::new(tokens), Arc::new(repository), salt())
    }

    fn in_memory() -> (Arc<InMemoryTokensRepository>, TokenManager, TokenAuthService) {
        let repository = Arc::new(InMemoryTokensRepository::default());
        let manager = TokenManager::new(repository.clone(), salt());
        let gateway =
            TokenAuthService::new(Arc::new(manager.clone()), repository.clone(), salt());

        (repository, manager, gateway)
    }

    #[tokio::test]
    async fn stored_token_resolves_to_its_user() -> TestResult {
        let mut tokens = MockTokensService::new();
        let mut repository = MockTokensRepository::new();

        tokens.expect_migrate_legacy().never();
        repository
            .expect_find_user_by_token()
            .once()
            .withf(|token| token == "abcdef")
            .return_once(|_| Ok(Some(UserId::new(5))));

        let user = gateway(tokens, repository).authenticate("abcdef").await?;

        assert_eq!(user, UserId::new(5));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_stored_token_is_unauthorized() {
        let mut tokens = MockTokensService::new();
        let mut repository = MockTokensRepository::new();

        tokens.expect_migrate_legacy().never();
        repository
            .expect_find_user_by_token()
            .once()
            .return_once(|_| Ok(None));

        let result = gateway(tokens, repository).authenticate("abc").await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );
    }

    #[tokio::test]
    async fn store_failure_is_reported_as_storage_error() {
        let mut repository = MockTokensRepository::new();

        repository
            .expect_find_user_by_token()
            .once()
            .return_once(|_| Err(TokenStoreError::Timeout(Duration::from_millis(10))));

        let result = gateway(MockTokensService::new(), repository)
            .authenticate("abc")
            .await;

        assert!(
            matches!(
                result,
                Err(AuthServiceError::Storage(TokenStoreError::Timeout(_)))
            ),
            "expected Storage, got {result:?}"
        );
    }

    #[tokio::test]
    async fn valid_legacy_token_resolves_and_migrates() -> TestResult {
        let user = UserId::new(77);
        let legacy = format_legacy_token(user, &salt());
        let expected = legacy.clone();

        let mut tokens = MockTokensService::new();
        let mut repository = MockTokensRepository::new();

        tokens
            .expect_migrate_legacy()
            .once()
            .withf(move |token| token == expected)
            .return_once(move |_| Ok(user));
        repository.expect_find_user_by_token().never();

        assert_eq!(gateway(tokens, repository).authenticate(&legacy).await?, user);

        Ok(())
    }

    #[tokio::test]
    async fn failed_migration_does_not_fail_authentication() -> TestResult {
        let user = UserId::new(78);
        let legacy = format_legacy_token(user, &salt());

        let mut tokens = MockTokensService::new();

        tokens.expect_migrate_legacy().once().return_once(|_| {
            Err(TokenManagerError::Store(TokenStoreError::Timeout(
                Duration::from_secs(5),
            )))
        });

        let result = gateway(tokens, MockTokensRepository::new())
            .authenticate(&legacy)
            .await?;

        assert_eq!(result, user);

        Ok(())
    }

    #[tokio::test]
    async fn forged_legacy_token_is_unauthorized_without_store_access() {
        let forged = format_legacy_token(UserId::new(79), &Salt::new("other"));

        let mut tokens = MockTokensService::new();
        let mut repository = MockTokensRepository::new();

        tokens.expect_migrate_legacy().never();
        repository.expect_find_user_by_token().never();

        let result = gateway(tokens, repository).authenticate(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );
    }

    #[tokio::test]
    async fn legacy_token_with_bad_user_id_is_invalid_input() {
        let mut tokens = MockTokensService::new();
        let mut repository = MockTokensRepository::new();

        tokens.expect_migrate_legacy().never();
        repository.expect_find_user_by_token().never();

        let result = gateway(tokens, repository).authenticate("abc:def").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidUserId)),
            "expected InvalidUserId, got {result:?}"
        );
    }

    #[tokio::test]
    async fn migrated_legacy_token_is_then_found_in_the_store() -> TestResult {
        let (repository, _manager, gateway) = in_memory();
        let user = UserId::new(80);
        let legacy = format_legacy_token(user, &salt());

        assert_eq!(repository.find_user_by_token(&legacy).await?, None);
        assert_eq!(gateway.authenticate(&legacy).await?, user);
        assert_eq!(repository.find_user_by_token(&legacy).await?, Some(user));

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_stops_authenticating() -> TestResult {
        let (_repository, manager, gateway) = in_memory();
        let user = UserId::new(81);

        let first = manager.issue_or_fetch(user).await?;

        assert_eq!(gateway.authenticate(&first.token).await?, user);

        let second = manager.revoke(user).await?;

        assert!(matches!(
            gateway.authenticate(&first.token).await,
            Err(AuthServiceError::Unauthorized)
        ));
        assert_eq!(gateway.authenticate(&second.token).await?, user);

        Ok(())
    }
}
