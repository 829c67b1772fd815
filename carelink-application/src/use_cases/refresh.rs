use std::sync::Arc;

use thiserror::Error;

use carelink_core::{AccountStore, AccountStoreError, TokenError, TokenIssuer};

/// Error types for the refresh use case.
///
/// A missing or deactivated account deliberately collapses into
/// `InvalidOrExpiredToken`: the holder of a stale refresh token learns
/// nothing about the account's state.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("invalid or expired refresh token")]
    InvalidOrExpiredToken,
    #[error("account store error: {0}")]
    Store(#[from] AccountStoreError),
    #[error("token error: {0}")]
    Token(TokenError),
}

/// Refresh use case - exchanges a valid refresh token for a new access
/// token. The refresh token itself is never rotated or re-issued.
pub struct RefreshUseCase {
    account_store: Arc<dyn AccountStore>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl RefreshUseCase {
    pub fn new(account_store: Arc<dyn AccountStore>, token_issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            account_store,
            token_issuer,
        }
    }

    /// Execute the refresh use case
    ///
    /// # Returns
    /// A freshly issued access token for the account named in the refresh
    /// token's claims.
    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &str) -> Result<String, RefreshError> {
        let claims = self
            .token_issuer
            .verify_refresh(refresh_token)
            .map_err(|_| RefreshError::InvalidOrExpiredToken)?;

        let account = match self.account_store.find_by_id(claims.sub).await? {
            Some(account) if account.is_active => account,
            _ => return Err(RefreshError::InvalidOrExpiredToken),
        };

        self.token_issuer
            .issue_access(&account)
            .map_err(RefreshError::Token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use carelink_core::{
        AccessClaims, Account, AccountFilter, AccountWithProfile, Email, HashedPassword,
        NewAccount, NewRoleProfile, ProfileChanges, RefreshClaims, Role, StoredCredentials,
    };

    #[derive(Clone, Default)]
    struct MockAccountStore {
        accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    }

    impl MockAccountStore {
        async fn seed(&self, is_active: bool) -> Account {
            let now = Utc::now();
            let account = Account {
                id: Uuid::new_v4(),
                email: Email::try_from("a@x.com").unwrap(),
                role: Role::Patient,
                is_active,
                created_at: now,
                updated_at: now,
            };
            self.accounts
                .write()
                .await
                .insert(account.id, account.clone());
            account
        }
    }

    #[async_trait]
    impl AccountStore for MockAccountStore {
        async fn find_by_email(
            &self,
            _email: &Email,
        ) -> Result<Option<Account>, AccountStoreError> {
            unimplemented!()
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError> {
            Ok(self.accounts.read().await.get(&id).cloned())
        }

        async fn find_with_profile(
            &self,
            _id: Uuid,
        ) -> Result<Option<AccountWithProfile>, AccountStoreError> {
            unimplemented!()
        }

        async fn credentials_by_email(
            &self,
            _email: &Email,
        ) -> Result<Option<StoredCredentials>, AccountStoreError> {
            unimplemented!()
        }

        async fn create_with_profile(
            &self,
            _account: NewAccount,
            _profile: NewRoleProfile,
        ) -> Result<AccountWithProfile, AccountStoreError> {
            unimplemented!()
        }

        async fn update_email(&self, _id: Uuid, _email: Email) -> Result<(), AccountStoreError> {
            unimplemented!()
        }

        async fn update_password_hash(
            &self,
            _id: Uuid,
            _password_hash: HashedPassword,
        ) -> Result<(), AccountStoreError> {
            unimplemented!()
        }

        async fn set_active(
            &self,
            _id: Uuid,
            _is_active: bool,
        ) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn update_profile(
            &self,
            _id: Uuid,
            _changes: ProfileChanges,
        ) -> Result<AccountWithProfile, AccountStoreError> {
            unimplemented!()
        }

        async fn list_all(
            &self,
            _filter: AccountFilter,
        ) -> Result<Vec<AccountWithProfile>, AccountStoreError> {
            unimplemented!()
        }
    }

    /// Treats `refresh:<uuid>` as the only valid refresh tokens and rejects
    /// everything else, including its own access tokens.
    struct FakeTokenIssuer;

    impl TokenIssuer for FakeTokenIssuer {
        fn issue_access(&self, account: &Account) -> Result<String, TokenError> {
            Ok(format!("access:{}", account.id))
        }

        fn issue_refresh(&self, account: &Account) -> Result<String, TokenError> {
            Ok(format!("refresh:{}", account.id))
        }

        fn verify_access(&self, _token: &str) -> Result<AccessClaims, TokenError> {
            unimplemented!()
        }

        fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
            let sub = token
                .strip_prefix("refresh:")
                .and_then(|raw| Uuid::parse_str(raw).ok())
                .ok_or(TokenError::InvalidOrExpired)?;
            Ok(RefreshClaims {
                sub,
                email: Email::try_from("a@x.com").unwrap(),
                iat: 0,
                exp: i64::MAX,
            })
        }
    }

    fn use_case(store: MockAccountStore) -> RefreshUseCase {
        RefreshUseCase::new(Arc::new(store), Arc::new(FakeTokenIssuer))
    }

    #[tokio::test]
    async fn test_refresh_issues_new_access_token() {
        let store = MockAccountStore::default();
        let account = store.seed(true).await;

        let access_token = use_case(store)
            .execute(&format!("refresh:{}", account.id))
            .await
            .unwrap();

        assert_eq!(access_token, format!("access:{}", account.id));
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_shaped_token() {
        let store = MockAccountStore::default();
        let account = store.seed(true).await;

        let result = use_case(store)
            .execute(&format!("access:{}", account.id))
            .await;

        assert!(matches!(result, Err(RefreshError::InvalidOrExpiredToken)));
    }

    #[tokio::test]
    async fn test_refresh_for_missing_account_looks_like_bad_token() {
        let store = MockAccountStore::default();

        let result = use_case(store)
            .execute(&format!("refresh:{}", Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(RefreshError::InvalidOrExpiredToken)));
    }

    #[tokio::test]
    async fn test_refresh_for_deactivated_account_looks_like_bad_token() {
        let store = MockAccountStore::default();
        let account = store.seed(false).await;

        let result = use_case(store)
            .execute(&format!("refresh:{}", account.id))
            .await;

        assert!(matches!(result, Err(RefreshError::InvalidOrExpiredToken)));
    }
}
