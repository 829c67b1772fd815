use std::sync::Arc;

use thiserror::Error;

use carelink_core::{
    AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError, Email, Password,
    TokenError, TokenIssuer,
};

use super::IssuedSession;

/// Error types for the login use case.
///
/// An unknown email and a wrong password both surface as
/// `InvalidCredentials` so a caller cannot probe which accounts exist.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account has been deactivated")]
    AccountDeactivated,
    #[error("account store error: {0}")]
    Store(#[from] AccountStoreError),
    #[error("credential hasher error: {0}")]
    Hasher(#[from] CredentialHasherError),
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}

/// Login use case - verifies a password and issues a fresh token pair.
pub struct LoginUseCase {
    account_store: Arc<dyn AccountStore>,
    credential_hasher: Arc<dyn CredentialHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl LoginUseCase {
    pub fn new(
        account_store: Arc<dyn AccountStore>,
        credential_hasher: Arc<dyn CredentialHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            account_store,
            credential_hasher,
            token_issuer,
        }
    }

    /// Execute the login use case
    ///
    /// # Returns
    /// The account (profile attached) plus fresh access and refresh tokens,
    /// `InvalidCredentials` on unknown email or wrong password, or
    /// `AccountDeactivated` for an inactive account.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<IssuedSession, LoginError> {
        let Some(credentials) = self.account_store.credentials_by_email(&email).await? else {
            return Err(LoginError::InvalidCredentials);
        };

        if !credentials.account.is_active {
            return Err(LoginError::AccountDeactivated);
        }

        let valid = self
            .credential_hasher
            .verify(&password, &credentials.password_hash)
            .await?;
        if !valid {
            return Err(LoginError::InvalidCredentials);
        }

        let account = self
            .account_store
            .find_with_profile(credentials.account.id)
            .await?
            .ok_or(LoginError::Store(AccountStoreError::AccountNotFound))?;

        let access_token = self.token_issuer.issue_access(&account.account)?;
        let refresh_token = self.token_issuer.issue_refresh(&account.account)?;

        Ok(IssuedSession {
            account,
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use secrecy::Secret;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use carelink_core::{
        Account, AccountFilter, AccountWithProfile, DisplayName, HashedPassword, NewAccount,
        NewRoleProfile, PatientProfile, ProfileChanges, Role, RoleProfile, StoredCredentials,
    };

    #[derive(Clone, Default)]
    struct MockAccountStore {
        accounts: Arc<RwLock<HashMap<Email, StoredCredentials>>>,
    }

    impl MockAccountStore {
        async fn seed(&self, email: &str, password: &str, is_active: bool) -> Uuid {
            let id = Uuid::new_v4();
            let now = Utc::now();
            let account = Account {
                id,
                email: Email::try_from(email).unwrap(),
                role: Role::Patient,
                is_active,
                created_at: now,
                updated_at: now,
            };
            self.accounts.write().await.insert(
                account.email.clone(),
                StoredCredentials {
                    account,
                    password_hash: HashedPassword::new(format!("hashed::{password}")),
                },
            );
            id
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

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Account>, AccountStoreError> {
            unimplemented!()
        }

        async fn find_with_profile(
            &self,
            id: Uuid,
        ) -> Result<Option<AccountWithProfile>, AccountStoreError> {
            let accounts = self.accounts.read().await;
            Ok(accounts
                .values()
                .find(|entry| entry.account.id == id)
                .map(|entry| AccountWithProfile {
                    account: entry.account.clone(),
                    profile: Some(RoleProfile::Patient(PatientProfile {
                        name: DisplayName::try_from("Test User").unwrap(),
                        date_of_birth: None,
                        diagnosis_date: None,
                        diagnosis_type: None,
                        profile_photo: None,
                    })),
                }))
        }

        async fn credentials_by_email(
            &self,
            email: &Email,
        ) -> Result<Option<StoredCredentials>, AccountStoreError> {
            let accounts = self.accounts.read().await;
            Ok(accounts.get(email).cloned())
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

    struct FakeHasher;

    #[async_trait]
    impl CredentialHasher for FakeHasher {
        async fn hash(
            &self,
            password: &Password,
        ) -> Result<HashedPassword, CredentialHasherError> {
            Ok(HashedPassword::new(format!("hashed::{}", password.expose())))
        }

        async fn verify(
            &self,
            candidate: &Password,
            stored: &HashedPassword,
        ) -> Result<bool, CredentialHasherError> {
            Ok(stored.expose() == format!("hashed::{}", candidate.expose()))
        }
    }

    struct FakeTokenIssuer;

    impl TokenIssuer for FakeTokenIssuer {
        fn issue_access(&self, account: &Account) -> Result<String, TokenError> {
            Ok(format!("access:{}", account.id))
        }

        fn issue_refresh(&self, account: &Account) -> Result<String, TokenError> {
            Ok(format!("refresh:{}", account.id))
        }

        fn verify_access(
            &self,
            _token: &str,
        ) -> Result<carelink_core::AccessClaims, TokenError> {
            unimplemented!()
        }

        fn verify_refresh(
            &self,
            _token: &str,
        ) -> Result<carelink_core::RefreshClaims, TokenError> {
            unimplemented!()
        }
    }

    fn use_case(store: MockAccountStore) -> LoginUseCase {
        LoginUseCase::new(Arc::new(store), Arc::new(FakeHasher), Arc::new(FakeTokenIssuer))
    }

    fn email(raw: &str) -> Email {
        Email::try_from(raw).unwrap()
    }

    fn password(raw: &str) -> Password {
        Password::parse(Secret::new(raw.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_login_success_returns_profile_and_tokens() {
        let store = MockAccountStore::default();
        let id = store.seed("a@x.com", "secret1", true).await;

        let session = use_case(store)
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();

        assert_eq!(session.account.account.id, id);
        assert!(session.account.profile.is_some());
        assert_eq!(session.access_token, format!("access:{id}"));
        assert_eq!(session.refresh_token, format!("refresh:{id}"));
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_are_indistinguishable() {
        let store = MockAccountStore::default();
        store.seed("a@x.com", "secret1", true).await;
        let use_case = use_case(store);

        let wrong_password = use_case
            .execute(email("a@x.com"), password("wrong"))
            .await
            .unwrap_err();
        let unknown_email = use_case
            .execute(email("ghost@x.com"), password("secret1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, LoginError::InvalidCredentials));
        assert!(matches!(unknown_email, LoginError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_deactivated_account_is_rejected() {
        let store = MockAccountStore::default();
        store.seed("a@x.com", "secret1", false).await;

        let result = use_case(store)
            .execute(email("a@x.com"), password("secret1"))
            .await;

        assert!(matches!(result, Err(LoginError::AccountDeactivated)));
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let store = MockAccountStore::default();
        store.seed("a@x.com", "secret1", true).await;

        let result = use_case(store)
            .execute(email("A@X.com"), password("secret1"))
            .await;

        assert!(result.is_ok());
    }
}
