use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use carelink_core::{AccountStore, AccountStoreError, AccountWithProfile};

/// Error types for the get-current-user use case
#[derive(Debug, Error)]
pub enum GetCurrentUserError {
    #[error("account not found")]
    AccountNotFound,
    #[error("account store error: {0}")]
    Store(#[from] AccountStoreError),
}

/// Get-current-user use case - pure read of an account with its profile.
pub struct GetCurrentUserUseCase {
    account_store: Arc<dyn AccountStore>,
}

impl GetCurrentUserUseCase {
    pub fn new(account_store: Arc<dyn AccountStore>) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "GetCurrentUserUseCase::execute", skip(self))]
    pub async fn execute(&self, account_id: Uuid) -> Result<AccountWithProfile, GetCurrentUserError> {
        self.account_store
            .find_with_profile(account_id)
            .await?
            .ok_or(GetCurrentUserError::AccountNotFound)
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

    use carelink_core::{
        Account, AccountFilter, DisplayName, Email, HashedPassword, NewAccount, NewRoleProfile,
        PatientProfile, ProfileChanges, Role, RoleProfile, StoredCredentials,
    };

    #[derive(Clone, Default)]
    struct MockAccountStore {
        accounts: Arc<RwLock<HashMap<Uuid, AccountWithProfile>>>,
    }

    impl MockAccountStore {
        async fn seed(&self) -> Uuid {
            let now = Utc::now();
            let id = Uuid::new_v4();
            self.accounts.write().await.insert(
                id,
                AccountWithProfile {
                    account: Account {
                        id,
                        email: Email::try_from("a@x.com").unwrap(),
                        role: Role::Patient,
                        is_active: true,
                        created_at: now,
                        updated_at: now,
                    },
                    profile: Some(RoleProfile::Patient(PatientProfile {
                        name: DisplayName::try_from("Test User").unwrap(),
                        date_of_birth: None,
                        diagnosis_date: None,
                        diagnosis_type: None,
                        profile_photo: None,
                    })),
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
            Ok(self.accounts.read().await.get(&id).cloned())
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

    #[tokio::test]
    async fn test_returns_account_with_profile() {
        let store = MockAccountStore::default();
        let id = store.seed().await;

        let result = GetCurrentUserUseCase::new(Arc::new(store))
            .execute(id)
            .await
            .unwrap();

        assert_eq!(result.account.id, id);
        assert!(result.profile.is_some());
    }

    #[tokio::test]
    async fn test_missing_account_fails() {
        let store = MockAccountStore::default();

        let result = GetCurrentUserUseCase::new(Arc::new(store))
            .execute(Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(GetCurrentUserError::AccountNotFound)));
    }
}
