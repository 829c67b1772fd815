use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use carelink_core::{Account, AccountStore, AccountStoreError};

/// Error types for the set-account-status use case
#[derive(Debug, Error)]
pub enum SetAccountStatusError {
    #[error("account not found")]
    AccountNotFound,
    #[error("account store error: {0}")]
    Store(AccountStoreError),
}

impl From<AccountStoreError> for SetAccountStatusError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountNotFound => SetAccountStatusError::AccountNotFound,
            other => SetAccountStatusError::Store(other),
        }
    }
}

/// Set-account-status use case - activates or deactivates an account.
/// Deactivation is the deletion substitute; rows are never removed.
pub struct SetAccountStatusUseCase {
    account_store: Arc<dyn AccountStore>,
}

impl SetAccountStatusUseCase {
    pub fn new(account_store: Arc<dyn AccountStore>) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "SetAccountStatusUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        account_id: Uuid,
        is_active: bool,
    ) -> Result<Account, SetAccountStatusError> {
        let account = self.account_store.set_active(account_id, is_active).await?;
        Ok(account)
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
        AccountFilter, AccountWithProfile, Email, HashedPassword, NewAccount, NewRoleProfile,
        ProfileChanges, Role, StoredCredentials,
    };

    #[derive(Clone, Default)]
    struct MockAccountStore {
        accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    }

    impl MockAccountStore {
        async fn seed(&self) -> Uuid {
            let now = Utc::now();
            let account = Account {
                id: Uuid::new_v4(),
                email: Email::try_from("a@x.com").unwrap(),
                role: Role::Patient,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            let id = account.id;
            self.accounts.write().await.insert(id, account);
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
            id: Uuid,
            is_active: bool,
        ) -> Result<Account, AccountStoreError> {
            let mut accounts = self.accounts.write().await;
            let account = accounts
                .get_mut(&id)
                .ok_or(AccountStoreError::AccountNotFound)?;
            account.is_active = is_active;
            Ok(account.clone())
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
    async fn test_deactivate_then_reactivate() {
        let store = MockAccountStore::default();
        let id = store.seed().await;
        let use_case = SetAccountStatusUseCase::new(Arc::new(store));

        let deactivated = use_case.execute(id, false).await.unwrap();
        assert!(!deactivated.is_active);

        let reactivated = use_case.execute(id, true).await.unwrap();
        assert!(reactivated.is_active);
    }

    #[tokio::test]
    async fn test_missing_account_fails() {
        let store = MockAccountStore::default();

        let result = SetAccountStatusUseCase::new(Arc::new(store))
            .execute(Uuid::new_v4(), false)
            .await;

        assert!(matches!(result, Err(SetAccountStatusError::AccountNotFound)));
    }
}
