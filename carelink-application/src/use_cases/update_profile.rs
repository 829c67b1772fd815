use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use carelink_core::{AccountStore, AccountStoreError, AccountWithProfile, ProfileChanges};

/// Error types for the update-profile use case
#[derive(Debug, Error)]
pub enum UpdateProfileError {
    #[error("account not found")]
    AccountNotFound,
    #[error("email is already in use")]
    EmailAlreadyInUse,
    #[error("account store error: {0}")]
    Store(AccountStoreError),
}

impl From<AccountStoreError> for UpdateProfileError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountNotFound => UpdateProfileError::AccountNotFound,
            AccountStoreError::DuplicateEmail => UpdateProfileError::EmailAlreadyInUse,
            other => UpdateProfileError::Store(other),
        }
    }
}

/// Update-profile use case - applies email and role-specific profile changes
/// in one store transaction.
pub struct UpdateProfileUseCase {
    account_store: Arc<dyn AccountStore>,
}

impl UpdateProfileUseCase {
    pub fn new(account_store: Arc<dyn AccountStore>) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip_all, fields(%account_id))]
    pub async fn execute(
        &self,
        account_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<AccountWithProfile, UpdateProfileError> {
        let updated = self
            .account_store
            .update_profile(account_id, changes)
            .await?;
        Ok(updated)
    }
}
