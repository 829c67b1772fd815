use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use carelink_core::{
    AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError, Password,
};

/// Error types for the change-password use case
#[derive(Debug, Error)]
pub enum ChangePasswordError {
    #[error("account not found")]
    AccountNotFound,
    #[error("current password is incorrect")]
    CurrentPasswordIncorrect,
    #[error("account store error: {0}")]
    Store(#[from] AccountStoreError),
    #[error("credential hasher error: {0}")]
    Hasher(#[from] CredentialHasherError),
}

/// Change-password use case - verifies the current password before hashing
/// and persisting the new one.
pub struct ChangePasswordUseCase {
    account_store: Arc<dyn AccountStore>,
    credential_hasher: Arc<dyn CredentialHasher>,
}

impl ChangePasswordUseCase {
    pub fn new(
        account_store: Arc<dyn AccountStore>,
        credential_hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            account_store,
            credential_hasher,
        }
    }

    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip_all, fields(%account_id))]
    pub async fn execute(
        &self,
        account_id: Uuid,
        current_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        let account = self
            .account_store
            .find_by_id(account_id)
            .await?
            .ok_or(ChangePasswordError::AccountNotFound)?;

        let credentials = self
            .account_store
            .credentials_by_email(&account.email)
            .await?
            .ok_or(ChangePasswordError::AccountNotFound)?;

        let valid = self
            .credential_hasher
            .verify(&current_password, &credentials.password_hash)
            .await?;
        if !valid {
            return Err(ChangePasswordError::CurrentPasswordIncorrect);
        }

        let password_hash = self.credential_hasher.hash(&new_password).await?;
        self.account_store
            .update_password_hash(account_id, password_hash)
            .await?;

        Ok(())
    }
}
