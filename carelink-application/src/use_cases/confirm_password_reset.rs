use std::sync::Arc;

use thiserror::Error;

use carelink_core::{
    AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError, Password,
    ResetToken, ResetTokenStore, ResetTokenStoreError,
};

/// Error types for the confirm-password-reset use case.
///
/// `AccountNotFound` here means the store holds a reset record for an email
/// with no account behind it - an invariant violation, not a caller mistake.
#[derive(Debug, Error)]
pub enum ConfirmPasswordResetError {
    #[error("invalid reset token")]
    InvalidResetToken,
    #[error("reset token has expired")]
    ExpiredResetToken,
    #[error("account not found")]
    AccountNotFound,
    #[error("account store error: {0}")]
    Store(#[from] AccountStoreError),
    #[error("reset token store error: {0}")]
    ResetStore(ResetTokenStoreError),
    #[error("credential hasher error: {0}")]
    Hasher(#[from] CredentialHasherError),
}

impl From<ResetTokenStoreError> for ConfirmPasswordResetError {
    fn from(error: ResetTokenStoreError) -> Self {
        match error {
            ResetTokenStoreError::InvalidToken => ConfirmPasswordResetError::InvalidResetToken,
            ResetTokenStoreError::ExpiredToken => ConfirmPasswordResetError::ExpiredResetToken,
            other => ConfirmPasswordResetError::ResetStore(other),
        }
    }
}

/// Confirm-password-reset use case - consumes a single-use reset token and
/// applies the new credential.
pub struct ConfirmPasswordResetUseCase {
    account_store: Arc<dyn AccountStore>,
    reset_token_store: Arc<dyn ResetTokenStore>,
    credential_hasher: Arc<dyn CredentialHasher>,
}

impl ConfirmPasswordResetUseCase {
    pub fn new(
        account_store: Arc<dyn AccountStore>,
        reset_token_store: Arc<dyn ResetTokenStore>,
        credential_hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            account_store,
            reset_token_store,
            credential_hasher,
        }
    }

    /// Execute the confirm-password-reset use case
    ///
    /// The consume step is atomic in the store: of two concurrent callers
    /// presenting the same token, exactly one reaches the password update.
    #[tracing::instrument(name = "ConfirmPasswordResetUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: &ResetToken,
        new_password: Password,
    ) -> Result<(), ConfirmPasswordResetError> {
        let email = self.reset_token_store.consume(token).await?;

        let account = self
            .account_store
            .find_by_email(&email)
            .await?
            .ok_or(ConfirmPasswordResetError::AccountNotFound)?;

        let password_hash = self.credential_hasher.hash(&new_password).await?;
        self.account_store
            .update_password_hash(account.id, password_hash)
            .await?;

        Ok(())
    }
}
