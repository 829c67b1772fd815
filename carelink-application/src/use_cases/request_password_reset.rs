use std::sync::Arc;

use thiserror::Error;

use carelink_core::{
    AccountStore, AccountStoreError, Email, EmailClient, ResetTokenStore, ResetTokenStoreError,
};

const RESET_EMAIL_SUBJECT: &str = "Reset your Carelink password";

/// Error types for the request-password-reset use case
#[derive(Debug, Error)]
pub enum RequestPasswordResetError {
    #[error("account store error: {0}")]
    Store(#[from] AccountStoreError),
    #[error("reset token store error: {0}")]
    ResetStore(#[from] ResetTokenStoreError),
}

/// Request-password-reset use case - issues a reset token out-of-band.
///
/// The outcome is identical whether or not the email belongs to an account,
/// so the endpoint cannot be used to enumerate registered addresses. The
/// token only ever travels through the email client.
pub struct RequestPasswordResetUseCase {
    account_store: Arc<dyn AccountStore>,
    reset_token_store: Arc<dyn ResetTokenStore>,
    email_client: Arc<dyn EmailClient>,
}

impl RequestPasswordResetUseCase {
    pub fn new(
        account_store: Arc<dyn AccountStore>,
        reset_token_store: Arc<dyn ResetTokenStore>,
        email_client: Arc<dyn EmailClient>,
    ) -> Self {
        Self {
            account_store,
            reset_token_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), RequestPasswordResetError> {
        let Some(account) = self.account_store.find_by_email(&email).await? else {
            tracing::debug!("password reset requested for unknown email");
            return Ok(());
        };

        let token = self.reset_token_store.issue(&account.email).await?;

        let content = format!(
            "A password reset was requested for your Carelink account.\n\n\
             Your reset token is: {}\n\n\
             It expires in one hour and can be used once. If you did not \
             request this, you can ignore this message.",
            token.as_str()
        );

        // A delivery failure must not change the response the caller sees.
        if let Err(error) = self
            .email_client
            .send_email(&account.email, RESET_EMAIL_SUBJECT, &content)
            .await
        {
            tracing::error!(%error, "failed to send password reset email");
        }

        Ok(())
    }
}
