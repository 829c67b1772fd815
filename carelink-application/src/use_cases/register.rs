use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use carelink_core::{
    AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError, DisplayName, Email,
    NewAccount, NewRoleProfile, Password, Role, TokenError, TokenIssuer,
};

use super::IssuedSession;

/// Pre-validated registration input, as handed over by the HTTP boundary.
#[derive(Debug)]
pub struct NewRegistration {
    pub email: Email,
    pub password: Password,
    pub role: Role,
    pub name: DisplayName,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
}

/// Error types for the register use case
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("email is already registered")]
    EmailAlreadyRegistered,
    #[error("account store error: {0}")]
    Store(AccountStoreError),
    #[error("credential hasher error: {0}")]
    Hasher(#[from] CredentialHasherError),
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}

impl From<AccountStoreError> for RegisterError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::DuplicateEmail => RegisterError::EmailAlreadyRegistered,
            other => RegisterError::Store(other),
        }
    }
}

/// Register use case - creates an account and its role profile atomically,
/// then issues the initial token pair.
pub struct RegisterUseCase {
    account_store: Arc<dyn AccountStore>,
    credential_hasher: Arc<dyn CredentialHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl RegisterUseCase {
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

    /// Execute the register use case
    ///
    /// # Returns
    /// The created account (profile attached, hash stripped) plus an access
    /// and a refresh token, or `EmailAlreadyRegistered` if the email is
    /// taken. Account and profile rows commit or roll back together.
    #[tracing::instrument(
        name = "RegisterUseCase::execute",
        skip_all,
        fields(role = %registration.role)
    )]
    pub async fn execute(
        &self,
        registration: NewRegistration,
    ) -> Result<IssuedSession, RegisterError> {
        let NewRegistration {
            email,
            password,
            role,
            name,
            date_of_birth,
            phone,
        } = registration;

        // Cheap pre-check for a friendly error; the store's unique constraint
        // still backs the invariant under concurrent registration.
        if self.account_store.find_by_email(&email).await?.is_some() {
            return Err(RegisterError::EmailAlreadyRegistered);
        }

        let password_hash = self.credential_hasher.hash(&password).await?;

        let profile = match role {
            Role::Patient => NewRoleProfile::Patient {
                name,
                date_of_birth,
            },
            Role::Caregiver => NewRoleProfile::Caregiver { name, phone },
            Role::Admin => NewRoleProfile::Admin,
        };

        let created = self
            .account_store
            .create_with_profile(
                NewAccount {
                    email,
                    password_hash,
                    role,
                },
                profile,
            )
            .await?;

        let access_token = self.token_issuer.issue_access(&created.account)?;
        let refresh_token = self.token_issuer.issue_refresh(&created.account)?;

        Ok(IssuedSession {
            account: created,
            access_token,
            refresh_token,
        })
    }
}
