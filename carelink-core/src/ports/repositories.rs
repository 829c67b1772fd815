use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    account::{Account, AccountFilter, AccountWithProfile, NewAccount, StoredCredentials},
    email::Email,
    password::HashedPassword,
    profile::{NewRoleProfile, ProfileChanges},
    reset_token::ResetToken,
};

// AccountStore port trait and errors

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountStoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("account not found")]
    AccountNotFound,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Port for the transactional account + role-profile repository.
///
/// Every read returns hash-free projections except `credentials_by_email`,
/// which exists solely so a presented password can be verified.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError>;

    async fn find_with_profile(
        &self,
        id: Uuid,
    ) -> Result<Option<AccountWithProfile>, AccountStoreError>;

    async fn credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, AccountStoreError>;

    /// Insert the account row and its role-profile row (none for admin) as a
    /// single transaction. A unique-email violation fails the whole operation
    /// with `DuplicateEmail` and nothing is persisted.
    async fn create_with_profile(
        &self,
        account: NewAccount,
        profile: NewRoleProfile,
    ) -> Result<AccountWithProfile, AccountStoreError>;

    async fn update_email(&self, id: Uuid, email: Email) -> Result<(), AccountStoreError>;

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: HashedPassword,
    ) -> Result<(), AccountStoreError>;

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Account, AccountStoreError>;

    /// Apply email and role-specific profile changes in one transaction; a
    /// failure on any row rolls back all of them.
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<AccountWithProfile, AccountStoreError>;

    async fn list_all(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<AccountWithProfile>, AccountStoreError>;
}

// ResetTokenStore port trait and errors

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResetTokenStoreError {
    #[error("invalid reset token")]
    InvalidToken,
    #[error("reset token has expired")]
    ExpiredToken,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Port for the single-use, time-boxed reset-token store.
#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    /// Invalidate every unused token for the email, then store and return a
    /// freshly generated one with the store's configured time-to-live.
    async fn issue(&self, email: &Email) -> Result<ResetToken, ResetTokenStoreError>;

    /// Atomically mark the token used and return the email it was issued
    /// for. Of two concurrent consumers exactly one succeeds; the other
    /// observes `InvalidToken`. An expired token fails with `ExpiredToken`.
    async fn consume(&self, token: &ResetToken) -> Result<Email, ResetTokenStoreError>;
}
