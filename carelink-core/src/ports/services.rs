use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    account::Account,
    email::Email,
    password::{HashedPassword, Password},
    role::Role,
};

// CredentialHasher port

#[derive(Debug, Error)]
pub enum CredentialHasherError {
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Port for one-way password hashing.
///
/// `hash` must salt per call, so hashing the same plaintext twice yields
/// different outputs; `verify` is the only way to compare. Both are async
/// because the work factor makes them too expensive for an executor thread.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<HashedPassword, CredentialHasherError>;

    /// Returns `Ok(false)` on a mismatch; `Err` is reserved for infrastructure
    /// failures such as a corrupt stored hash.
    async fn verify(
        &self,
        candidate: &Password,
        stored: &HashedPassword,
    ) -> Result<bool, CredentialHasherError>;
}

// TokenIssuer port

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid or expired token")]
    InvalidOrExpired,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Claims carried by a short-lived access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: Uuid,
    pub email: Email,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by a long-lived refresh token. No role: a refresh token
/// can only be exchanged for a new access token, never used directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub email: Email,
    pub iat: i64,
    pub exp: i64,
}

/// Port for stateless signing and verification of the two bearer-token
/// kinds. Each kind has its own secret and expiry; a token of one kind must
/// never verify as the other.
pub trait TokenIssuer: Send + Sync {
    fn issue_access(&self, account: &Account) -> Result<String, TokenError>;

    fn issue_refresh(&self, account: &Account) -> Result<String, TokenError>;

    fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError>;

    fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError>;
}

// EmailClient port

/// Port trait for the email delivery collaborator.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}
