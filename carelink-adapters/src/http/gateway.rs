use axum::http::{HeaderMap, header};
use thiserror::Error;
use uuid::Uuid;

use carelink_core::{Account, AccountStore, Role, TokenIssuer};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("authentication required")]
    AuthenticationRequired,
    #[error("invalid or expired token")]
    InvalidOrExpiredToken,
    #[error("account not found")]
    AccountNotFound,
    #[error("account has been deactivated")]
    AccountDeactivated,
    #[error("insufficient permissions")]
    InsufficientRole,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Pull the bearer credential out of the `Authorization` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, GatewayError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .ok_or(GatewayError::AuthenticationRequired)?
        .to_str()
        .map_err(|_| GatewayError::AuthenticationRequired)?
        .strip_prefix("Bearer ")
        .ok_or(GatewayError::AuthenticationRequired)?;

    if token.is_empty() {
        return Err(GatewayError::AuthenticationRequired);
    }
    Ok(token)
}

/// Authenticate an inbound request: bearer header, access-kind verification,
/// then an account reload so deleted or deactivated accounts are locked out
/// even while their tokens are still within expiry.
#[tracing::instrument(name = "Authenticating request", skip_all)]
pub async fn authenticate(
    headers: &HeaderMap,
    token_issuer: &dyn TokenIssuer,
    account_store: &dyn AccountStore,
) -> Result<Account, GatewayError> {
    let token = extract_bearer_token(headers)?;

    let claims = token_issuer
        .verify_access(token)
        .map_err(|_| GatewayError::InvalidOrExpiredToken)?;

    let account = account_store
        .find_by_id(claims.sub)
        .await
        .map_err(|e| GatewayError::Unexpected(e.to_string()))?
        .ok_or(GatewayError::AccountNotFound)?;

    if !account.is_active {
        return Err(GatewayError::AccountDeactivated);
    }

    Ok(account)
}

/// Same steps as [`authenticate`], but any failure just means the request
/// proceeds unauthenticated.
pub async fn authenticate_optional(
    headers: &HeaderMap,
    token_issuer: &dyn TokenIssuer,
    account_store: &dyn AccountStore,
) -> Option<Account> {
    authenticate(headers, token_issuer, account_store)
        .await
        .ok()
}

pub fn require_admin(caller: &Account) -> Result<(), GatewayError> {
    if caller.role == Role::Admin {
        Ok(())
    } else {
        Err(GatewayError::InsufficientRole)
    }
}

/// Mutating account endpoints: the caller must be the target account itself
/// or hold the admin role.
pub fn require_self_or_admin(caller: &Account, target: Uuid) -> Result<(), GatewayError> {
    if caller.id == target || caller.role == Role::Admin {
        Ok(())
    } else {
        Err(GatewayError::InsufficientRole)
    }
}
