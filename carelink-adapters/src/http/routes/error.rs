use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use carelink_application::{
    ChangePasswordError, ConfirmPasswordResetError, GetCurrentUserError, ListAccountsError,
    LoginError, RefreshError, RegisterError, RequestPasswordResetError, SetAccountStatusError,
    UpdateProfileError,
};
use carelink_core::ValidationError;

use crate::http::gateway::GatewayError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every failure a route can surface, with its fixed status mapping.
/// Security-sensitive flows collapse their causes before reaching this type;
/// `Unexpected` is logged and never leaks detail to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Email is already registered")]
    EmailAlreadyRegistered,

    #[error("Email is already in use")]
    EmailAlreadyInUse,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Your account has been deactivated. Please contact support.")]
    AccountDeactivated,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("Authentication required. Please provide a token.")]
    AuthenticationRequired,

    #[error("Access denied. Insufficient permissions.")]
    InsufficientRole,

    #[error("Invalid reset token")]
    InvalidResetToken,

    #[error("Reset token has expired")]
    ExpiredResetToken,

    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match &self {
            ApiError::Validation(_) | ApiError::InvalidResetToken | ApiError::ExpiredResetToken => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            ApiError::EmailAlreadyRegistered | ApiError::EmailAlreadyInUse => {
                (StatusCode::CONFLICT, self.to_string())
            }

            ApiError::InvalidCredentials
            | ApiError::AccountDeactivated
            | ApiError::InvalidOrExpiredToken
            | ApiError::AuthenticationRequired
            | ApiError::CurrentPasswordIncorrect => (StatusCode::UNAUTHORIZED, self.to_string()),

            ApiError::InsufficientRole => (StatusCode::FORBIDDEN, self.to_string()),

            ApiError::AccountNotFound => (StatusCode::NOT_FOUND, self.to_string()),

            ApiError::Unexpected(detail) => {
                tracing::error!(%detail, "request failed unexpectedly");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::Validation(error.to_string())
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::AuthenticationRequired => ApiError::AuthenticationRequired,
            GatewayError::InvalidOrExpiredToken => ApiError::InvalidOrExpiredToken,
            GatewayError::AccountNotFound => ApiError::AccountNotFound,
            GatewayError::AccountDeactivated => ApiError::AccountDeactivated,
            GatewayError::InsufficientRole => ApiError::InsufficientRole,
            GatewayError::Unexpected(detail) => ApiError::Unexpected(detail),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::EmailAlreadyRegistered => ApiError::EmailAlreadyRegistered,
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::InvalidCredentials,
            LoginError::AccountDeactivated => ApiError::AccountDeactivated,
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl From<RefreshError> for ApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::InvalidOrExpiredToken => ApiError::InvalidOrExpiredToken,
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl From<RequestPasswordResetError> for ApiError {
    fn from(error: RequestPasswordResetError) -> Self {
        ApiError::Unexpected(error.to_string())
    }
}

impl From<ConfirmPasswordResetError> for ApiError {
    fn from(error: ConfirmPasswordResetError) -> Self {
        match error {
            ConfirmPasswordResetError::InvalidResetToken => ApiError::InvalidResetToken,
            ConfirmPasswordResetError::ExpiredResetToken => ApiError::ExpiredResetToken,
            ConfirmPasswordResetError::AccountNotFound => ApiError::AccountNotFound,
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl From<GetCurrentUserError> for ApiError {
    fn from(error: GetCurrentUserError) -> Self {
        match error {
            GetCurrentUserError::AccountNotFound => ApiError::AccountNotFound,
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::AccountNotFound => ApiError::AccountNotFound,
            ChangePasswordError::CurrentPasswordIncorrect => ApiError::CurrentPasswordIncorrect,
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl From<UpdateProfileError> for ApiError {
    fn from(error: UpdateProfileError) -> Self {
        match error {
            UpdateProfileError::AccountNotFound => ApiError::AccountNotFound,
            UpdateProfileError::EmailAlreadyInUse => ApiError::EmailAlreadyInUse,
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl From<SetAccountStatusError> for ApiError {
    fn from(error: SetAccountStatusError) -> Self {
        match error {
            SetAccountStatusError::AccountNotFound => ApiError::AccountNotFound,
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl From<ListAccountsError> for ApiError {
    fn from(error: ListAccountsError) -> Self {
        ApiError::Unexpected(error.to_string())
    }
}
