use axum::{Json, extract::State};
use serde::Deserialize;

use carelink_application::RequestPasswordResetUseCase;
use carelink_core::Email;

use super::{MessageResponse, error::ApiError};
use crate::http::AppState;

/// The one acknowledgment this endpoint ever returns, whether or not the
/// email belongs to an account.
const GENERIC_ACK: &str = "If that email is registered, password reset instructions have been sent.";

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = Email::try_from(request.email)?;

    RequestPasswordResetUseCase::new(
        state.account_store.clone(),
        state.reset_token_store.clone(),
        state.email_client.clone(),
    )
    .execute(email)
    .await?;

    Ok(Json(MessageResponse::new(GENERIC_ACK)))
}
