use axum::{Json, extract::State};
use secrecy::Secret;
use serde::Deserialize;

use carelink_application::ConfirmPasswordResetUseCase;
use carelink_core::{Password, ResetToken};

use super::{MessageResponse, error::ApiError};
use crate::http::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let new_password = Password::parse_new(request.new_password)?;
    let token = ResetToken::new(request.token);

    ConfirmPasswordResetUseCase::new(
        state.account_store.clone(),
        state.reset_token_store.clone(),
        state.credential_hasher.clone(),
    )
    .execute(&token, new_password)
    .await?;

    Ok(Json(MessageResponse::new(
        "Password has been reset successfully",
    )))
}
