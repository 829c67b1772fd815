use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use secrecy::Secret;
use serde::Deserialize;
use uuid::Uuid;

use carelink_application::ChangePasswordUseCase;
use carelink_core::Password;

use super::{MessageResponse, error::ApiError};
use crate::http::{AppState, gateway};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Secret<String>,
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Change password", skip_all, fields(%id))]
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let caller = gateway::authenticate(
        &headers,
        state.token_issuer.as_ref(),
        state.account_store.as_ref(),
    )
    .await?;

    // Passwords can only be changed by their owner, admin or not.
    if caller.id != id {
        return Err(ApiError::InsufficientRole);
    }

    let current_password = Password::parse(request.current_password)?;
    let new_password = Password::parse_new(request.new_password)?;

    ChangePasswordUseCase::new(state.account_store.clone(), state.credential_hasher.clone())
        .execute(id, current_password, new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}
