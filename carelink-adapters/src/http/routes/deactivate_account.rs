use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use uuid::Uuid;

use carelink_application::SetAccountStatusUseCase;

use super::{MessageResponse, error::ApiError};
use crate::http::{AppState, gateway};

/// Accounts are never hard-deleted: the delete endpoint deactivates.
#[tracing::instrument(name = "Deactivate account", skip_all, fields(%id))]
pub async fn deactivate_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let caller = gateway::authenticate(
        &headers,
        state.token_issuer.as_ref(),
        state.account_store.as_ref(),
    )
    .await?;
    gateway::require_self_or_admin(&caller, id)?;

    SetAccountStatusUseCase::new(state.account_store.clone())
        .execute(id, false)
        .await?;

    Ok(Json(MessageResponse::new("Account deactivated successfully")))
}
