use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use uuid::Uuid;

use carelink_application::GetCurrentUserUseCase;
use carelink_core::AccountWithProfile;

use super::error::ApiError;
use crate::http::{AppState, gateway};

#[tracing::instrument(name = "Get account", skip_all, fields(%id))]
pub async fn get_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountWithProfile>, ApiError> {
    let caller = gateway::authenticate(
        &headers,
        state.token_issuer.as_ref(),
        state.account_store.as_ref(),
    )
    .await?;
    gateway::require_self_or_admin(&caller, id)?;

    let account = GetCurrentUserUseCase::new(state.account_store.clone())
        .execute(id)
        .await?;

    Ok(Json(account))
}
