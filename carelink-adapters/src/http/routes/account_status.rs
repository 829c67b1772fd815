use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::Deserialize;
use uuid::Uuid;

use carelink_application::SetAccountStatusUseCase;
use carelink_core::Account;

use super::error::ApiError;
use crate::http::{AppState, gateway};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatusRequest {
    pub is_active: bool,
}

#[tracing::instrument(name = "Set account status", skip_all, fields(%id))]
pub async fn account_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<AccountStatusRequest>,
) -> Result<Json<Account>, ApiError> {
    let caller = gateway::authenticate(
        &headers,
        state.token_issuer.as_ref(),
        state.account_store.as_ref(),
    )
    .await?;
    gateway::require_admin(&caller)?;

    let account = SetAccountStatusUseCase::new(state.account_store.clone())
        .execute(id, request.is_active)
        .await?;

    Ok(Json(account))
}
