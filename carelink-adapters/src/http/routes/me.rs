use axum::{Json, extract::State, http::HeaderMap};

use carelink_application::GetCurrentUserUseCase;
use carelink_core::AccountWithProfile;

use super::error::ApiError;
use crate::http::{AppState, gateway};

#[tracing::instrument(name = "Get current user", skip_all)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AccountWithProfile>, ApiError> {
    let caller = gateway::authenticate(
        &headers,
        state.token_issuer.as_ref(),
        state.account_store.as_ref(),
    )
    .await?;

    let account = GetCurrentUserUseCase::new(state.account_store.clone())
        .execute(caller.id)
        .await?;

    Ok(Json(account))
}
