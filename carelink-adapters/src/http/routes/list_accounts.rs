use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};

use carelink_application::ListAccountsUseCase;
use carelink_core::{AccountFilter, AccountWithProfile, Role};

use super::error::ApiError;
use crate::http::{AppState, gateway};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsQuery {
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Serialize)]
pub struct ListAccountsResponse {
    pub accounts: Vec<AccountWithProfile>,
    pub count: usize,
}

#[tracing::instrument(name = "List accounts", skip_all)]
pub async fn list_accounts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<ListAccountsResponse>, ApiError> {
    let caller = gateway::authenticate(
        &headers,
        state.token_issuer.as_ref(),
        state.account_store.as_ref(),
    )
    .await?;
    gateway::require_admin(&caller)?;

    let role = query
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()?;

    let accounts = ListAccountsUseCase::new(state.account_store.clone())
        .execute(AccountFilter {
            role,
            is_active: query.is_active,
        })
        .await?;

    let count = accounts.len();
    Ok(Json(ListAccountsResponse { accounts, count }))
}
