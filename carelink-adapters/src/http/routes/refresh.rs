use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use carelink_application::RefreshUseCase;

use super::error::ApiError;
use crate::http::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

#[tracing::instrument(name = "Refresh", skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let use_case = RefreshUseCase::new(state.account_store.clone(), state.token_issuer.clone());

    let access_token = use_case.execute(&request.refresh_token).await?;

    Ok(Json(RefreshResponse { access_token }))
}
