use axum::{Json, extract::State, http::HeaderMap};

use super::{MessageResponse, error::ApiError};
use crate::http::{AppState, gateway};

/// Bearer tokens are stateless, so logout is an authenticated acknowledgment;
/// the client discards its token pair.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    gateway::authenticate(
        &headers,
        state.token_issuer.as_ref(),
        state.account_store.as_ref(),
    )
    .await?;

    Ok(Json(MessageResponse::new("Logout successful")))
}
