use axum::{Json, extract::State};
use secrecy::Secret;
use serde::Deserialize;

use carelink_application::LoginUseCase;
use carelink_core::{Email, Password};

use super::{SessionResponse, error::ApiError};
use crate::http::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let email = Email::try_from(request.email)?;
    let password = Password::parse(request.password)?;

    let use_case = LoginUseCase::new(
        state.account_store.clone(),
        state.credential_hasher.clone(),
        state.token_issuer.clone(),
    );

    let session = use_case.execute(email, password).await?;

    Ok(Json(SessionResponse {
        account: session.account,
        access_token: session.access_token,
        refresh_token: session.refresh_token,
    }))
}
