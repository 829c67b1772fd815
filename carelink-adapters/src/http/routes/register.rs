use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use secrecy::Secret;
use serde::Deserialize;

use carelink_application::{NewRegistration, RegisterUseCase};
use carelink_core::{DisplayName, Email, Password, Role};

use super::{SessionResponse, error::ApiError};
use crate::http::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: Secret<String>,
    /// Defaults to `patient` when omitted.
    #[serde(default)]
    pub role: Option<String>,
    pub name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = Email::try_from(request.email)?;
    let password = Password::parse_new(request.password)?;
    let role = match request.role.as_deref() {
        Some(raw) => raw.parse::<Role>()?,
        None => Role::Patient,
    };
    let name = DisplayName::try_from(request.name)?;

    let use_case = RegisterUseCase::new(
        state.account_store.clone(),
        state.credential_hasher.clone(),
        state.token_issuer.clone(),
    );

    let session = use_case
        .execute(NewRegistration {
            email,
            password,
            role,
            name,
            date_of_birth: request.date_of_birth,
            phone: request.phone,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            account: session.account,
            access_token: session.access_token,
            refresh_token: session.refresh_token,
        }),
    ))
}
