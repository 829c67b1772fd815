use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use carelink_application::UpdateProfileUseCase;
use carelink_core::{AccountWithProfile, DisplayName, Email, ProfileChanges};

use super::error::ApiError;
use crate::http::{AppState, gateway};

/// Partial update: absent fields are left untouched, and fields that do not
/// apply to the account's role are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub diagnosis_date: Option<NaiveDate>,
    pub diagnosis_type: Option<String>,
    pub profile_photo: Option<String>,
    pub phone: Option<String>,
    pub relationship: Option<String>,
}

#[tracing::instrument(name = "Update account", skip_all, fields(%id))]
pub async fn update_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<AccountWithProfile>, ApiError> {
    let caller = gateway::authenticate(
        &headers,
        state.token_issuer.as_ref(),
        state.account_store.as_ref(),
    )
    .await?;
    gateway::require_self_or_admin(&caller, id)?;

    let changes = ProfileChanges {
        email: request.email.map(Email::try_from).transpose()?,
        name: request.name.map(DisplayName::try_from).transpose()?,
        date_of_birth: request.date_of_birth,
        diagnosis_date: request.diagnosis_date,
        diagnosis_type: request.diagnosis_type,
        profile_photo: request.profile_photo,
        phone: request.phone,
        relationship: request.relationship,
    };

    let updated = UpdateProfileUseCase::new(state.account_store.clone())
        .execute(id, changes)
        .await?;

    Ok(Json(updated))
}
