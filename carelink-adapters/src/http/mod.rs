pub mod gateway;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use carelink_core::{AccountStore, CredentialHasher, EmailClient, ResetTokenStore, TokenIssuer};

/// Shared handles handed to every route. All of it is immutable after
/// startup; the stores synchronize internally.
#[derive(Clone)]
pub struct AppState {
    pub account_store: Arc<dyn AccountStore>,
    pub reset_token_store: Arc<dyn ResetTokenStore>,
    pub credential_hasher: Arc<dyn CredentialHasher>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub email_client: Arc<dyn EmailClient>,
}

/// Build the full API router. Mirrors the HTTP surface 1:1: auth endpoints
/// under `/api/v1/auth`, account management under `/api/v1/users`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/auth/register", post(routes::register))
        .route("/api/v1/auth/login", post(routes::login))
        .route("/api/v1/auth/refresh", post(routes::refresh))
        .route("/api/v1/auth/logout", post(routes::logout))
        .route("/api/v1/auth/me", get(routes::me))
        .route("/api/v1/auth/forgot-password", post(routes::forgot_password))
        .route("/api/v1/auth/reset-password", post(routes::reset_password))
        .route("/api/v1/users", get(routes::list_accounts))
        .route(
            "/api/v1/users/{id}",
            get(routes::get_account)
                .put(routes::update_account)
                .delete(routes::deactivate_account),
        )
        .route("/api/v1/users/{id}/password", put(routes::change_password))
        .route("/api/v1/users/{id}/status", patch(routes::account_status))
        .with_state(state)
}
