use std::sync::Arc;

use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use carelink_adapters::{
    auth::{Argon2CredentialHasher, JwtTokenIssuer, TokenKindConfig},
    config::{Settings, constants},
    email::{MockEmailClient, PostmarkEmailClient},
    http::{AppState, api_router},
    persistence::{PostgresAccountStore, PostgresResetTokenStore},
};
use carelink_core::{Email, EmailClient};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Load configuration
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load()?;

    // Setup database connection pool and run migrations
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(settings.database_url.expose_secret())
        .await?;

    sqlx::migrate!().run(&pg_pool).await?;

    // Create stores and crypto components
    let account_store = Arc::new(PostgresAccountStore::new(pg_pool.clone()));
    let reset_token_store = Arc::new(PostgresResetTokenStore::new(
        pg_pool,
        chrono::Duration::seconds(settings.auth.reset_token_ttl_seconds),
    ));
    let credential_hasher = Arc::new(Argon2CredentialHasher::new(settings.auth.hash.clone().into()));
    let token_issuer = Arc::new(JwtTokenIssuer::new(
        TokenKindConfig::new(
            settings.auth.access.secret.clone(),
            settings.auth.access_ttl_seconds(),
        ),
        TokenKindConfig::new(
            settings.auth.refresh.secret.clone(),
            settings.auth.refresh_ttl_seconds(),
        ),
    ));

    // Create email client
    let email_client: Arc<dyn EmailClient> = match &settings.email {
        Some(email) => {
            let http_client = HttpClient::builder()
                .timeout(constants::email_client::TIMEOUT)
                .build()?;
            let sender = Email::try_from(email.sender.clone())?;
            Arc::new(PostmarkEmailClient::new(
                email.base_url.clone(),
                sender,
                email.auth_token.clone(),
                http_client,
            ))
        }
        None => {
            tracing::warn!("no email provider configured; reset emails will not be delivered");
            Arc::new(MockEmailClient::new())
        }
    };

    // Build router
    let state = AppState {
        account_store,
        reset_token_store,
        credential_hasher,
        token_issuer,
        email_client,
    };

    let app = api_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.app_address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
