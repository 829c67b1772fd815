/// Environment variables read by `Settings::load`. All settings share the
/// `CARELINK` prefix with `__` separating nested keys.
pub mod env {
    pub const DATABASE_URL: &str = "CARELINK_DATABASE_URL";
    pub const APP_ADDRESS: &str = "CARELINK_APP_ADDRESS";
    pub const ACCESS_TOKEN_SECRET: &str = "CARELINK_AUTH__ACCESS__SECRET";
    pub const ACCESS_TOKEN_TTL: &str = "CARELINK_AUTH__ACCESS__TTL_SECONDS";
    pub const REFRESH_TOKEN_SECRET: &str = "CARELINK_AUTH__REFRESH__SECRET";
    pub const REFRESH_TOKEN_TTL: &str = "CARELINK_AUTH__REFRESH__TTL_SECONDS";
    pub const RESET_TOKEN_TTL: &str = "CARELINK_AUTH__RESET_TOKEN_TTL_SECONDS";
    pub const POSTMARK_AUTH_TOKEN: &str = "CARELINK_EMAIL__AUTH_TOKEN";
}

pub const DEFAULT_APP_ADDRESS: &str = "0.0.0.0:3000";

/// Access tokens default to 7 days, refresh tokens to 30.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;
pub const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Reset tokens are short-lived by design: one hour.
pub const DEFAULT_RESET_TOKEN_TTL_SECONDS: i64 = 60 * 60;

pub mod email_client {
    use std::time::Duration;

    pub const BASE_URL: &str = "https://api.postmarkapp.com/";
    pub const TIMEOUT: Duration = Duration::from_secs(10);
}
