use ::config::{Config, ConfigError, Environment};
use secrecy::Secret;
use serde::Deserialize;

use super::constants;
use crate::auth::HashParams;

/// Process-wide configuration, loaded once at startup from `CARELINK`-
/// prefixed environment variables (see `config::constants::env`) and never
/// mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_app_address")]
    pub app_address: String,
    pub database_url: Secret<String>,
    pub auth: AuthSettings,
    #[serde(default)]
    pub email: Option<EmailSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub access: TokenSettings,
    pub refresh: TokenSettings,
    #[serde(default = "default_reset_token_ttl")]
    pub reset_token_ttl_seconds: i64,
    #[serde(default)]
    pub hash: HashSettings,
}

/// One secret/expiry pair. The two kinds carry different defaults, so the
/// TTL stays optional here and is resolved by the accessors below.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub secret: Secret<String>,
    pub ttl_seconds: Option<i64>,
}

impl AuthSettings {
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access
            .ttl_seconds
            .unwrap_or(constants::DEFAULT_ACCESS_TOKEN_TTL_SECONDS)
    }

    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh
            .ttl_seconds
            .unwrap_or(constants::DEFAULT_REFRESH_TOKEN_TTL_SECONDS)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HashSettings {
    #[serde(default = "default_hash_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_hash_iterations")]
    pub iterations: u32,
    #[serde(default = "default_hash_parallelism")]
    pub parallelism: u32,
}

impl Default for HashSettings {
    fn default() -> Self {
        Self {
            memory_kib: default_hash_memory_kib(),
            iterations: default_hash_iterations(),
            parallelism: default_hash_parallelism(),
        }
    }
}

impl From<HashSettings> for HashParams {
    fn from(settings: HashSettings) -> Self {
        HashParams {
            memory_kib: settings.memory_kib,
            iterations: settings.iterations,
            parallelism: settings.parallelism,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    #[serde(default = "default_email_base_url")]
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("CARELINK").separator("__"))
            .build()?
            .try_deserialize()
    }
}

fn default_app_address() -> String {
    constants::DEFAULT_APP_ADDRESS.to_string()
}

fn default_reset_token_ttl() -> i64 {
    constants::DEFAULT_RESET_TOKEN_TTL_SECONDS
}

fn default_hash_memory_kib() -> u32 {
    HashParams::default().memory_kib
}

fn default_hash_iterations() -> u32 {
    HashParams::default().iterations
}

fn default_hash_parallelism() -> u32 {
    HashParams::default().parallelism
}

fn default_email_base_url() -> String {
    constants::email_client::BASE_URL.to_string()
}
