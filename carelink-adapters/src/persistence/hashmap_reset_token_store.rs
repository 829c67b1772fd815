use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use carelink_core::{Email, ResetToken, ResetTokenStore, ResetTokenStoreError};

use super::generate_reset_token;

struct ResetEntry {
    email: Email,
    token: ResetToken,
    expires_at: DateTime<Utc>,
    used: bool,
}

/// In-memory reset-token store. The write lock around `consume` plays the
/// role of the conditional update in the Postgres store: a token flips to
/// used exactly once.
#[derive(Clone)]
pub struct HashMapResetTokenStore {
    entries: Arc<RwLock<Vec<ResetEntry>>>,
    ttl: Duration,
}

impl HashMapResetTokenStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            ttl,
        }
    }
}

#[async_trait]
impl ResetTokenStore for HashMapResetTokenStore {
    async fn issue(&self, email: &Email) -> Result<ResetToken, ResetTokenStoreError> {
        let token = generate_reset_token();
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| ResetTokenStoreError::Unexpected("ttl out of range".to_string()))?;

        let mut entries = self.entries.write().await;
        for entry in entries.iter_mut().filter(|entry| &entry.email == email) {
            entry.used = true;
        }
        entries.push(ResetEntry {
            email: email.clone(),
            token: token.clone(),
            expires_at,
            used: false,
        });

        Ok(token)
    }

    async fn consume(&self, token: &ResetToken) -> Result<Email, ResetTokenStoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .iter_mut()
            .find(|entry| &entry.token == token && !entry.used)
            .ok_or(ResetTokenStoreError::InvalidToken)?;

        entry.used = true;
        if Utc::now() > entry.expires_at {
            return Err(ResetTokenStoreError::ExpiredToken);
        }

        Ok(entry.email.clone())
    }
}
