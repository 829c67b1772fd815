use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};

use carelink_core::{AccessClaims, Account, RefreshClaims, TokenError, TokenIssuer};

/// Signing secret and time-to-live for one token kind.
#[derive(Clone)]
pub struct TokenKindConfig {
    pub secret: Secret<String>,
    pub ttl_seconds: i64,
}

impl TokenKindConfig {
    pub fn new(secret: Secret<String>, ttl_seconds: i64) -> Self {
        Self {
            secret,
            ttl_seconds,
        }
    }

    fn secret_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

/// Stateless JWT issuer holding the two independent secret/expiry pairs.
///
/// Access and refresh tokens are signed with different secrets, so a token
/// of one kind can never pass verification as the other; that separation is
/// the only revocation-adjacent control in the design.
pub struct JwtTokenIssuer {
    access: TokenKindConfig,
    refresh: TokenKindConfig,
}

impl JwtTokenIssuer {
    pub fn new(access: TokenKindConfig, refresh: TokenKindConfig) -> Self {
        Self { access, refresh }
    }

    fn timestamps(ttl_seconds: i64) -> Result<(i64, i64), TokenError> {
        let issued_at = Utc::now();
        let delta = chrono::Duration::try_seconds(ttl_seconds)
            .ok_or_else(|| TokenError::Unexpected("token ttl out of range".to_string()))?;
        let expires_at = issued_at
            .checked_add_signed(delta)
            .ok_or_else(|| TokenError::Unexpected("token expiry out of range".to_string()))?;
        Ok((issued_at.timestamp(), expires_at.timestamp()))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_access(&self, account: &Account) -> Result<String, TokenError> {
        let (iat, exp) = Self::timestamps(self.access.ttl_seconds)?;
        let claims = AccessClaims {
            sub: account.id,
            email: account.email.clone(),
            role: account.role,
            iat,
            exp,
        };
        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.access.secret_bytes()),
        )
        .map_err(|e| TokenError::Unexpected(e.to_string()))
    }

    fn issue_refresh(&self, account: &Account) -> Result<String, TokenError> {
        let (iat, exp) = Self::timestamps(self.refresh.ttl_seconds)?;
        let claims = RefreshClaims {
            sub: account.id,
            email: account.email.clone(),
            iat,
            exp,
        };
        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.refresh.secret_bytes()),
        )
        .map_err(|e| TokenError::Unexpected(e.to_string()))
    }

    fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.access.secret_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::InvalidOrExpired)
    }

    fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.refresh.secret_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::InvalidOrExpired)
    }
}
