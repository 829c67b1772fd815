use secrecy::{ExposeSecret, Secret};

use super::ValidationError;

/// A plaintext password, wrapped so it cannot end up in logs or debug output.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Parse a password supplied as a login candidate. Only emptiness is
    /// rejected; the stored hash decides whether it is correct.
    pub fn parse(secret: Secret<String>) -> Result<Self, ValidationError> {
        if secret.expose_secret().is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        Ok(Password(secret))
    }

    /// Parse a password that is about to become a credential (registration,
    /// password change, reset). Enforces the minimum strength rule: at least
    /// 6 characters, at least one digit.
    pub fn parse_new(secret: Secret<String>) -> Result<Self, ValidationError> {
        let raw = secret.expose_secret();
        if raw.chars().count() < 6 || !raw.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::WeakPassword);
        }
        Ok(Password(secret))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// The one-way hash of a password, as produced by the credential hasher.
/// Secret-wrapped: hashes are never serialized into any response.
#[derive(Debug, Clone)]
pub struct HashedPassword(Secret<String>);

impl HashedPassword {
    pub fn new(hash: String) -> Self {
        HashedPassword(Secret::new(hash))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for HashedPassword {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_only_rejects_empty() {
        assert!(Password::parse(Secret::new("x".to_string())).is_ok());
        assert_eq!(
            Password::parse(Secret::new(String::new())).unwrap_err(),
            ValidationError::EmptyPassword
        );
    }

    #[test]
    fn new_credential_requires_length_and_digit() {
        assert!(Password::parse_new(Secret::new("secret1".to_string())).is_ok());
        assert_eq!(
            Password::parse_new(Secret::new("abc1".to_string())).unwrap_err(),
            ValidationError::WeakPassword
        );
        assert_eq!(
            Password::parse_new(Secret::new("abcdefgh".to_string())).unwrap_err(),
            ValidationError::WeakPassword
        );
    }
}
