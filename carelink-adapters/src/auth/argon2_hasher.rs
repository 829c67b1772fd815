use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use async_trait::async_trait;

use carelink_core::{CredentialHasher, CredentialHasherError, HashedPassword, Password};

/// Argon2id work-factor parameters. The defaults make hashing deliberately
/// expensive; tests construct much cheaper ones.
#[derive(Debug, Clone, Copy)]
pub struct HashParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: 15000,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Argon2id credential hasher. Each hash gets its own random salt, so equal
/// plaintexts never produce equal hashes. The actual work runs on the
/// blocking pool to keep executor threads free.
#[derive(Debug, Clone)]
pub struct Argon2CredentialHasher {
    params: HashParams,
}

impl Argon2CredentialHasher {
    pub fn new(params: HashParams) -> Self {
        Self { params }
    }

    fn hasher(&self) -> Result<Argon2<'static>, CredentialHasherError> {
        let params = Params::new(
            self.params.memory_kib,
            self.params.iterations,
            self.params.parallelism,
            None,
        )
        .map_err(|e| CredentialHasherError::Unexpected(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<HashedPassword, CredentialHasherError> {
        let hasher = self.hasher()?;
        let password = password.clone();
        let current_span = tracing::Span::current();

        let hash = tokio::task::spawn_blocking(move || -> Result<String, CredentialHasherError> {
            current_span.in_scope(|| {
                let salt = SaltString::generate(rand_core::OsRng);
                hasher
                    .hash_password(password.expose().as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| CredentialHasherError::Unexpected(e.to_string()))
            })
        })
        .await
        .map_err(|e| CredentialHasherError::Unexpected(e.to_string()))??;

        Ok(HashedPassword::new(hash))
    }

    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    async fn verify(
        &self,
        candidate: &Password,
        stored: &HashedPassword,
    ) -> Result<bool, CredentialHasherError> {
        let hasher = self.hasher()?;
        let candidate = candidate.clone();
        let stored = stored.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || -> Result<bool, CredentialHasherError> {
            current_span.in_scope(|| {
                let expected = PasswordHash::new(stored.expose())
                    .map_err(|e| CredentialHasherError::Unexpected(e.to_string()))?;
                Ok(hasher
                    .verify_password(candidate.expose().as_bytes(), &expected)
                    .is_ok())
            })
        })
        .await
        .map_err(|e| CredentialHasherError::Unexpected(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn cheap_hasher() -> Argon2CredentialHasher {
        Argon2CredentialHasher::new(HashParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
    }

    fn password(raw: &str) -> Password {
        Password::parse(Secret::new(raw.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_hash_never_equals_plaintext() {
        let hasher = cheap_hasher();
        let hash = hasher.hash(&password("secret1")).await.unwrap();
        assert_ne!(hash.expose(), "secret1");
    }

    #[tokio::test]
    async fn test_equal_plaintexts_hash_differently() {
        let hasher = cheap_hasher();
        let first = hasher.hash(&password("secret1")).await.unwrap();
        let second = hasher.hash(&password("secret1")).await.unwrap();
        assert_ne!(first.expose(), second.expose());
    }

    #[tokio::test]
    async fn test_verify_accepts_correct_password() {
        let hasher = cheap_hasher();
        let hash = hasher.hash(&password("secret1")).await.unwrap();
        assert!(hasher.verify(&password("secret1"), &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_password() {
        let hasher = cheap_hasher();
        let hash = hasher.hash(&password("secret1")).await.unwrap();
        assert!(!hasher.verify(&password("secret2"), &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_an_error() {
        let hasher = cheap_hasher();
        let result = hasher
            .verify(&password("secret1"), &HashedPassword::new("garbage".to_string()))
            .await;
        assert!(result.is_err());
    }
}
