pub mod hashmap_account_store;
pub mod hashmap_reset_token_store;
pub mod postgres_account_store;
pub mod postgres_reset_token_store;

pub use hashmap_account_store::HashMapAccountStore;
pub use hashmap_reset_token_store::HashMapResetTokenStore;
pub use postgres_account_store::PostgresAccountStore;
pub use postgres_reset_token_store::PostgresResetTokenStore;

use rand::distr::{Alphanumeric, SampleString};

use carelink_core::ResetToken;

const RESET_TOKEN_LENGTH: usize = 48;

/// Generate an opaque, high-entropy reset token (48 alphanumeric characters,
/// ~285 bits).
pub(crate) fn generate_reset_token() -> ResetToken {
    ResetToken::new(Alphanumeric.sample_string(&mut rand::rng(), RESET_TOKEN_LENGTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique_and_sized() {
        let first = generate_reset_token();
        let second = generate_reset_token();
        assert_eq!(first.as_str().len(), RESET_TOKEN_LENGTH);
        assert_ne!(first, second);
    }
}
