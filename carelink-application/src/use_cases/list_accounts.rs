use std::sync::Arc;

use thiserror::Error;

use carelink_core::{AccountFilter, AccountStore, AccountStoreError, AccountWithProfile};

/// Error types for the list-accounts use case
#[derive(Debug, Error)]
pub enum ListAccountsError {
    #[error("account store error: {0}")]
    Store(#[from] AccountStoreError),
}

/// List-accounts use case - the admin listing, filtered by role and active
/// flag. Hash-free by construction; profiles attached.
pub struct ListAccountsUseCase {
    account_store: Arc<dyn AccountStore>,
}

impl ListAccountsUseCase {
    pub fn new(account_store: Arc<dyn AccountStore>) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "ListAccountsUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<AccountWithProfile>, ListAccountsError> {
        let accounts = self.account_store.list_all(filter).await?;
        Ok(accounts)
    }
}
