//! Persistence contract for accounts.

use async_trait::async_trait;

use stockroom_core::{AccountId, StoreError};

use crate::Account;

/// Persistence collaborator for accounts.
///
/// Lookups are exact-match; `find_by_email` compares with case-sensitive
/// equality. Implementations live in `stockroom-infra`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<Account>, StoreError>;

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError>;

    async fn insert(&self, account: Account) -> Result<(), StoreError>;

    /// Persist changes to an existing account (save/commit).
    async fn update(&self, account: &Account) -> Result<(), StoreError>;

    async fn remove(&self, id: AccountId) -> Result<(), StoreError>;

    async fn list(&self) -> Result<Vec<Account>, StoreError>;
}
