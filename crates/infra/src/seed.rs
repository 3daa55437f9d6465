//! Default data created at startup.

use stockroom_auth::{Account, AccountStore, PasswordHasher, Role};
use stockroom_core::StoreError;

/// Admin identity used when the environment does not override it.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@stockroom.local";
pub const DEFAULT_ADMIN_PASSWORD: &str = "P@ssw0rd";

/// Seed the admin account unless one already holds `email`.
pub async fn seed_admin(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
) -> Result<(), StoreError> {
    if store.email_taken(email).await? {
        return Ok(());
    }

    let hasher = PasswordHasher::new();
    let account = Account::new(
        email,
        "Admin User",
        hasher.hash(password),
        Some(Role::Admin),
        true,
    );

    tracing::info!(email = %account.email, "seeded admin account");
    store.insert(account).await
}
