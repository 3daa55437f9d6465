//! Account: the identity record behind authentication and user management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{AccountId, Entity};

use crate::Role;

/// Role claim value used when an account has no role assigned.
pub const DEFAULT_ROLE_CLAIM: &str = "User";

/// Identity record.
///
/// # Invariants
/// - `email` is unique across accounts (case-sensitive equality).
/// - At most one live refresh token; reissuing overwrites the prior one.
/// - Accounts holding [`Role::Admin`] are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub active: bool,
    pub role: Option<Role>,
    pub refresh_token: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(
        email: impl Into<String>,
        full_name: impl Into<String>,
        password_hash: impl Into<String>,
        role: Option<Role>,
        active: bool,
    ) -> Self {
        Self {
            id: AccountId::new(),
            email: email.into(),
            full_name: full_name.into(),
            password_hash: password_hash.into(),
            active,
            role,
            refresh_token: None,
            refresh_token_expires_at: None,
        }
    }

    /// Role claim value: the role name, or [`DEFAULT_ROLE_CLAIM`] when unset.
    pub fn role_name(&self) -> &'static str {
        self.role.map(|r| r.as_str()).unwrap_or(DEFAULT_ROLE_CLAIM)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Wire representation of an account (no credential material).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDto {
    pub id: AccountId,
    pub email: String,
    pub full_name: String,
    pub role: Option<Role>,
    pub active: bool,
}

impl From<&Account> for UserDto {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: account.role,
            active: account.active,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub full_name: String,
    pub role: Option<Role>,
    pub active: bool,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub full_name: String,
    pub role: Option<Role>,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_claim_defaults_when_unset() {
        let mut account = Account::new("a@x.com", "A", "hash", None, true);
        assert_eq!(account.role_name(), "User");

        account.role = Some(Role::Auditor);
        assert_eq!(account.role_name(), "Auditor");
    }

    #[test]
    fn dto_drops_credential_material() {
        let account = Account::new("a@x.com", "A", "hash", Some(Role::Admin), true);
        let dto = UserDto::from(&account);
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refresh_token").is_none());
        assert_eq!(json["role"], serde_json::json!("Admin"));
    }
}
