//! Account CRUD service.

use std::sync::Arc;

use stockroom_core::{AccountId, DomainError, Envelope};

use crate::account::{
    Account, ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, UserDto,
};
use crate::password::PasswordHasher;
use crate::store::AccountStore;

/// CRUD over accounts.
///
/// Every operation returns a fully-formed envelope; unexpected store
/// failures are logged with the triggering identifier and surface as a
/// generic internal error.
pub struct AccountDirectory {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
}

impl AccountDirectory {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
        }
    }

    pub async fn get(&self, id: AccountId) -> Envelope<UserDto> {
        match self.try_get(id).await {
            Ok(dto) => Envelope::ok(dto),
            Err(err) => self.reject(
                err,
                "get user",
                &id.to_string(),
                "An error occurred while retrieving the user.",
            ),
        }
    }

    pub async fn list(&self) -> Envelope<Vec<UserDto>> {
        match self.store.list().await {
            Ok(accounts) => Envelope::ok(accounts.iter().map(UserDto::from).collect()),
            Err(err) => self.reject(
                err.into(),
                "list users",
                "all",
                "An error occurred while retrieving users.",
            ),
        }
    }

    pub async fn create(&self, request: CreateUserRequest) -> Envelope<UserDto> {
        let email = request.email.clone();
        match self.try_create(request).await {
            Ok(dto) => Envelope::success(dto, "User created successfully."),
            Err(err) => self.reject(
                err,
                "create user",
                &email,
                "An error occurred while creating the user.",
            ),
        }
    }

    pub async fn update(&self, id: AccountId, request: UpdateUserRequest) -> Envelope<UserDto> {
        match self.try_update(id, request).await {
            Ok(dto) => Envelope::success(dto, "User updated successfully."),
            Err(err) => self.reject(
                err,
                "update user",
                &id.to_string(),
                "An error occurred while updating the user.",
            ),
        }
    }

    pub async fn delete(&self, id: AccountId) -> Envelope<bool> {
        match self.try_delete(id).await {
            Ok(()) => Envelope::success(true, "User deleted successfully."),
            Err(err) => self.reject(
                err,
                "delete user",
                &id.to_string(),
                "An error occurred while deleting the user.",
            ),
        }
    }

    pub async fn change_password(
        &self,
        id: AccountId,
        request: ChangePasswordRequest,
    ) -> Envelope<bool> {
        match self.try_change_password(id, request).await {
            Ok(()) => Envelope::success(true, "Password changed successfully."),
            Err(err) => self.reject(
                err,
                "change password",
                &id.to_string(),
                "An error occurred while changing the password.",
            ),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Inner operations (tagged rejection kinds)
    // ─────────────────────────────────────────────────────────────────────

    async fn try_get(&self, id: AccountId) -> Result<UserDto, DomainError> {
        let account = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found."))?;
        Ok(UserDto::from(&account))
    }

    async fn try_create(&self, request: CreateUserRequest) -> Result<UserDto, DomainError> {
        if self.store.email_taken(&request.email).await? {
            return Err(DomainError::already_exists(
                "A user with this email already exists.",
            ));
        }

        let account = Account::new(
            request.email,
            request.full_name,
            self.hasher.hash(&request.password),
            request.role,
            request.active,
        );
        let dto = UserDto::from(&account);
        self.store.insert(account).await?;
        Ok(dto)
    }

    async fn try_update(
        &self,
        id: AccountId,
        request: UpdateUserRequest,
    ) -> Result<UserDto, DomainError> {
        let mut account = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found."))?;

        if account.email != request.email && self.store.email_taken(&request.email).await? {
            return Err(DomainError::already_exists(
                "A user with this email already exists.",
            ));
        }

        account.email = request.email;
        account.full_name = request.full_name;
        account.role = request.role;
        account.active = request.active;
        self.store.update(&account).await?;

        Ok(UserDto::from(&account))
    }

    async fn try_delete(&self, id: AccountId) -> Result<(), DomainError> {
        let account = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found."))?;

        if account.is_admin() {
            return Err(DomainError::protected("Admin user cannot be deleted."));
        }

        self.store.remove(id).await?;
        Ok(())
    }

    async fn try_change_password(
        &self,
        id: AccountId,
        request: ChangePasswordRequest,
    ) -> Result<(), DomainError> {
        let mut account = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found."))?;

        account.password_hash = self.hasher.hash(&request.new_password);
        self.store.update(&account).await?;
        Ok(())
    }

    fn reject<T>(
        &self,
        err: DomainError,
        operation: &str,
        identifier: &str,
        internal_message: &str,
    ) -> Envelope<T> {
        if let DomainError::Store(store_err) = &err {
            tracing::error!(error = %store_err, identifier = %identifier, "{} failed", operation);
        }
        Envelope::from_domain_error(&err, internal_message)
    }
}
