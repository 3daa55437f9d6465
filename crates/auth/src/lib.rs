//! `stockroom-auth` — authentication and identity.
//!
//! Credential verification, access/refresh token issuance, and the account
//! directory. This crate is intentionally decoupled from HTTP and storage;
//! persistence enters through the [`AccountStore`] trait.

pub mod account;
pub mod directory;
pub mod password;
pub mod roles;
pub mod session;
pub mod store;
pub mod token;

pub use account::{Account, ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, UserDto};
pub use directory::AccountDirectory;
pub use password::PasswordHasher;
pub use roles::Role;
pub use session::{
    AuthError, LoginRequest, RefreshRequest, SessionIssuer, TokenPair, REFRESH_TOKEN_TTL_DAYS,
};
pub use store::AccountStore;
pub use token::{generate_refresh_token, AccessClaims, AuthConfig, TokenError, TokenSigner};
