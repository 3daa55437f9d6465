//! Password hashing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

/// One-way, deterministic password transform.
///
/// `hash` is pure: the same input always yields the same output, so stored
/// hashes compare by string equality. The scheme is unsalted SHA-256
/// rendered as base64; DESIGN.md records the production caveat.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password into its storable form.
    pub fn hash(&self, plaintext: &str) -> String {
        let digest = Sha256::digest(plaintext.as_bytes());
        STANDARD.encode(digest)
    }

    /// Verify by recomputing and comparing for equality.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        self.hash(plaintext) == stored_hash
    }
}
