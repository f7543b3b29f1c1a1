//! Password hashing and verification
//!
//! Hashes are bcrypt (salted, so hashing the same input twice gives two
//! different strings). Verification never errors: a mismatch and a
//! malformed stored hash both come back as `false`.
//!
//! bcrypt only reads the first 72 bytes of its input, so longer passwords
//! are refused by `hash` and never verify.

use bcrypt::{hash, verify};

use crate::domain::value_objects::{check_password_length, MAX_PASSWORD_BYTES};
use crate::errors::DomainError;

/// Default bcrypt cost
pub const DEFAULT_COST: u32 = 10;

/// One-way credential hashing
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash; fails closed
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// bcrypt-backed [`PasswordHasher`]
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        check_password_length("password", plaintext)?;
        hash(plaintext, self.cost)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        match verify(plaintext, hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                false
            }
        }
    }
}
