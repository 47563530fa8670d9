//! bcrypt password hashing and verification
//!
//! Stored hash format is owned by bcrypt: `$2b${cost}${22-char salt}{31-char hash}`.
//! The work factor is log2 of the number of key-expansion rounds.

use async_trait::async_trait;
use bcrypt::HashParts;
use tracing::{debug, warn};

use super::Password;
use crate::error::{HashError, Result};

/// Default work factor
pub const DEFAULT_COST: u32 = 10;

/// Lowest work factor bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Highest work factor bcrypt accepts
pub const MAX_COST: u32 = 31;

/// Longest password bcrypt reads in full; only the NUL terminator is dropped at this length
pub const MAX_PASSWORD_BYTES: usize = 72;

fn check_length(password: &Password) -> Result<()> {
    if password.byte_len() > MAX_PASSWORD_BYTES {
        debug!("Rejecting a {}-byte password", password.byte_len());
        return Err(HashError::PasswordTooLong(password.byte_len()));
    }
    Ok(())
}

/// Check that a work factor is inside bcrypt's accepted range
pub fn validate_cost(cost: u32) -> Result<u32> {
    if (MIN_COST..=MAX_COST).contains(&cost) {
        Ok(cost)
    } else {
        Err(HashError::InvalidCost(cost))
    }
}

/// Read the work factor embedded in a stored hash
pub fn stored_cost(stored_hash: &str) -> Result<u32> {
    let parts: HashParts = stored_hash.parse()?;
    Ok(parts.get_cost())
}

/// Trait for password hashing backends
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce a stored hash for a plaintext password
    async fn hash(&self, password: &str) -> Result<String>;

    /// Check a plaintext password against a stored hash
    async fn verify(&self, password: &str, stored_hash: &str) -> Result<bool>;

    /// Work factor new hashes are produced with
    fn cost(&self) -> u32;
}

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptHasher {
    cost: u32,
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl BcryptHasher {
    /// Create a hasher with the given work factor
    pub fn new(cost: u32) -> Result<Self> {
        Ok(Self {
            cost: validate_cost(cost)?,
        })
    }

    /// Hash on the current thread
    ///
    /// Passwords over bcrypt's 72-byte input limit are rejected rather than
    /// truncated.
    pub fn hash_blocking(&self, password: &Password) -> Result<String> {
        if password.is_empty() {
            return Err(HashError::EmptyPassword);
        }
        check_length(password)?;

        Ok(bcrypt::hash(password.expose(), self.cost)?)
    }

    /// Verify on the current thread
    pub fn verify_blocking(&self, password: &Password, stored_hash: &str) -> Result<bool> {
        check_length(password)?;

        bcrypt::verify(password.expose(), stored_hash).map_err(|e| {
            warn!("Password verification failed: {}", e);
            HashError::from(e)
        })
    }

    /// Whether a stored hash was produced with a different work factor
    pub fn needs_rehash(&self, stored_hash: &str) -> Result<bool> {
        Ok(stored_cost(stored_hash)? != self.cost)
    }
}

#[async_trait]
impl CredentialHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String> {
        let password = Password::from(password);
        let hasher = *self;
        debug!(cost = hasher.cost, "Hashing password");

        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password)).await?
    }

    async fn verify(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let password = Password::from(password);
        let stored_hash = stored_hash.to_string();

        let hasher = *self;
        debug!("Verifying password");

        tokio::task::spawn_blocking(move || hasher.verify_blocking(&password, &stored_hash))
            .await?
    }

    fn cost(&self) -> u32 {
        self.cost
    }
}

/// Hash a password with the default work factor
pub async fn hash_password(password: &str) -> Result<String> {
    BcryptHasher::default().hash(password).await
}

/// Verify a password against a stored hash
///
/// The work factor is read from the hash itself, so this works for hashes
/// produced with any cost.
pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    BcryptHasher::default().verify(password, stored_hash).await
}
