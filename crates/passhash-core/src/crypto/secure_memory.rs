//! Plaintext password handling with automatic zeroization

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Plaintext password - automatically zeroed when dropped
///
/// Hashing runs on the blocking pool, so the plaintext has to be owned by the
/// job. Wrapping it here keeps that copy from outliving the call.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Password {
    value: String,
}

impl Password {
    /// Take ownership of a plaintext password
    pub fn new(value: String) -> Self {
        Self { value }
    }

    /// Get the plaintext (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Length in bytes, which is what bcrypt's 72-byte limit counts
    pub fn byte_len(&self) -> usize {
        self.value.len()
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("value", &"[REDACTED]")
            .finish()
    }
}
