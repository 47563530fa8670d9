//! Error types for passhash-core

use thiserror::Error;

/// Result type alias for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;

/// Hashing error types
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Invalid work factor: {0} (bcrypt accepts 4..=31)")]
    InvalidCost(u32),

    #[error("Password is {0} bytes, bcrypt reads at most 72")]
    PasswordTooLong(usize),

    #[error("Hashing primitive failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Hashing task failed: {0}")]
    TaskFailed(String),

    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<tokio::task::JoinError> for HashError {
    fn from(err: tokio::task::JoinError) -> Self {
        HashError::TaskFailed(err.to_string())
    }
}
