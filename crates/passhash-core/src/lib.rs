//! # passhash-core
//!
//! Password hashing for passhash including:
//! - bcrypt hashing and verification off the async executor
//! - Tunable work factor with stored-hash cost inspection
//! - JSON settings file for the work factor
//! - Plaintext handling with zeroize-on-drop security

pub mod crypto;
pub mod error;
pub mod settings;

pub use crypto::{
    hash_password, stored_cost, verify_password, BcryptHasher, CredentialHasher, Password,
    DEFAULT_COST,
};
pub use error::{HashError, Result};
pub use settings::{HashSettings, SettingsManager, SETTINGS_VERSION};
