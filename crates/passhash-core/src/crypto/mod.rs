//! Password hashing primitives
//!
//! This module provides:
//! - bcrypt hashing and verification run on the blocking pool
//! - Work-factor validation and inspection of stored hashes
//! - Zeroize-on-drop handling of plaintext passwords

mod hasher;
mod secure_memory;

pub use hasher::{
    hash_password, stored_cost, validate_cost, verify_password, BcryptHasher, CredentialHasher,
    DEFAULT_COST, MAX_COST, MAX_PASSWORD_BYTES, MIN_COST,
};
pub use secure_memory::Password;
