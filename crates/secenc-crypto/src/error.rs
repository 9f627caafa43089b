//! Crypto error types

use std::path::PathBuf;

use thiserror::Error;

/// Error produced by the key store or a cipher.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// AEAD tag mismatch, OAEP padding check failure, or a ciphertext
    /// envelope too damaged to reach the tag check. No partial
    /// plaintext accompanies this error.
    #[error("authentication failure: {0}")]
    AuthenticationFailure(String),

    /// Key material could not be loaded or created.
    #[error("key unavailable at {path}: {reason}")]
    KeyUnavailable {
        /// Backing file of the key that failed.
        path: PathBuf,
        /// What went wrong (filesystem error, generation failure).
        reason: String,
    },

    /// Key material exists but is unusable (wrong length, bad PEM).
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// The cipher rejected the operation (e.g. plaintext beyond the
    /// OAEP size limit).
    #[error("cipher rejected the operation: {0}")]
    Cipher(String),
}

/// Result alias used throughout the crypto crate.
pub type Result<T> = std::result::Result<T, CryptoError>;
