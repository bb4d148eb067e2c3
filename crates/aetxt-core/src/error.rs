//! Error types for AeTxt core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages.

use thiserror::Error;

/// Result type alias for AeTxt operations.
pub type Result<T> = std::result::Result<T, AetxtError>;

/// Core error type for AeTxt operations.
#[derive(Debug, Error)]
pub enum AetxtError {
    /// Payload is structurally malformed: too short to hold its fixed
    /// header, or its display form is not valid base64.
    #[error("Malformed payload: {0}")]
    Format(String),

    /// AEAD tag verification failed. This single variant covers both a
    /// wrong password and corrupted or tampered ciphertext; the two cases
    /// are never told apart.
    #[error("Incorrect password or corrupted content")]
    Authentication,

    /// Unexpected cipher failure (e.g. plaintext exceeds AES-GCM limits)
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Edit attempted while the document is hidden
    #[error("Document is hidden and read-only")]
    ReadOnly,

    /// User dismissed a password prompt
    #[error("Password entry cancelled")]
    Cancelled,

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
