//! Cryptographic operations for AeTxt.
//!
//! This module provides encryption and key derivation services using
//! well-audited libraries:
//! - **AES-256-GCM**: authenticated encryption (96-bit nonce, 128-bit tag)
//! - **PBKDF2-HMAC-SHA256**: password-based key derivation (100,000 rounds)
//!
//! ## Security Model
//!
//! - One user-supplied password per document; no key management beyond that
//! - A fresh random salt and nonce on every encryption, never reused
//! - Key material zeroized from memory on drop
//! - Decryption failure never reveals whether the password was wrong or the
//!   data was tampered with
//! - No secret material (passwords, keys, plaintext) in log or error output

pub mod key;
pub mod password;
pub mod seal;

pub use key::{derive_key, DerivedKey};
pub use password::validate_password;
pub use seal::{decrypt, encrypt};
