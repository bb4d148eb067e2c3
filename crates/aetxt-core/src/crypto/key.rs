//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module derives encryption keys from passwords. PBKDF2 at 100,000
//! rounds keeps offline brute-force attacks expensive while staying in the
//! tens-of-milliseconds range on desktop hardware. Callers should treat
//! derivation as a blocking, latency-visible operation.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{AetxtError, Result};

/// PBKDF2 iteration count.
const PBKDF2_ROUNDS: u32 = 100_000;

/// Length of the salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
const KEY_LENGTH: usize = 32;

/// A cryptographic key derived from a password.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped, reducing the window of exposure. A key exists only for
/// the duration of one encrypt/decrypt call and is never persisted.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate
    /// encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a password and a 16-byte salt.
///
/// Deterministic: the same password and salt always produce the same key,
/// and a different salt produces a different key (which is why the salt is
/// stored alongside the ciphertext).
///
/// # Errors
///
/// Returns `AetxtError::InvalidInput` if the password is empty or the salt
/// is not exactly [`SALT_LENGTH`] bytes.
///
/// # Examples
///
/// ```
/// use aetxt_core::crypto::derive_key;
///
/// let salt = b"0123456789abcdef";
/// let key = derive_key("my-password", salt).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &str, salt: &[u8]) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(AetxtError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    if salt.len() != SALT_LENGTH {
        return Err(AetxtError::InvalidInput(format!(
            "Salt must be exactly {} bytes (got {})",
            SALT_LENGTH,
            salt.len()
        )));
    }

    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut key_bytes);

    Ok(DerivedKey::from_bytes(key_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let password = "test-password";
        let salt = b"fixed-salt-16byt";

        let key1 = derive_key(password, salt).unwrap();
        let key2 = derive_key(password, salt).unwrap();

        // Same password + salt should produce identical keys
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let password = "test-password";
        let salt1 = b"salt-number-0001";
        let salt2 = b"salt-number-0002";

        let key1 = derive_key(password, salt1).unwrap();
        let key2 = derive_key(password, salt2).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let salt = b"fixed-salt-16byt";

        let key1 = derive_key("password-one", salt).unwrap();
        let key2 = derive_key("password-two", salt).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_password_rejected() {
        let salt = b"fixed-salt-16byt";
        let result = derive_key("", salt);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Password cannot be empty"));
    }

    #[test]
    fn test_wrong_salt_length_rejected() {
        assert!(derive_key("test-password", b"short").is_err());
        assert!(derive_key("test-password", b"seventeen-bytes!!").is_err());
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key("test-password", b"fixed-salt-16byt").unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        // Should NOT contain actual key bytes
        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
