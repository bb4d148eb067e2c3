//! Authenticated encryption of document content.
//!
//! AES-256-GCM with a key derived from the user's password. Every call to
//! [`encrypt`] draws a fresh salt and nonce from the OS RNG, so encrypting
//! identical plaintext twice yields different payloads - a required
//! property, not an artifact.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{AetxtError, Result};
use crate::payload::{SecurePayload, NONCE_LEN, SALT_LEN};

use super::key::derive_key;

/// Encrypt `plaintext` under `password` into a self-contained payload.
///
/// Generates a random 16-byte salt and 12-byte nonce, derives the key via
/// PBKDF2-HMAC-SHA256, and seals the plaintext with AES-256-GCM (no
/// associated data). Blocking: key derivation runs 100,000 rounds.
///
/// # Errors
///
/// Returns `AetxtError::InvalidInput` for an empty password.
///
/// # Examples
///
/// ```
/// use aetxt_core::crypto::{encrypt, decrypt};
///
/// let payload = encrypt(b"dear diary", "my-password").unwrap();
/// let plaintext = decrypt(&payload, "my-password").unwrap();
/// assert_eq!(plaintext, b"dear diary");
/// ```
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<SecurePayload> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(password, &salt)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|_| AetxtError::Crypto("AEAD seal failed".to_string()))?;

    Ok(SecurePayload::from_parts(salt, nonce_bytes, sealed))
}

/// Decrypt a payload, returning the original plaintext.
///
/// Derives the key from the payload's own salt and performs the AEAD open.
/// Blocking, like [`encrypt`].
///
/// # Errors
///
/// Returns `AetxtError::Authentication` when tag verification fails. A
/// wrong password and tampered ciphertext are deliberately
/// indistinguishable here; disambiguating them would weaken the
/// authentication guarantee.
pub fn decrypt(payload: &SecurePayload, password: &str) -> Result<Vec<u8>> {
    let key = derive_key(password, payload.salt())?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    cipher
        .decrypt(Nonce::from_slice(payload.nonce()), payload.sealed())
        .map_err(|_| AetxtError::Authentication)
}
