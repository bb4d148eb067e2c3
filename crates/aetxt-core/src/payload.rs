//! The encrypted document payload and its two encodings.
//!
//! A [`SecurePayload`] is the self-contained blob produced by encryption:
//!
//! ```text
//! [ salt (16 bytes) | nonce (12 bytes) | ciphertext + tag (16 bytes) ]
//! ```
//!
//! The binary form is written verbatim to `.aetxt` files. The display form
//! is the same bytes base64-encoded, shown in the editor surface while a
//! document is hidden so the blob can live inside a plain-text widget.
//!
//! The payload carries no magic number and no version field; the layout is
//! fixed.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{AetxtError, Result};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Nonce length in bytes (96 bits, the AES-GCM standard size).
pub const NONCE_LEN: usize = 12;

/// AEAD authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Bytes needed before any sealed data can even be located.
const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

/// Smallest structurally complete payload: header plus the tag an empty
/// plaintext still carries.
pub const MIN_PAYLOAD_LEN: usize = HEADER_LEN + TAG_LEN;

/// An encrypted document blob, immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurePayload {
    bytes: Vec<u8>,
}

impl SecurePayload {
    /// Assemble a payload from freshly generated parts. Only the encryption
    /// path constructs payloads this way.
    pub(crate) fn from_parts(salt: [u8; SALT_LEN], nonce: [u8; NONCE_LEN], sealed: Vec<u8>) -> Self {
        let mut bytes = Vec::with_capacity(HEADER_LEN + sealed.len());
        bytes.extend_from_slice(&salt);
        bytes.extend_from_slice(&nonce);
        bytes.extend_from_slice(&sealed);
        Self { bytes }
    }

    /// Parse a payload from raw bytes (e.g. a file read).
    ///
    /// # Errors
    ///
    /// Returns `AetxtError::Format` if the input is shorter than the fixed
    /// salt+nonce header, or if the remaining sealed data cannot hold the
    /// authentication tag. A blob between those two bounds could never
    /// authenticate, so it is rejected structurally rather than being left
    /// to fail tag verification.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(AetxtError::Format(format!(
                "payload too short to contain salt and nonce ({} bytes, need at least {})",
                bytes.len(),
                HEADER_LEN
            )));
        }
        if bytes.len() < MIN_PAYLOAD_LEN {
            return Err(AetxtError::Format(format!(
                "sealed data shorter than the authentication tag ({} bytes, need at least {})",
                bytes.len(),
                MIN_PAYLOAD_LEN
            )));
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// The binary form, used verbatim for file persistence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the payload, yielding the binary form.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The salt the key was derived with.
    pub fn salt(&self) -> &[u8] {
        &self.bytes[..SALT_LEN]
    }

    /// The AEAD nonce.
    pub fn nonce(&self) -> &[u8] {
        &self.bytes[SALT_LEN..HEADER_LEN]
    }

    /// Ciphertext with the authentication tag appended.
    pub fn sealed(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }

    /// Encode the payload as base64 text for on-screen display.
    pub fn to_display(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Decode a payload from its base64 display form.
    ///
    /// Round-trips exactly with [`SecurePayload::to_display`].
    ///
    /// # Errors
    ///
    /// Returns `AetxtError::Format` on invalid base64 or on a structurally
    /// short payload.
    pub fn from_display(text: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| AetxtError::Format(format!("invalid base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> SecurePayload {
        SecurePayload::from_parts([0xAA; SALT_LEN], [0xBB; NONCE_LEN], vec![0xCC; TAG_LEN + 5])
    }

    #[test]
    fn test_parts_are_sliced_back_out() {
        let payload = sample_payload();
        assert_eq!(payload.salt(), &[0xAA; SALT_LEN]);
        assert_eq!(payload.nonce(), &[0xBB; NONCE_LEN]);
        assert_eq!(payload.sealed(), &[0xCC; TAG_LEN + 5]);
        assert_eq!(payload.as_bytes().len(), SALT_LEN + NONCE_LEN + TAG_LEN + 5);
    }

    #[test]
    fn test_display_round_trip() {
        let payload = sample_payload();
        let text = payload.to_display();
        let back = SecurePayload::from_display(&text).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn test_display_round_trip_survives_surrounding_whitespace() {
        let payload = sample_payload();
        let text = format!("  {}\n", payload.to_display());
        let back = SecurePayload::from_display(&text).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn test_invalid_base64_is_format_error() {
        let result = SecurePayload::from_display("not!!valid@@base64");
        assert!(matches!(result, Err(AetxtError::Format(_))));
    }

    #[test]
    fn test_too_short_for_header_rejected() {
        for len in 0..SALT_LEN + NONCE_LEN {
            let result = SecurePayload::from_bytes(&vec![0u8; len]);
            assert!(
                matches!(result, Err(AetxtError::Format(_))),
                "length {} should be rejected",
                len
            );
        }
    }

    #[test]
    fn test_too_short_for_tag_rejected() {
        // Header fits but the tag cannot: structurally invalid.
        let result = SecurePayload::from_bytes(&[0u8; MIN_PAYLOAD_LEN - 1]);
        assert!(matches!(result, Err(AetxtError::Format(_))));
    }

    #[test]
    fn test_minimum_length_accepted() {
        // Empty plaintext: header + bare tag.
        let payload = SecurePayload::from_bytes(&[0u8; MIN_PAYLOAD_LEN]).unwrap();
        assert_eq!(payload.sealed().len(), TAG_LEN);
    }
}
