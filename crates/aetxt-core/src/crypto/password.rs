//! Password validation.
//!
//! The engine itself only rejects empty passwords; anything else is the
//! user's choice. The UI layer calls this before ever reaching the engine.

use crate::error::{AetxtError, Result};

/// Validate that a password is usable for key derivation.
///
/// Rejects empty or whitespace-only passwords with
/// `AetxtError::InvalidInput`.
///
/// # Examples
///
/// ```
/// use aetxt_core::crypto::validate_password;
///
/// assert!(validate_password("hunter2").is_ok());
/// assert!(validate_password("   ").is_err());
/// ```
pub fn validate_password(password: &str) -> Result<()> {
    if password.trim().is_empty() {
        return Err(AetxtError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("abc").is_ok());
        assert!(validate_password("long password with spaces and symbols!@#").is_ok());
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(validate_password("").is_err());
        assert!(validate_password("   ").is_err());
        assert!(validate_password("\n\t").is_err());
    }
}
