//! Password input for the CLI.

use std::io::IsTerminal;

use dialoguer::Password;
use zeroize::Zeroizing;

use aetxt_core::crypto::validate_password;
use aetxt_core::PasswordPrompt;

/// Obtain a password from `AETXT_PASSWORD` or an interactive prompt.
///
/// `confirm` asks for the password twice when a new one is being set.
pub fn obtain_password(confirm: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var("AETXT_PASSWORD") {
        if !value.trim().is_empty() {
            return Ok(Zeroizing::new(value));
        }
    }

    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "No password provided and no TTY available. Set AETXT_PASSWORD."
        ));
    }

    loop {
        let mut builder = Password::new().with_prompt("Password");
        if confirm {
            builder = builder.with_confirmation("Confirm password", "Passwords do not match");
        }
        let password = builder
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
        if let Err(err) = validate_password(&password) {
            eprintln!("{}", err);
            continue;
        }
        return Ok(Zeroizing::new(password));
    }
}

/// [`PasswordPrompt`] implementation backed by [`obtain_password`].
pub struct CliPrompt;

impl PasswordPrompt for CliPrompt {
    fn request_password(&mut self, confirm: bool) -> Option<Zeroizing<String>> {
        obtain_password(confirm).ok()
    }
}
