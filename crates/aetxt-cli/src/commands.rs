//! Subcommand implementations.
//!
//! Each command drives a [`DocumentSession`] so that the CLI exercises the
//! exact code paths the editor uses, rather than re-implementing them.

use std::fs;
use std::path::Path;

use anyhow::Context;

use aetxt_core::document::with_default_extension;
use aetxt_core::{DocumentSession, SecurePayload};

use crate::password::CliPrompt;

/// Encrypt a plaintext file into an `.aetxt` payload.
pub fn encrypt(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("could not read {}", input.display()))?;

    let target = match output {
        Some(path) => with_default_extension(path),
        None => input.with_extension("aetxt"),
    };

    let mut session = DocumentSession::new();
    session
        .set_actual_text(&text)
        .context("could not stage content")?;
    session
        .save_as(&target, &mut CliPrompt)
        .with_context(|| format!("could not write {}", target.display()))?;

    println!("Saved: {}", target.display());
    Ok(())
}

/// Decrypt an `.aetxt` file and print or write the plaintext.
pub fn decrypt(file: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let mut session = DocumentSession::new();
    session
        .open(file, &mut CliPrompt)
        .with_context(|| format!("could not open {}", file.display()))?;

    let text = session.actual_text();
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("could not write {}", path.display()))?;
            println!("Wrote: {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

/// Print a payload's structure and display form without decrypting it.
pub fn show(file: &Path) -> anyhow::Result<()> {
    let bytes = fs::read(file).with_context(|| format!("could not read {}", file.display()))?;
    let payload = SecurePayload::from_bytes(&bytes)
        .with_context(|| format!("{} is not a valid payload", file.display()))?;

    println!("File:   {}", file.display());
    println!("Size:   {} bytes", payload.as_bytes().len());
    println!("Salt:   {} bytes", payload.salt().len());
    println!("Nonce:  {} bytes", payload.nonce().len());
    println!("Sealed: {} bytes (ciphertext + 16-byte tag)", payload.sealed().len());
    println!();
    println!("{}", payload.to_display());
    Ok(())
}
