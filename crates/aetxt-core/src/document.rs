//! Document session: the Editable ⇄ Hidden visibility state machine plus
//! file persistence.
//!
//! A [`DocumentSession`] owns the session state (current path, session
//! password, visibility) and the text buffer, and is the single place the
//! cross-component invariant is enforced: "Hidden" and the stealth decoy
//! are mutually exclusive, so at most one obfuscation layer is ever active.
//!
//! All operations are synchronous; `hide`, `reveal`, `open` and `save` run
//! key derivation (100,000 PBKDF2 rounds) and block for its duration.

use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::buffer::DualBuffer;
use crate::crypto::{seal, validate_password};
use crate::error::{AetxtError, Result};
use crate::fs::write_atomic;
use crate::payload::SecurePayload;

/// Conventional extension for encrypted document files.
pub const FILE_EXTENSION: &str = "aetxt";

/// Append the `.aetxt` extension when the path has none.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(FILE_EXTENSION)
    }
}

/// On-screen visibility of the document content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Real content on screen, editable.
    Editable,
    /// Base64 display form of an encrypted payload on screen, read-only.
    Hidden,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Editable
    }
}

/// Collaborator surface for obtaining a password from the user.
///
/// `confirm` is set when a new password is being established (the UI should
/// ask twice) rather than re-entered. Returning `None` means the user
/// cancelled; the operation aborts with state unchanged.
pub trait PasswordPrompt {
    fn request_password(&mut self, confirm: bool) -> Option<Zeroizing<String>>;
}

/// Mutable session state, created on editor start and reset by
/// "new document".
#[derive(Default)]
pub struct DocumentState {
    file_path: Option<PathBuf>,
    session_password: Option<Zeroizing<String>>,
    visibility: Visibility,
}

impl std::fmt::Debug for DocumentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentState")
            .field("file_path", &self.file_path)
            .field(
                "session_password",
                &self.session_password.as_ref().map(|_| "[REDACTED]"),
            )
            .field("visibility", &self.visibility)
            .finish()
    }
}

impl DocumentState {
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn has_session_password(&self) -> bool {
        self.session_password.is_some()
    }
}

/// The orchestrating component: owns the state and the buffer, and drives
/// every Editable ⇄ Hidden transition.
#[derive(Default)]
pub struct DocumentSession {
    state: DocumentState,
    buffer: DualBuffer,
    /// Base64 blob shown while Hidden. `Some` exactly when visibility is
    /// Hidden.
    hidden_display: Option<String>,
}

impl DocumentSession {
    /// Empty document: Editable, stealth off, no password, no path.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn buffer(&self) -> &DualBuffer {
        &self.buffer
    }

    pub fn visibility(&self) -> Visibility {
        self.state.visibility
    }

    pub fn is_read_only(&self) -> bool {
        self.state.visibility == Visibility::Hidden
    }

    pub fn has_session_password(&self) -> bool {
        self.state.has_session_password()
    }

    pub fn stealth_enabled(&self) -> bool {
        self.buffer.stealth_enabled()
    }

    /// What the rendering surface should currently show: the cipher blob
    /// while Hidden, otherwise whatever the buffer publishes (decoy or
    /// plaintext).
    pub fn display_text(&self) -> String {
        match &self.hidden_display {
            Some(blob) => blob.clone(),
            None => self.buffer.display_text(),
        }
    }

    /// The user's real content. Valid in any visibility state; never the
    /// decoy, never the cipher blob.
    pub fn actual_text(&self) -> String {
        self.buffer.actual_text()
    }

    fn ensure_editable(&self) -> Result<()> {
        match self.state.visibility {
            Visibility::Editable => Ok(()),
            Visibility::Hidden => Err(AetxtError::ReadOnly),
        }
    }

    /// Insert typed text at a character offset. Rejected while Hidden.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        self.ensure_editable()?;
        self.buffer.insert(offset, text);
        Ok(())
    }

    /// Delete a character range. Rejected while Hidden.
    pub fn delete(&mut self, range: std::ops::Range<usize>) -> Result<()> {
        self.ensure_editable()?;
        self.buffer.delete(range);
        Ok(())
    }

    /// Replace a selection with new text. Rejected while Hidden.
    pub fn replace(&mut self, range: std::ops::Range<usize>, text: &str) -> Result<()> {
        self.ensure_editable()?;
        self.buffer.replace(range, text);
        Ok(())
    }

    /// Replace the whole content. Rejected while Hidden.
    pub fn set_actual_text(&mut self, text: &str) -> Result<()> {
        self.ensure_editable()?;
        self.buffer.set_actual_text(text);
        Ok(())
    }

    /// Toggle the stealth decoy. Rejected while Hidden: a hidden document
    /// must show the cipher blob itself, never a decoy layered on top, so
    /// the two obfuscation mechanisms stay mutually exclusive.
    pub fn set_stealth(&mut self, enabled: bool) -> Result<()> {
        self.ensure_editable()?;
        self.buffer.set_stealth(enabled);
        Ok(())
    }

    /// Change the session password for subsequent hide/save operations.
    /// Takes effect on disk only at the next save.
    pub fn set_session_password(&mut self, password: &str) -> Result<()> {
        validate_password(password)?;
        self.state.session_password = Some(Zeroizing::new(password.to_string()));
        Ok(())
    }

    /// The session password if set, otherwise whatever the prompt yields.
    fn password_or_prompt(
        &self,
        prompt: &mut dyn PasswordPrompt,
        confirm: bool,
    ) -> Result<Zeroizing<String>> {
        if let Some(password) = &self.state.session_password {
            return Ok(password.clone());
        }
        prompt
            .request_password(confirm)
            .ok_or(AetxtError::Cancelled)
    }

    /// Editable → Hidden: encrypt the real content and put the base64 blob
    /// on screen, read-only. Uses the session password, prompting (and
    /// adopting the answer) if none is set. No-op when already Hidden.
    pub fn hide(&mut self, prompt: &mut dyn PasswordPrompt) -> Result<()> {
        if self.state.visibility == Visibility::Hidden {
            return Ok(());
        }
        let password = self.password_or_prompt(prompt, true)?;
        validate_password(&password)?;
        self.hide_with_password(&password)?;
        self.state.session_password = Some(password);
        Ok(())
    }

    /// The transition itself. Also the panic path, which supplies the
    /// session password directly and must never prompt.
    fn hide_with_password(&mut self, password: &str) -> Result<()> {
        let payload = seal::encrypt(self.buffer.actual_text().as_bytes(), password)?;
        // Stealth off before the blob goes up: the Hidden view shows the
        // real cipher text.
        self.buffer.set_stealth(false);
        self.hidden_display = Some(payload.to_display());
        self.state.visibility = Visibility::Hidden;
        Ok(())
    }

    /// Hide using the already-established session password.
    pub(crate) fn hide_with_session_password(&mut self) -> Result<()> {
        let password = match &self.state.session_password {
            Some(password) => password.clone(),
            None => {
                return Err(AetxtError::InvalidInput(
                    "No session password set".to_string(),
                ))
            }
        };
        self.hide_with_password(&password)
    }

    /// Hidden → Editable: decode the on-screen blob, decrypt it under
    /// `password`, and restore the plaintext for editing.
    ///
    /// On `Authentication` or `Format` failure the transition does not
    /// occur: the document stays Hidden with its display untouched.
    /// No-op when already Editable.
    pub fn reveal(&mut self, password: &str) -> Result<()> {
        if self.state.visibility == Visibility::Editable {
            return Ok(());
        }
        let blob = self.hidden_display.as_deref().unwrap_or_default();
        let payload = SecurePayload::from_display(blob)?;
        let text = decrypt_to_text(&payload, password)?;

        self.buffer.set_actual_text(&text);
        self.hidden_display = None;
        self.state.visibility = Visibility::Editable;
        self.state.session_password = Some(Zeroizing::new(password.to_string()));
        Ok(())
    }

    /// Reset to a fresh empty document: Editable, stealth off, no password,
    /// no path.
    pub fn new_document(&mut self) {
        self.state = DocumentState::default();
        self.buffer = DualBuffer::new();
        self.hidden_display = None;
    }

    /// Open an encrypted file, replacing the current document.
    ///
    /// An empty file is a valid fresh container and needs no password.
    /// Every failure path (read error, cancelled prompt, bad payload,
    /// wrong password) leaves the previous document untouched.
    pub fn open(&mut self, path: &Path, prompt: &mut dyn PasswordPrompt) -> Result<()> {
        let data = fs::read(path)?;
        if data.is_empty() {
            self.install(String::new(), path.to_path_buf(), None);
            return Ok(());
        }

        let password = prompt
            .request_password(false)
            .ok_or(AetxtError::Cancelled)?;
        let payload = SecurePayload::from_bytes(&data)?;
        let text = decrypt_to_text(&payload, &password)?;

        self.install(text, path.to_path_buf(), Some(password));
        Ok(())
    }

    fn install(&mut self, text: String, path: PathBuf, password: Option<Zeroizing<String>>) {
        self.buffer = DualBuffer::new();
        self.buffer.set_actual_text(&text);
        self.hidden_display = None;
        self.state = DocumentState {
            file_path: Some(path),
            session_password: password,
            visibility: Visibility::Editable,
        };
    }

    /// Save to the session's current path. Fails with `InvalidInput` when
    /// no path is set yet; callers then ask the user for one and use
    /// [`DocumentSession::save_as`].
    pub fn save(&mut self, prompt: &mut dyn PasswordPrompt) -> Result<()> {
        let path = match &self.state.file_path {
            Some(path) => path.clone(),
            None => {
                return Err(AetxtError::InvalidInput(
                    "Document has no file path yet".to_string(),
                ))
            }
        };
        self.save_as(&path, prompt)
    }

    /// Encrypt the real content and write the binary payload to `path`.
    ///
    /// Always reads through `actual_text()` and encrypts with the session
    /// password (prompting if absent) - independent of the on-screen
    /// visibility, which is left exactly as it was. A failed save never
    /// mutates the in-memory document.
    pub fn save_as(&mut self, path: &Path, prompt: &mut dyn PasswordPrompt) -> Result<()> {
        let password = self.password_or_prompt(prompt, true)?;
        validate_password(&password)?;

        let payload = seal::encrypt(self.buffer.actual_text().as_bytes(), &password)?;
        write_atomic(path, payload.as_bytes())?;

        self.state.file_path = Some(path.to_path_buf());
        self.state.session_password = Some(password);
        Ok(())
    }
}

fn decrypt_to_text(payload: &SecurePayload, password: &str) -> Result<String> {
    let plaintext = seal::decrypt(payload, password)?;
    String::from_utf8(plaintext)
        .map_err(|_| AetxtError::Format("decrypted content is not valid UTF-8".to_string()))
}
