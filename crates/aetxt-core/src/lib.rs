//! # AeTxt Core
//!
//! Core library for AeTxt - a password-protected text editor whose documents
//! live on disk only as authenticated encrypted blobs.
//!
//! This crate provides the security-critical logic independent of any user
//! interface:
//!
//! - **crypto**: password-based key derivation and authenticated encryption
//! - **payload**: the `salt ‖ nonce ‖ sealed` byte layout and its base64
//!   display form
//! - **buffer**: the dual-buffer text model (authoritative content plus an
//!   obfuscated on-screen decoy)
//! - **document**: the Editable ⇄ Hidden visibility state machine and file
//!   persistence
//! - **panic**: the double-tap panic trigger that ratchets toward concealment
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of an encrypted `.aetxt` file
//! - A bystander reading the screen (stealth decoy, Hidden view)
//! - Offline brute-force attacks on the password
//!
//! We do NOT defend against:
//! - An attacker who can read process memory while a document is open
//! - Compromised OS / keylogger

pub mod buffer;
pub mod crypto;
pub mod document;
pub mod error;
mod fs;
pub mod panic;
pub mod payload;

pub use buffer::DualBuffer;
pub use document::{DocumentSession, DocumentState, PasswordPrompt, Visibility};
pub use error::{AetxtError, Result};
pub use panic::{PanicOutcome, PanicTrigger};
pub use payload::SecurePayload;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
