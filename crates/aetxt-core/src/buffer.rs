//! Dual-buffer text model for stealth editing.
//!
//! A [`DualBuffer`] tracks two parallel character sequences: the
//! authoritative content (what the user actually wrote) and the displayed
//! content (what the screen shows). With stealth off the two are identical.
//! With stealth on, the displayed sequence is a decoy: every letter is
//! replaced by a random letter of the same case, while line breaks and
//! other whitespace pass through untouched, so the document keeps its
//! visual shape but loses its meaning.
//!
//! Decoy glyphs are resampled whenever a decoy must be (re)generated; there
//! is no cached character mapping. A stable mapping would amount to a
//! substitution cipher an onlooker could attack across redraws.
//!
//! Both sequences always have the same length, so cursor offsets and
//! selection ranges are valid in either one.

use std::ops::Range;

use rand::Rng;

const ASCII_LETTERS: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Sample a decoy glyph for one authoritative character.
///
/// Newlines map to newlines and other whitespace to itself, preserving
/// layout. Uppercase maps to random uppercase, lowercase to random
/// lowercase, and anything else (digits, punctuation, symbols) to a random
/// letter of either case. Memoryless: the same input may yield a different
/// glyph on the next call.
fn decoy_char<R: Rng>(c: char, rng: &mut R) -> char {
    if c == '\n' {
        '\n'
    } else if c.is_whitespace() {
        c
    } else if c.is_uppercase() {
        rng.gen_range(b'A'..=b'Z') as char
    } else if c.is_lowercase() {
        rng.gen_range(b'a'..=b'z') as char
    } else {
        ASCII_LETTERS[rng.gen_range(0..ASCII_LETTERS.len())] as char
    }
}

/// Authoritative text plus its on-screen rendering.
///
/// The authoritative sequence is the single source of truth; the displayed
/// sequence is regenerated from it and never persisted. Other components
/// must read real content through [`DualBuffer::actual_text`] and never
/// treat the display as data.
#[derive(Debug, Clone, Default)]
pub struct DualBuffer {
    authoritative: Vec<char>,
    display: Vec<char>,
    stealth: bool,
}

impl DualBuffer {
    /// New empty buffer, stealth off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether stealth obfuscation is currently active.
    pub fn stealth_enabled(&self) -> bool {
        self.stealth
    }

    /// Enable or disable stealth. Idempotent: requesting the current state
    /// does nothing (and does not resample the decoy).
    ///
    /// Turning stealth on publishes a freshly sampled decoy; turning it off
    /// publishes the authoritative content verbatim and discards the decoy.
    pub fn set_stealth(&mut self, enabled: bool) {
        if self.stealth == enabled {
            return;
        }
        self.stealth = enabled;
        if enabled {
            self.resample_decoy();
        } else {
            self.display = self.authoritative.clone();
        }
    }

    /// Regenerate the entire displayed decoy from the authoritative content.
    fn resample_decoy(&mut self) {
        let mut rng = rand::thread_rng();
        self.display = self
            .authoritative
            .iter()
            .map(|&c| decoy_char(c, &mut rng))
            .collect();
    }

    /// Number of characters in the buffer (both sequences, by invariant).
    pub fn len(&self) -> usize {
        self.authoritative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authoritative.is_empty()
    }

    /// Insert `text` at character offset `offset`.
    ///
    /// The authoritative sequence is spliced exactly as a plain editor
    /// would. With stealth on, a decoy glyph is sampled per inserted
    /// character; with stealth off, the characters appear verbatim.
    /// Offsets beyond the end are clamped to an append.
    pub fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.authoritative.len());
        let mut rng = rand::thread_rng();
        for (i, c) in text.chars().enumerate() {
            self.authoritative.insert(offset + i, c);
            let shown = if self.stealth {
                decoy_char(c, &mut rng)
            } else {
                c
            };
            self.display.insert(offset + i, shown);
        }
    }

    /// Delete the character range `[start, end)` from both sequences.
    ///
    /// Covers backspace (range of one before the cursor), forward delete
    /// (range of one after it), and selection removal. Out-of-bounds ends
    /// are clamped.
    pub fn delete(&mut self, range: Range<usize>) {
        let end = range.end.min(self.authoritative.len());
        let start = range.start.min(end);
        self.authoritative.drain(start..end);
        self.display.drain(start..end);
    }

    /// Replace the selection `[start, end)` with `text`: the range is
    /// removed first, then the edit applies as an insert at its start.
    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        let start = range.start.min(self.authoritative.len());
        self.delete(range);
        self.insert(start, text);
    }

    /// The user's real content, regardless of stealth. This is the only
    /// path other components may use to obtain it (for encryption, saving,
    /// and so on).
    pub fn actual_text(&self) -> String {
        self.authoritative.iter().collect()
    }

    /// Replace the authoritative content wholesale. With stealth on, a
    /// fresh decoy is published; otherwise the text appears verbatim.
    pub fn set_actual_text(&mut self, text: &str) {
        self.authoritative = text.chars().collect();
        if self.stealth {
            self.resample_decoy();
        } else {
            self.display = self.authoritative.clone();
        }
    }

    /// The displayed character sequence, as the rendering surface shows it.
    pub fn display(&self) -> &[char] {
        &self.display
    }

    /// The displayed sequence collected into a string.
    pub fn display_text(&self) -> String {
        self.display.iter().collect()
    }
}
