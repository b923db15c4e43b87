use std::fmt;

use crate::error::{Result, VigenError};

/// A normalized secret key: lower-case ASCII letters only, never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Key(String);

/// Drops every character that is not an ASCII letter. Case is preserved.
pub fn strip_non_alpha(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

impl Key {
    /// Builds the key from the raw `-k` argument.
    ///
    /// A raw key of `-e` or `-d` means the key itself was left out and the
    /// mode flag slid into its place.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw == "-e" || raw == "-d" {
            return Err(VigenError::MissingKey);
        }

        let stripped = strip_non_alpha(raw);
        if stripped.is_empty() {
            return Err(VigenError::EmptyKey);
        }

        log::debug!("Key normalized to {} letters", stripped.len());
        Ok(Self(stripped.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the secret out of debug logs.
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key(<{} letters>)", self.0.len())
    }
}
