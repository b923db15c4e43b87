// Classic Vigenère substitution over the 26 lower-case ASCII letters.
// Anything that is not an ASCII letter passes through untouched, but still
// advances the key position.

use crate::error::{Result, VigenError};

pub const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
const LEN_ALPHABET: usize = ALPHABET.len();

/// Output file used for every decryption, regardless of the input name.
pub const CLEAR_TEXT_FILE: &str = "clear_text.txt";

/// Extension appended to the input name when encrypting.
pub const ENCRYPTED_EXT: &str = "vig";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl Mode {
    /// Transforms one raw line (without its `\n`). Bytes that are not ASCII
    /// letters are copied as-is, so the input need not be valid UTF-8.
    pub fn apply(self, line: &[u8], key: &str) -> Result<Vec<u8>> {
        match self {
            Mode::Encrypt => encrypt(line, key),
            Mode::Decrypt => decrypt(line, key),
        }
    }
}

/// Lower-cases the key and turns it into alphabet offsets.
fn key_shifts(key: &str) -> Result<Vec<usize>> {
    if key.is_empty() {
        return Err(VigenError::EmptyKey);
    }
    key.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                Ok(index_of(c.to_ascii_lowercase() as u8))
            } else {
                Err(VigenError::InvalidKey(c))
            }
        })
        .collect()
}

fn index_of(letter: u8) -> usize {
    (letter - ALPHABET[0]) as usize
}

fn substitute<F>(line: &[u8], shifts: &[usize], shift: F) -> Vec<u8>
where
    F: Fn(usize, usize) -> usize,
{
    let mut out = Vec::with_capacity(line.len() + 1);
    for (i, &b) in line.iter().enumerate() {
        if !b.is_ascii_alphabetic() {
            out.push(b);
            continue;
        }
        let pos = shift(index_of(b.to_ascii_lowercase()), shifts[i % shifts.len()]);
        out.push(ALPHABET[pos]);
    }
    out.push(b'\n');
    out
}

/// Encrypts one line. Letters come out lower-case and the result ends with a
/// newline. An empty line yields an empty result (no newline).
pub fn encrypt(line: &[u8], key: &str) -> Result<Vec<u8>> {
    let shifts = key_shifts(key)?;
    if line.is_empty() {
        return Ok(Vec::new());
    }
    Ok(substitute(line, &shifts, |p, k| (p + k) % LEN_ALPHABET))
}

/// Inverse of [`encrypt`]. Case is not restored.
pub fn decrypt(line: &[u8], key: &str) -> Result<Vec<u8>> {
    let shifts = key_shifts(key)?;
    Ok(substitute(line, &shifts, |c, k| (c + LEN_ALPHABET - k) % LEN_ALPHABET))
}
