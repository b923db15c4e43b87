use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cipher::{Mode, CLEAR_TEXT_FILE, ENCRYPTED_EXT};
use crate::error::{Result, VigenError};
use crate::key::Key;

/// Where a run in `mode` writes its result for `input`.
pub fn output_path(input: &Path, mode: Mode) -> PathBuf {
    match mode {
        Mode::Encrypt => {
            let mut name = input.as_os_str().to_owned();
            name.push(".");
            name.push(ENCRYPTED_EXT);
            PathBuf::from(name)
        }
        Mode::Decrypt => PathBuf::from(CLEAR_TEXT_FILE),
    }
}

/// Encrypts `input` into `<input>.vig`.
pub fn encrypt_to_file(input: &Path, key: &Key) -> Result<PathBuf> {
    let output = output_path(input, Mode::Encrypt);
    transform_file(input, &output, key, Mode::Encrypt)?;
    Ok(output)
}

/// Decrypts `input` into `clear_text.txt` in the current directory.
pub fn decrypt_to_file(input: &Path, key: &Key) -> Result<PathBuf> {
    let output = output_path(input, Mode::Decrypt);
    transform_file(input, &output, key, Mode::Decrypt)?;
    Ok(output)
}

/// Runs every line of `input` through the cipher and writes the results to
/// `output`, truncating it. The input is opened first so a missing input
/// never leaves an empty output behind.
pub fn transform_file(input: &Path, output: &Path, key: &Key, mode: Mode) -> Result<usize> {
    let from_file = File::open(input)
        .map_err(|_| VigenError::FileOpen(input.display().to_string()))?;
    let mut reader = BufReader::new(from_file);
    let mut writer = BufWriter::new(File::create(output)?);

    // Lines are raw bytes: anything that is not an ASCII letter, invalid
    // UTF-8 included, is copied through.
    let mut line = Vec::new();
    let mut count = 0;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let text = line.strip_suffix(b"\n".as_slice()).unwrap_or(&line);
        writer.write_all(&mode.apply(text, key.as_str())?)?;
        count += 1;
    }
    writer.flush()?;

    log::debug!(
        "{:?}: {} lines from {} to {}",
        mode,
        count,
        input.display(),
        output.display()
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn key(raw: &str) -> Key {
        Key::parse(raw).unwrap()
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("notes.txt"), Mode::Encrypt),
            PathBuf::from("notes.txt.vig")
        );
        assert_eq!(
            output_path(Path::new("dir/notes.txt.vig"), Mode::Decrypt),
            PathBuf::from("clear_text.txt")
        );
    }

    #[test]
    fn test_encrypt_to_file_writes_vig() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plain.txt");
        fs::write(&input, "Hello, World!\nattack at dawn\n").unwrap();

        let output = encrypt_to_file(&input, &key("key")).unwrap();
        assert_eq!(output, dir.path().join("plain.txt.vig"));
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "rijvs, ambpb!\nkxrkgi er hygr\n"
        );
    }

    #[test]
    fn test_round_trip_lowercases() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plain.txt");
        let encrypted = dir.path().join("plain.txt.vig");
        let decrypted = dir.path().join("out.txt");
        fs::write(&input, "Hello, World!\nLine 2: OK").unwrap();

        let k = key("Se3cr3t!");
        transform_file(&input, &encrypted, &k, Mode::Encrypt).unwrap();
        let lines = transform_file(&encrypted, &decrypted, &k, Mode::Decrypt).unwrap();

        assert_eq!(lines, 2);
        assert_eq!(
            fs::read_to_string(&decrypted).unwrap(),
            "hello, world!\nline 2: ok\n"
        );
    }

    #[test]
    fn test_blank_lines_dropped_on_encrypt() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plain.txt");
        let output = dir.path().join("plain.txt.vig");
        fs::write(&input, "a\n\nb\n").unwrap();

        let lines = transform_file(&input, &output, &key("b"), Mode::Encrypt).unwrap();
        assert_eq!(lines, 3);
        assert_eq!(fs::read_to_string(&output).unwrap(), "b\nc\n");
    }

    #[test]
    fn test_carriage_return_passes_through() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("crlf.txt");
        let output = dir.path().join("crlf.txt.vig");
        fs::write(&input, "ab\r\n").unwrap();

        transform_file(&input, &output, &key("b"), Mode::Encrypt).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "bc\r\n");
    }

    #[test]
    fn test_invalid_utf8_input_is_copied_through() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("latin1.txt");
        let encrypted = dir.path().join("latin1.txt.vig");
        let decrypted = dir.path().join("out.txt");
        fs::write(&input, b"ab\xe9cd\nxy\n").unwrap();

        let lines = transform_file(&input, &encrypted, &key("b"), Mode::Encrypt).unwrap();
        assert_eq!(lines, 2);
        assert_eq!(fs::read(&encrypted).unwrap(), b"bc\xe9de\nyz\n");

        transform_file(&encrypted, &decrypted, &key("b"), Mode::Decrypt).unwrap();
        assert_eq!(fs::read(&decrypted).unwrap(), b"ab\xe9cd\nxy\n");
    }

    #[test]
    fn test_output_is_truncated() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plain.txt");
        let output = dir.path().join("plain.txt.vig");
        fs::write(&input, "a\n").unwrap();
        fs::write(&output, "stale content\nmore stale content\n").unwrap();

        transform_file(&input, &output, &key("a"), Mode::Encrypt).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "a\n");
    }

    #[test]
    fn test_missing_input_creates_no_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("missing.txt");

        let err = encrypt_to_file(&input, &key("key")).unwrap_err();
        assert!(matches!(err, VigenError::FileOpen(_)));
        assert!(err.to_string().starts_with("Unable to open '"));
        assert!(err.to_string().ends_with("missing.txt': File not found"));
        assert!(!dir.path().join("missing.txt.vig").exists());
    }
}
