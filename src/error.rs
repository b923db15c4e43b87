use thiserror::Error;

/// Everything that can stop a `vigen` run. Every variant is fatal and maps to
/// exit code 1.
#[derive(Error, Debug)]
pub enum VigenError {
    /// Bad flags or argument count. Carries the parser's diagnostic.
    #[error("{0}")]
    Usage(String),

    #[error("Enter the secret key")]
    MissingKey,

    #[error("    (warning) Press a key on the keyboard!")]
    EmptyKey,

    #[error("Invalid key character '{0}': keys may only contain letters")]
    InvalidKey(char),

    #[error("Unable to open '{0}': File not found")]
    FileOpen(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VigenError {
    pub fn is_usage(&self) -> bool {
        matches!(self, VigenError::Usage(_))
    }
}

pub type Result<T> = std::result::Result<T, VigenError>;
