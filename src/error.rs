use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("invalid request: {0}")]
    Validation(String),

    /// Absent, expired and already-taken entries are deliberately
    /// indistinguishable to callers.
    #[error("secret not found or already destroyed")]
    NotFound,

    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Wrong key, corrupted data or a failed authentication tag.
    /// The cause is intentionally not recorded.
    #[error("decryption failed: invalid key or corrupted data")]
    Decryption,

    /// Backing store unreachable or misbehaving. Never conflated with
    /// `NotFound`; callers may retry `store`, but not `take`.
    #[error("backing store unavailable: {0}")]
    Infrastructure(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for VaultError {
    fn from(e: sqlx::Error) -> Self {
        VaultError::Infrastructure(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
