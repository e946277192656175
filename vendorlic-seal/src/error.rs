//! Error types for the signing engine.

use thiserror::Error;

/// Signing engine errors.
#[derive(Debug, Error)]
pub enum SealError {
    /// Reading a key or reading/writing a license file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key material could not be parsed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The license file is not a sealed record.
    #[error("invalid license file: {0}")]
    InvalidLicenseFormat(String),

    /// Ed25519 signature verification failed.
    #[error("license signature invalid")]
    InvalidSignature,
}

/// Result type for signing engine operations.
pub type SealResult<T> = Result<T, SealError>;
