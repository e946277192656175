//! Error types for license record encoding and decoding.

use thiserror::Error;

/// Errors raised by the record codec and the validity window normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The buffer ended before a field could be read.
    #[error("record truncated reading {field}: need {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// Vendor name does not fit the fixed-width field with its terminator.
    #[error("vendor name is {len} bytes long (max {max})")]
    VendorNameTooLong { len: usize, max: usize },

    /// Vendor name contains a NUL, lacks a terminator, or is not UTF-8.
    #[error("malformed vendor name: {0}")]
    MalformedVendorName(String),

    /// Format version zero is never issued.
    #[error("no such license format version (0)")]
    NoSuchVersion,

    /// The record was written by a newer tool.
    #[error("license format version {found} is newer than supported (up to {supported})")]
    UnsupportedNewerVersion { found: u64, supported: u64 },

    /// A version inside the supported range that has no decoder.
    #[error("unknown license format version {0}")]
    UnknownVersion(u64),

    /// The timestamp lies outside the representable calendar range.
    #[error("timestamp {0} is outside the representable date range")]
    DateOverflow(i64),
}

/// Result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;
