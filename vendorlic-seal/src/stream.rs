//! Byte stream backends for key material.

use crate::error::SealResult;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// A source of bytes: an in-memory buffer or a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteStream {
    /// Bytes held in memory, typically embedded key material.
    Memory(Cow<'static, [u8]>),
    /// A file read in full on demand.
    File(PathBuf),
}

impl ByteStream {
    /// Wraps a static buffer.
    #[must_use]
    pub const fn embedded(bytes: &'static [u8]) -> Self {
        Self::Memory(Cow::Borrowed(bytes))
    }

    /// Refers to a file on disk.
    #[must_use]
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// Reads the whole stream into a buffer that is wiped on drop.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a file-backed stream cannot be read.
    pub fn read_all(&self) -> SealResult<Zeroizing<Vec<u8>>> {
        match self {
            Self::Memory(bytes) => Ok(Zeroizing::new(bytes.to_vec())),
            Self::File(path) => Ok(Zeroizing::new(fs::read(path)?)),
        }
    }

    /// Describes the stream for log output without exposing its contents.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Memory(bytes) => format!("<memory: {} bytes>", bytes.len()),
            Self::File(path) => path.display().to_string(),
        }
    }
}

impl From<Vec<u8>> for ByteStream {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Memory(Cow::Owned(bytes))
    }
}
