//! Signing engine for license records.
//!
//! This crate handles:
//! - Loading Ed25519 keys from memory or disk
//! - Sealing plaintext into a signed single-line license file
//! - Verifying a license file and recovering its plaintext
//!
//! It knows nothing about the plaintext layout; callers encode and decode
//! records themselves.

mod engine;
mod error;
mod keys;
mod stream;

pub use engine::{Ed25519Engine, Inspection, SigningEngine};
pub use error::{SealError, SealResult};
pub use keys::{fingerprint, signing_key_from_bytes, verifying_key_from_bytes};
pub use stream::ByteStream;
