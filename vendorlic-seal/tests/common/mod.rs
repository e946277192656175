//! Shared test helpers for engine tests.

#![allow(dead_code)]

use ed25519_dalek::SigningKey;
use std::path::Path;
use vendorlic_seal::ByteStream;

/// Returns a deterministic Ed25519 key pair from a fixed seed.
pub fn test_keypair() -> (SigningKey, [u8; 32]) {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    let signing_key = SigningKey::from_bytes(&seed);
    let verifying_key = signing_key.verifying_key();
    (signing_key, verifying_key.to_bytes())
}

/// A second, unrelated key pair.
pub fn other_keypair() -> (SigningKey, [u8; 32]) {
    let signing_key = SigningKey::from_bytes(&[0x5a; 32]);
    let verifying_key = signing_key.verifying_key();
    (signing_key, verifying_key.to_bytes())
}

/// Private key as an in-memory stream.
pub fn private_stream(key: &SigningKey) -> ByteStream {
    ByteStream::from(key.to_bytes().to_vec())
}

/// Public key as an in-memory stream.
pub fn public_stream(key: &[u8; 32]) -> ByteStream {
    ByteStream::from(key.to_vec())
}

/// Writes `bytes` to `dir/name` and returns a file-backed stream for it.
pub fn key_file(dir: &Path, name: &str, bytes: &[u8]) -> ByteStream {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    ByteStream::file(path)
}
