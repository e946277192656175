//! Ed25519 key loading.
//!
//! Private keys are accepted as a raw 32-byte seed, a 64-byte seed+public
//! keypair, PKCS#8 DER or PEM, or standard base64 text of the raw forms.
//! Public keys are accepted as raw 32 bytes, SPKI DER or PEM, or base64 text.

use crate::error::{SealError, SealResult};
use base64::{
    engine::general_purpose::{STANDARD as BASE64, STANDARD_NO_PAD as BASE64_NO_PAD},
    Engine,
};
use ed25519_dalek::pkcs8::{DecodePrivateKey, DecodePublicKey};
use ed25519_dalek::{SigningKey, VerifyingKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Parses a private key from any supported encoding.
///
/// # Errors
///
/// Returns [`SealError::InvalidKey`] if no encoding matches.
pub fn signing_key_from_bytes(bytes: &[u8]) -> SealResult<SigningKey> {
    if let Some(pem) = pem_text(bytes) {
        return SigningKey::from_pkcs8_pem(pem)
            .map_err(|e| SealError::InvalidKey(format!("PKCS#8 PEM: {e}")));
    }
    if let Some(key) = raw_signing_key(bytes)? {
        return Ok(key);
    }
    if let Ok(key) = SigningKey::from_pkcs8_der(bytes) {
        return Ok(key);
    }

    let decoded = base64_text(bytes).ok_or_else(|| unrecognised("private", bytes.len()))?;
    raw_signing_key(&decoded)?.ok_or_else(|| unrecognised("private", decoded.len()))
}

/// Parses a public key from any supported encoding.
///
/// # Errors
///
/// Returns [`SealError::InvalidKey`] if no encoding matches or the bytes
/// are not a valid curve point.
pub fn verifying_key_from_bytes(bytes: &[u8]) -> SealResult<VerifyingKey> {
    if let Some(pem) = pem_text(bytes) {
        return VerifyingKey::from_public_key_pem(pem)
            .map_err(|e| SealError::InvalidKey(format!("SPKI PEM: {e}")));
    }
    if let Some(key) = raw_verifying_key(bytes)? {
        return Ok(key);
    }
    if let Ok(key) = VerifyingKey::from_public_key_der(bytes) {
        return Ok(key);
    }

    let decoded = base64_text(bytes).ok_or_else(|| unrecognised("public", bytes.len()))?;
    raw_verifying_key(&decoded)?.ok_or_else(|| unrecognised("public", decoded.len()))
}

/// Short, stable identifier for a public key.
#[must_use]
pub fn fingerprint(key: &VerifyingKey) -> String {
    let hash = Sha256::digest(key.as_bytes());
    BASE64_NO_PAD.encode(&hash[..16])
}

fn raw_signing_key(bytes: &[u8]) -> SealResult<Option<SigningKey>> {
    if let Ok(seed) = <&[u8; SECRET_KEY_LENGTH]>::try_from(bytes) {
        return Ok(Some(SigningKey::from_bytes(seed)));
    }
    if let Ok(keypair) = <&[u8; KEYPAIR_LENGTH]>::try_from(bytes) {
        return SigningKey::from_keypair_bytes(keypair)
            .map(Some)
            .map_err(|_| SealError::InvalidKey("keypair halves do not match".to_string()));
    }
    Ok(None)
}

fn raw_verifying_key(bytes: &[u8]) -> SealResult<Option<VerifyingKey>> {
    match <&[u8; PUBLIC_KEY_LENGTH]>::try_from(bytes) {
        Ok(raw) => VerifyingKey::from_bytes(raw)
            .map(Some)
            .map_err(|_| SealError::InvalidKey("not a valid Ed25519 public key".to_string())),
        Err(_) => Ok(None),
    }
}

fn pem_text(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes)
        .ok()
        .map(str::trim)
        .filter(|text| text.starts_with("-----BEGIN"))
}

fn base64_text(bytes: &[u8]) -> Option<Zeroizing<Vec<u8>>> {
    let text = std::str::from_utf8(bytes).ok()?.trim();
    BASE64.decode(text).ok().map(Zeroizing::new)
}

fn unrecognised(kind: &str, len: usize) -> SealError {
    SealError::InvalidKey(format!("unrecognised {kind} key encoding ({len} bytes)"))
}
