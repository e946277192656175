//! Sealing license plaintext to and from disk.
//!
//! A sealed license is a single line: `base64url(plaintext).base64url(signature)`
//!
//! The Ed25519 signature covers `plaintext_b64.as_bytes()` (the encoded
//! segment, not the raw plaintext). The plaintext is signed, not encrypted.

use crate::error::{SealError, SealResult};
use crate::keys::{fingerprint, signing_key_from_bytes, verifying_key_from_bytes};
use crate::stream::ByteStream;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Plaintext recovered by [`SigningEngine::inspect`], with the identity of
/// the key that verified it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    /// Verified plaintext bytes.
    pub plaintext: Vec<u8>,
    /// Fingerprint of the verifying key.
    pub signer: String,
}

/// Protects license plaintext on disk.
pub trait SigningEngine {
    /// Seals `plaintext` with the private key in `key` and writes it to `output`.
    fn create(&self, key: &ByteStream, output: &Path, plaintext: &[u8]) -> SealResult<()>;

    /// Reads and verifies `input` against the public key in `key`.
    fn inspect(&self, key: &ByteStream, input: &Path) -> SealResult<Inspection>;

    /// Reads and verifies `input`, returning only the plaintext.
    fn extract(&self, key: &ByteStream, input: &Path) -> SealResult<Vec<u8>> {
        self.inspect(key, input).map(|inspection| inspection.plaintext)
    }
}

/// Ed25519 signing engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Engine;

impl Ed25519Engine {
    /// Seals plaintext into its single-line text form.
    #[must_use]
    pub fn seal(signing_key: &SigningKey, plaintext: &[u8]) -> String {
        let payload_b64 = URL_SAFE_NO_PAD.encode(plaintext);
        let signature = signing_key.sign(payload_b64.as_bytes());
        let sig_b64 = URL_SAFE_NO_PAD.encode(signature.to_bytes());
        format!("{payload_b64}.{sig_b64}")
    }

    /// Verifies a sealed line and returns its plaintext.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is malformed or the signature does not
    /// verify against `verifying_key`.
    pub fn open(verifying_key: &VerifyingKey, sealed: &str) -> SealResult<Vec<u8>> {
        let sealed = sealed.trim();

        let (payload_b64, signature_b64) = sealed
            .split_once('.')
            .filter(|(_, signature)| !signature.contains('.'))
            .ok_or_else(|| {
                SealError::InvalidLicenseFormat(
                    "expected exactly two parts separated by a dot".to_string(),
                )
            })?;

        let sig_bytes = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|e| {
            SealError::InvalidLicenseFormat(format!("invalid signature base64: {e}"))
        })?;
        let signature = Signature::from_slice(&sig_bytes).map_err(|_| {
            SealError::InvalidLicenseFormat("invalid signature length".to_string())
        })?;

        verifying_key
            .verify(payload_b64.as_bytes(), &signature)
            .map_err(|_| SealError::InvalidSignature)?;

        URL_SAFE_NO_PAD.decode(payload_b64).map_err(|e| {
            SealError::InvalidLicenseFormat(format!("invalid payload base64: {e}"))
        })
    }

    fn read_sealed(input: &Path) -> SealResult<String> {
        let bytes = fs::read(input)?;
        String::from_utf8(bytes)
            .map_err(|_| SealError::InvalidLicenseFormat("license file is not text".to_string()))
    }
}

impl SigningEngine for Ed25519Engine {
    fn create(&self, key: &ByteStream, output: &Path, plaintext: &[u8]) -> SealResult<()> {
        debug!(key = %key.describe(), output = %output.display(), "sealing license");
        let signing_key = signing_key_from_bytes(&key.read_all()?)?;
        let sealed = Self::seal(&signing_key, plaintext);
        fs::write(output, format!("{sealed}\n"))?;
        Ok(())
    }

    fn inspect(&self, key: &ByteStream, input: &Path) -> SealResult<Inspection> {
        debug!(key = %key.describe(), input = %input.display(), "opening license");
        let verifying_key = verifying_key_from_bytes(&key.read_all()?)?;
        let sealed = Self::read_sealed(input)?;
        let plaintext = Self::open(&verifying_key, &sealed)?;
        Ok(Inspection {
            plaintext,
            signer: fingerprint(&verifying_key),
        })
    }
}
