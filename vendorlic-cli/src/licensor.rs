//! Executes resolved requests against a signing engine.

use crate::embedded::{DEFAULT_VERIFYING_KEY, TEST_SIGNING_SEED, TEST_VERIFYING_KEY};
use crate::options::{TimeUnit, ValidityPeriod};
use crate::resolve::Request;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use vendorlic_record::{
    decode, encode, end_of_local_day, Expiry, LicenseRecord, RecordError, CURRENT_FORMAT_VERSION,
    DEFAULT_VENDOR_NAME, SECONDS_IN_DAY,
};
use vendorlic_seal::{ByteStream, Ed25519Engine, SealError, SigningEngine};

/// Orchestration errors.
#[derive(Debug, Error)]
pub enum LicensorError {
    #[error("license record: {0}")]
    Record(#[from] RecordError),

    #[error("signing engine: {0}")]
    Seal(#[from] SealError),

    /// A self-test step disagreed with what was created.
    #[error("self-test mismatch: {0}")]
    SelfTestMismatch(String),

    /// The self-test scratch file could not be removed.
    #[error("failed to remove self-test scratch file: {0}")]
    Cleanup(#[source] io::Error),
}

pub type LicensorResult<T> = Result<T, LicensorError>;

/// Confirmation of a written license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLicense {
    pub path: PathBuf,
    /// The record as encoded, with its raw expiry.
    pub record: LicenseRecord,
    /// Expiry rounded to the end of its local day.
    pub valid_through: Expiry,
}

impl fmt::Display for CreatedLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created license {}:", self.path.display())?;
        writeln!(f, "  License format version: {}", self.record.format_version)?;
        writeln!(f, "  Vendor name: {}", self.record.vendor_name)?;
        write!(f, "  Valid through: {}", self.valid_through)
    }
}

/// What a verified license file says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub path: PathBuf,
    pub format_version: u64,
    pub vendor_name: String,
    pub valid_through: Expiry,
    /// Fingerprint of the key the signature verified against.
    pub signer: String,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "License information for {}:", self.path.display())?;
        writeln!(f, "  License format version: {}", self.format_version)?;
        writeln!(f, "  Vendor name: {}", self.vendor_name)?;
        writeln!(f, "  Valid through: {}", self.valid_through)?;
        write!(f, "  Signed by: {}", self.signer)
    }
}

/// Results of each self-test step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestReport {
    pub created: CreatedLicense,
    pub inspected: InspectReport,
    pub extracted: LicenseRecord,
}

impl fmt::Display for SelfTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.created)?;
        writeln!(f)?;
        writeln!(f, "{}", self.inspected)?;
        writeln!(f)?;
        writeln!(f, "Extracted:")?;
        writeln!(f, "  License format version: {}", self.extracted.format_version)?;
        writeln!(f, "  Vendor name: {}", self.extracted.vendor_name)?;
        writeln!(f, "  Valid through: {:#x}", self.extracted.expiry.as_secs())?;
        writeln!(f)?;
        write!(f, "Self-test passed")
    }
}

/// What running a request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Usage was requested; printing it is up to the caller.
    Help,
    Created(CreatedLicense),
    Inspected(InspectReport),
    SelfTest(SelfTestReport),
}

/// Ties the record codec to a signing engine.
#[derive(Debug, Clone)]
pub struct Licensor<E> {
    engine: E,
}

impl Default for Licensor<Ed25519Engine> {
    fn default() -> Self {
        Self::new(Ed25519Engine)
    }
}

impl<E: SigningEngine> Licensor<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Runs one resolved request.
    ///
    /// `scratch_dir` is only used by the self-test; `now` is the clock the
    /// self-test counts its validity period from.
    pub fn run(&self, request: &Request, scratch_dir: &Path, now: i64) -> LicensorResult<Outcome> {
        match request {
            Request::Help => Ok(Outcome::Help),
            Request::Create {
                license_path,
                key_path,
                vendor,
                expiry,
            } => self
                .create(&ByteStream::file(key_path), license_path, vendor, *expiry)
                .map(Outcome::Created),
            Request::Inspect {
                license_path,
                key_path,
            } => {
                let key = key_path
                    .as_ref()
                    .map_or_else(|| ByteStream::embedded(&DEFAULT_VERIFYING_KEY), ByteStream::file);
                self.inspect(&key, license_path).map(Outcome::Inspected)
            }
            Request::SelfTest => self.self_test(scratch_dir, now).map(Outcome::SelfTest),
        }
    }

    /// Encodes a record and has the engine seal it into `license_path`.
    ///
    /// The day-rounded expiry is computed first, so an expiry outside the
    /// calendar range fails before anything is written.
    pub fn create(
        &self,
        key: &ByteStream,
        license_path: &Path,
        vendor: &str,
        expiry: Expiry,
    ) -> LicensorResult<CreatedLicense> {
        let record = LicenseRecord::new(vendor, expiry);
        let valid_through = Expiry::from_secs(end_of_local_day(expiry.as_secs())?);
        let plaintext = encode(&record)?;

        self.engine.create(key, license_path, &plaintext)?;
        info!(
            path = %license_path.display(),
            vendor,
            expiry = expiry.as_secs(),
            "created license"
        );

        Ok(CreatedLicense {
            path: license_path.to_path_buf(),
            record,
            valid_through,
        })
    }

    /// Verifies and decodes a license file.
    pub fn inspect(&self, key: &ByteStream, license_path: &Path) -> LicensorResult<InspectReport> {
        let inspection = self.engine.inspect(key, license_path)?;
        let record = decode(&inspection.plaintext)?;
        info!(
            path = %license_path.display(),
            signer = %inspection.signer,
            "inspected license"
        );

        Ok(InspectReport {
            path: license_path.to_path_buf(),
            format_version: record.format_version,
            vendor_name: record.vendor_name,
            valid_through: record.expiry,
            signer: inspection.signer,
        })
    }

    /// Verifies a license file and returns its decoded record.
    pub fn extract(&self, key: &ByteStream, license_path: &Path) -> LicensorResult<LicenseRecord> {
        let plaintext = self.engine.extract(key, license_path)?;
        let record = decode(&plaintext)?;
        debug!(path = %license_path.display(), "extracted license record");
        Ok(record)
    }

    /// Creates, inspects and extracts a license with the built-in test key
    /// pair in a scratch file under `scratch_dir`.
    ///
    /// The scratch file is gone when this returns, whether or not the test
    /// passed. Failing to remove it fails an otherwise passing run.
    pub fn self_test(&self, scratch_dir: &Path, now: i64) -> LicensorResult<SelfTestReport> {
        let scratch = ScratchFile::new(
            scratch_dir.join(format!("vendorlic-self-test-{}.lic", std::process::id())),
        );
        let outcome = self.self_test_steps(scratch.path(), now);
        let cleanup = scratch.remove();

        match (outcome, cleanup) {
            (Ok(report), Ok(())) => {
                info!("self-test passed");
                Ok(report)
            }
            (Ok(_), Err(e)) => Err(LicensorError::Cleanup(e)),
            (Err(e), cleanup) => {
                if let Err(cleanup_err) = cleanup {
                    warn!(error = %cleanup_err, "failed to remove self-test scratch file");
                }
                Err(e)
            }
        }
    }

    fn self_test_steps(&self, path: &Path, now: i64) -> LicensorResult<SelfTestReport> {
        let private_key = ByteStream::embedded(&TEST_SIGNING_SEED);
        let public_key = ByteStream::embedded(&TEST_VERIFYING_KEY);

        let created = self.create(
            &private_key,
            path,
            DEFAULT_VENDOR_NAME,
            self_test_expiry(now),
        )?;
        let inspected = self.inspect(&public_key, path)?;
        let extracted = self.extract(&public_key, path)?;

        if inspected.vendor_name != created.record.vendor_name {
            return Err(mismatch(
                "vendor name",
                &created.record.vendor_name,
                &inspected.vendor_name,
            ));
        }
        if extracted.vendor_name != created.record.vendor_name {
            return Err(mismatch(
                "extracted vendor name",
                &created.record.vendor_name,
                &extracted.vendor_name,
            ));
        }
        if extracted.format_version != CURRENT_FORMAT_VERSION {
            return Err(mismatch(
                "format version",
                CURRENT_FORMAT_VERSION,
                extracted.format_version,
            ));
        }
        if inspected.valid_through != created.valid_through {
            return Err(mismatch(
                "inspected expiry",
                created.valid_through.as_secs(),
                inspected.valid_through.as_secs(),
            ));
        }
        if extracted.expiry != inspected.valid_through {
            return Err(mismatch(
                "extracted expiry",
                inspected.valid_through.as_secs(),
                extracted.expiry.as_secs(),
            ));
        }

        Ok(SelfTestReport {
            created,
            inspected,
            extracted,
        })
    }
}

/// Expiry the self-test licenses with: one month from the start of the
/// current UTC day, plus the usual day of grace.
#[must_use]
pub fn self_test_expiry(now: i64) -> Expiry {
    let start_of_day = now - now.rem_euclid(SECONDS_IN_DAY);
    ValidityPeriod {
        multiple: 1,
        unit: TimeUnit::Month,
    }
    .expiry_from(start_of_day)
}

fn mismatch(field: &str, expected: impl fmt::Display, found: impl fmt::Display) -> LicensorError {
    LicensorError::SelfTestMismatch(format!("{field}: expected {expected}, found {found}"))
}

/// Removes its file when dropped unless [`remove`](Self::remove) already did.
struct ScratchFile {
    path: PathBuf,
    armed: bool,
}

impl ScratchFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// A file that was never created counts as removed.
    fn remove(mut self) -> io::Result<()> {
        self.armed = false;
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(&self.path);
        }
    }
}
