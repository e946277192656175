//! Plaintext record layout.
//!
//! Every schema starts with an 8-byte format version; the version selects
//! how the remaining bytes are read. Version 1:
//!
//! | Offset | Size | Field          | Encoding                                |
//! |--------|------|----------------|-----------------------------------------|
//! | 0      | 8    | format version | u64, little-endian                      |
//! | 8      | 64   | vendor name    | name + NUL repeated to fill the field   |
//! | 72     | 8    | expiry         | i64 seconds since epoch, little-endian  |
//!
//! Expiry is stored exactly as given and rounded to the end of its local day
//! only when decoded.

use crate::cursor::ByteCursor;
use crate::error::{RecordError, RecordResult};
use crate::record::{Expiry, LicenseRecord};
use crate::window::end_of_day_in;
use chrono::{Local, TimeZone};
use tracing::debug;

/// Highest format version this codec reads and writes.
pub const CURRENT_FORMAT_VERSION: u64 = 1;

/// Width of the vendor name field in bytes, terminator included.
pub const VENDOR_NAME_FIELD_LEN: usize = 64;

/// Longest vendor name that fits alongside its terminator.
pub const VENDOR_NAME_MAX_LEN: usize = VENDOR_NAME_FIELD_LEN - 1;

/// Encoded length of a version 1 record.
pub const V1_RECORD_LEN: usize = 8 + VENDOR_NAME_FIELD_LEN + 8;

/// Encodes a record into its plaintext form.
///
/// # Errors
///
/// Fails if the version is not writable by this codec or the vendor name
/// does not fit its field.
pub fn encode(record: &LicenseRecord) -> RecordResult<Vec<u8>> {
    check_version(record.format_version)?;

    let mut out = Vec::with_capacity(V1_RECORD_LEN);
    out.extend_from_slice(&record.format_version.to_le_bytes());
    write_vendor_name(&mut out, &record.vendor_name)?;
    out.extend_from_slice(&record.expiry.as_secs().to_le_bytes());
    Ok(out)
}

/// Decodes a plaintext record, rounding expiry in the process-local zone.
///
/// # Errors
///
/// Fails on truncated input, an unreadable version, a malformed vendor
/// field, or an expiry outside the calendar range.
pub fn decode(bytes: &[u8]) -> RecordResult<LicenseRecord> {
    decode_in(bytes, &Local)
}

/// Decodes a plaintext record, rounding expiry to the end of day in `tz`.
pub fn decode_in<Tz: TimeZone>(bytes: &[u8], tz: &Tz) -> RecordResult<LicenseRecord> {
    let mut cursor = ByteCursor::new(bytes);
    let format_version = cursor.read_u64("format version")?;
    debug!(format_version, len = bytes.len(), "decoding license record");

    check_version(format_version)?;
    match format_version {
        1 => decode_v1(&mut cursor, tz),
        other => Err(RecordError::UnknownVersion(other)),
    }
}

fn check_version(version: u64) -> RecordResult<()> {
    match version {
        0 => Err(RecordError::NoSuchVersion),
        v if v > CURRENT_FORMAT_VERSION => Err(RecordError::UnsupportedNewerVersion {
            found: v,
            supported: CURRENT_FORMAT_VERSION,
        }),
        _ => Ok(()),
    }
}

fn decode_v1<Tz: TimeZone>(cursor: &mut ByteCursor<'_>, tz: &Tz) -> RecordResult<LicenseRecord> {
    let vendor_name = read_vendor_name(cursor)?;
    let raw_expiry = cursor.read_i64("expiry")?;
    let expiry = end_of_day_in(raw_expiry, tz)?;

    Ok(LicenseRecord {
        format_version: 1,
        vendor_name,
        expiry: Expiry::from_secs(expiry),
    })
}

/// Fills the whole field by cycling over the name and its terminator, so
/// no byte is left unset and a terminated-string read yields the name.
fn write_vendor_name(out: &mut Vec<u8>, name: &str) -> RecordResult<()> {
    let bytes = name.as_bytes();
    if bytes.len() > VENDOR_NAME_MAX_LEN {
        return Err(RecordError::VendorNameTooLong {
            len: bytes.len(),
            max: VENDOR_NAME_MAX_LEN,
        });
    }
    if bytes.contains(&0) {
        return Err(RecordError::MalformedVendorName(
            "name contains a NUL byte".to_string(),
        ));
    }

    let period = bytes.len() + 1;
    out.extend((0..VENDOR_NAME_FIELD_LEN).map(|i| bytes.get(i % period).copied().unwrap_or(0)));
    Ok(())
}

fn read_vendor_name(cursor: &mut ByteCursor<'_>) -> RecordResult<String> {
    let field = cursor.read_fixed_bytes(VENDOR_NAME_FIELD_LEN, "vendor name")?;
    let end = field.iter().position(|&b| b == 0).ok_or_else(|| {
        RecordError::MalformedVendorName("missing terminator".to_string())
    })?;

    String::from_utf8(field[..end].to_vec())
        .map_err(|e| RecordError::MalformedVendorName(format!("invalid UTF-8: {e}")))
}
