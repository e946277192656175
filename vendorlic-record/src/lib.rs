//! License record protocol.
//!
//! This crate handles:
//! - The versioned plaintext layout of a license record
//! - Rounding expiry instants to the end of their local calendar day
//!
//! Protecting the plaintext (signing, verification) is the job of a
//! signing engine; this crate only turns records into bytes and back.
//!
//! # Layout
//!
//! A leading 8-byte format version selects the schema for the remaining
//! bytes, so later schemas can be added without moving the version field.
//! A version 1 record is [`V1_RECORD_LEN`] bytes long.

mod codec;
mod cursor;
mod error;
mod record;
mod window;

pub use codec::{
    decode, decode_in, encode, CURRENT_FORMAT_VERSION, V1_RECORD_LEN, VENDOR_NAME_FIELD_LEN,
    VENDOR_NAME_MAX_LEN,
};
pub use cursor::ByteCursor;
pub use error::{RecordError, RecordResult};
pub use record::{Expiry, LicenseRecord, DEFAULT_VENDOR_NAME};
pub use window::{end_of_day_in, end_of_local_day, utc_breakdown, SECONDS_IN_DAY, UNLIMITED};
