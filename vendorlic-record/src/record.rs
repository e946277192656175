//! The logical license record protected by a signing engine.

use crate::codec::CURRENT_FORMAT_VERSION;
use crate::window::UNLIMITED;
use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vendor name used when none is given.
pub const DEFAULT_VENDOR_NAME: &str = "Ilan Smith";

/// License expiry as seconds since the Unix epoch, with `0` meaning
/// unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expiry(i64);

impl Expiry {
    /// A license that never expires.
    pub const UNLIMITED: Self = Self(UNLIMITED);

    /// Expiry at `secs` seconds since the epoch. `0` is the unlimited sentinel.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Returns the raw on-wire value.
    #[must_use]
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    /// Returns true if this license never expires.
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        self.0 == UNLIMITED
    }

    /// Returns the expiry instant, or None when unlimited.
    #[must_use]
    pub const fn timestamp(&self) -> Option<i64> {
        if self.is_unlimited() { None } else { Some(self.0) }
    }

    /// Formats the expiry as a calendar date in `tz`, e.g. `07 Nov, 2026`.
    #[must_use]
    pub fn display_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self.timestamp() {
            None => "Unlimited".to_string(),
            Some(secs) => match tz.timestamp_opt(secs, 0).earliest() {
                Some(dt) => dt.format("%d %b, %Y").to_string(),
                None => secs.to_string(),
            },
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_in(&Local))
    }
}

/// A decoded or to-be-encoded license record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// Schema of the encoded bytes following the version field.
    pub format_version: u64,
    /// Licensed vendor.
    pub vendor_name: String,
    /// Expiry; raw when encoding, day-rounded after decoding.
    pub expiry: Expiry,
}

impl LicenseRecord {
    /// Creates a record at the current format version.
    #[must_use]
    pub fn new(vendor_name: impl Into<String>, expiry: Expiry) -> Self {
        Self {
            format_version: CURRENT_FORMAT_VERSION,
            vendor_name: vendor_name.into(),
            expiry,
        }
    }
}
