//! Option model for a single invocation.

use serde::{Deserialize, Serialize};
use std::fmt;
use vendorlic_record::{Expiry, SECONDS_IN_DAY};

/// Every option the resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionFlag {
    Help,
    Create,
    Inspect,
    SelfTest,
    Vendor,
    TimeUnit,
    TimeLimit,
    Key,
}

impl OptionFlag {
    /// Returns true for the mutually exclusive action flags.
    #[must_use]
    pub fn is_action(&self) -> bool {
        matches!(self, Self::Help | Self::Create | Self::Inspect | Self::SelfTest)
    }

    /// Returns true for options that only describe a license being created.
    #[must_use]
    pub fn is_creation_data(&self) -> bool {
        matches!(self, Self::Vendor | Self::TimeUnit | Self::TimeLimit)
    }

    /// Long option name as typed on the command line.
    #[must_use]
    pub fn long_name(&self) -> &'static str {
        match self {
            Self::Help => "--help",
            Self::Create => "--create",
            Self::Inspect => "--inspect",
            Self::SelfTest => "--self-test",
            Self::Vendor => "--vendor",
            Self::TimeUnit => "--time-unit",
            Self::TimeLimit => "--time-limit",
            Self::Key => "--key",
        }
    }
}

impl fmt::Display for OptionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

/// Options in the order they were given, with their values.
///
/// Repeats are kept so the resolver can reject them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    entries: Vec<(OptionFlag, Option<String>)>,
}

impl OptionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a flag that takes no value.
    pub fn push_flag(&mut self, flag: OptionFlag) {
        self.entries.push((flag, None));
    }

    /// Records an option with its value.
    pub fn push_value(&mut self, flag: OptionFlag, value: impl Into<String>) {
        self.entries.push((flag, Some(value.into())));
    }

    /// Builder form of [`push_flag`](Self::push_flag).
    #[must_use]
    pub fn flag(mut self, flag: OptionFlag) -> Self {
        self.push_flag(flag);
        self
    }

    /// Builder form of [`push_value`](Self::push_value).
    #[must_use]
    pub fn with(mut self, flag: OptionFlag, value: impl Into<String>) -> Self {
        self.push_value(flag, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionFlag, Option<&str>)> {
        self.entries.iter().map(|(flag, value)| (*flag, value.as_deref()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Unit a time limit is counted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl TimeUnit {
    const ALL: [Self; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    /// Canonical name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Length of one unit in seconds. Months are 30 days, years 365.
    #[must_use]
    pub fn seconds(&self) -> i64 {
        match self {
            Self::Day => SECONDS_IN_DAY,
            Self::Week => 7 * SECONDS_IN_DAY,
            Self::Month => 30 * SECONDS_IN_DAY,
            Self::Year => 365 * SECONDS_IN_DAY,
        }
    }

    /// Matches a non-empty, case-sensitive abbreviation of a unit name
    /// (`d`, `mon`, `year`), tried in order from day to year.
    #[must_use]
    pub fn from_prefix(token: &str) -> Option<Self> {
        if token.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|unit| unit.name().starts_with(token))
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A relative validity period such as "3 months".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPeriod {
    pub multiple: u32,
    pub unit: TimeUnit,
}

impl ValidityPeriod {
    /// One day of slack so a license set to run out "today" is not already
    /// expired when issued.
    pub const GRACE_PAD_SECS: i64 = SECONDS_IN_DAY;

    /// Absolute expiry for a license issued at `now`; a zero multiple means
    /// unlimited.
    #[must_use]
    pub fn expiry_from(&self, now: i64) -> Expiry {
        if self.multiple == 0 {
            return Expiry::UNLIMITED;
        }
        let span = i64::from(self.multiple) * self.unit.seconds();
        Expiry::from_secs(now.saturating_add(Self::GRACE_PAD_SECS).saturating_add(span))
    }
}
