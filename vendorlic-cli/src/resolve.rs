//! Turns the raw options of one invocation into a single validated request.
//!
//! Nothing here touches the filesystem or a key; a request that fails to
//! resolve aborts the invocation before any license is read or written.

use crate::options::{OptionFlag, OptionSet, TimeUnit, ValidityPeriod};
use std::collections::BTreeSet;
use std::fmt;
use std::num::IntErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use vendorlic_record::{Expiry, DEFAULT_VENDOR_NAME};

/// Extension appended to the name given to `--create`.
pub const LICENSE_EXTENSION: &str = "lic";

/// Option combinations the resolver rejects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("option {0} given more than once")]
    DuplicateOption(OptionFlag),

    #[error("conflicting options: {0}")]
    ConflictingOptions(String),

    #[error("not a number: '{0}'")]
    NotANumber(String),

    #[error("time limit '{token}' is out of range, the largest accepted is {max}")]
    TimeLimitOutOfRange { token: String, max: u32 },

    #[error("invalid time unit '{0}', expected a prefix of day, week, month or year")]
    InvalidTimeUnit(String),

    #[error("no action given")]
    MissingAction,

    #[error("--create requires --key with a private key")]
    MissingKey,
}

/// Result type for option resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Non-fatal findings reported alongside a resolved request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveWarning {
    /// `--time-unit` was given without `--time-limit` and has no effect.
    TimeUnitIgnored,
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeUnitIgnored => {
                f.write_str("no time limit set so the --time-unit option is ignored")
            }
        }
    }
}

/// The one thing an invocation asked for, with exactly the data it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Help,
    Create {
        license_path: PathBuf,
        key_path: PathBuf,
        vendor: String,
        expiry: Expiry,
    },
    Inspect {
        license_path: PathBuf,
        /// Public key to verify with; the built-in key when absent.
        key_path: Option<PathBuf>,
    },
    SelfTest,
}

/// A validated request and any warnings raised while resolving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub request: Request,
    pub warnings: Vec<ResolveWarning>,
}

/// Validates `options` and builds the request they describe.
///
/// `now` is the issue time, in seconds since the epoch, that a `--time-limit`
/// is counted from.
///
/// # Errors
///
/// Returns the first rule the options break, checked in this order:
/// repeated options, a second action, `--help` with anything else,
/// creation data without `--create`, an unknown time unit, a non-numeric
/// or out-of-range time limit, no action at all, and `--create` without
/// `--key`.
pub fn resolve(options: &OptionSet, now: i64) -> ResolveResult<Resolution> {
    reject_duplicates(options)?;
    let action = single_action(options)?;

    if action == Some(OptionFlag::Help) && options.iter().count() > 1 {
        return Err(ResolveError::ConflictingOptions(
            "--help cannot be combined with other options".to_string(),
        ));
    }
    if let Some(action) = action {
        check_data_flags(options, action)?;
    }

    let mut warnings = Vec::new();
    let unit_token = value_of(options, OptionFlag::TimeUnit);
    let limit_token = value_of(options, OptionFlag::TimeLimit);
    if unit_token.is_some() && limit_token.is_none() {
        warnings.push(ResolveWarning::TimeUnitIgnored);
    }

    let unit = match unit_token {
        Some(token) => TimeUnit::from_prefix(token)
            .ok_or_else(|| ResolveError::InvalidTimeUnit(token.to_string()))?,
        None => TimeUnit::default(),
    };
    let multiple = match limit_token {
        Some(token) => parse_time_limit(token)?,
        None => 0,
    };

    let request = match action.ok_or(ResolveError::MissingAction)? {
        OptionFlag::Help => Request::Help,
        OptionFlag::SelfTest => Request::SelfTest,
        OptionFlag::Inspect => Request::Inspect {
            license_path: PathBuf::from(value_of(options, OptionFlag::Inspect).unwrap_or_default()),
            key_path: value_of(options, OptionFlag::Key).map(PathBuf::from),
        },
        _ => {
            let key_path = value_of(options, OptionFlag::Key)
                .map(PathBuf::from)
                .ok_or(ResolveError::MissingKey)?;
            let name = value_of(options, OptionFlag::Create).unwrap_or_default();
            Request::Create {
                license_path: PathBuf::from(format!("{name}.{LICENSE_EXTENSION}")),
                key_path,
                vendor: value_of(options, OptionFlag::Vendor)
                    .unwrap_or(DEFAULT_VENDOR_NAME)
                    .to_string(),
                expiry: ValidityPeriod { multiple, unit }.expiry_from(now),
            }
        }
    };

    debug!(?request, warnings = warnings.len(), "resolved request");
    Ok(Resolution { request, warnings })
}

fn reject_duplicates(options: &OptionSet) -> ResolveResult<()> {
    let mut seen = BTreeSet::new();
    for (flag, _) in options.iter() {
        if !seen.insert(flag) {
            return Err(ResolveError::DuplicateOption(flag));
        }
    }
    Ok(())
}

fn single_action(options: &OptionSet) -> ResolveResult<Option<OptionFlag>> {
    let mut actions = options.iter().map(|(flag, _)| flag).filter(OptionFlag::is_action);
    let first = actions.next();
    match (first, actions.next()) {
        (Some(first), Some(second)) => Err(ResolveError::ConflictingOptions(format!(
            "{first} cannot be combined with {second}"
        ))),
        _ => Ok(first),
    }
}

fn check_data_flags(options: &OptionSet, action: OptionFlag) -> ResolveResult<()> {
    for (flag, _) in options.iter() {
        if flag.is_creation_data() && action != OptionFlag::Create {
            return Err(ResolveError::ConflictingOptions(format!(
                "{flag} is only valid with --create"
            )));
        }
        if flag == OptionFlag::Key && !matches!(action, OptionFlag::Create | OptionFlag::Inspect) {
            return Err(ResolveError::ConflictingOptions(format!(
                "--key cannot be combined with {action}"
            )));
        }
    }
    Ok(())
}

fn parse_time_limit(token: &str) -> ResolveResult<u32> {
    token.parse::<u32>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ResolveError::TimeLimitOutOfRange {
            token: token.to_string(),
            max: u32::MAX,
        },
        _ => ResolveError::NotANumber(token.to_string()),
    })
}

fn value_of(options: &OptionSet, flag: OptionFlag) -> Option<&str> {
    options
        .iter()
        .find(|(candidate, _)| *candidate == flag)
        .map(|(_, value)| value.unwrap_or_default())
}
