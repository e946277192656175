//! Command-line front end for vendor licenses.
//!
//! This crate handles:
//! - Scanning the command line into an [`OptionSet`]
//! - Resolving options into a single [`Request`]
//! - Running requests through a [`Licensor`] bound to a signing engine
//! - The built-in self-test

pub mod args;
pub mod embedded;
mod licensor;
mod options;
mod resolve;

pub use args::{usage, Cli};
pub use licensor::{
    self_test_expiry, CreatedLicense, InspectReport, Licensor, LicensorError, LicensorResult,
    Outcome, SelfTestReport,
};
pub use options::{OptionFlag, OptionSet, TimeUnit, ValidityPeriod};
pub use resolve::{
    resolve, Request, Resolution, ResolveError, ResolveResult, ResolveWarning, LICENSE_EXTENSION,
};
