//! Command-line scanner.
//!
//! clap only tokenizes here: every option may repeat and none is required,
//! so duplicate, conflicting and missing options reach the resolver as an
//! [`OptionSet`] and are reported there.

use crate::options::{OptionFlag, OptionSet};
use clap::{ArgAction, CommandFactory, Parser};

#[derive(Parser, Debug, Default)]
#[command(name = "vendorlic")]
#[command(about = "Create and inspect signed vendor licenses")]
#[command(override_usage = "vendorlic [ACTION] [OPTIONS]")]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Create a license file NAME.lic (requires --key)
    #[arg(short = 'c', long = "create", value_name = "NAME", action = ArgAction::Append)]
    pub create: Vec<String>,

    /// Print the information held in a license file
    #[arg(
        short = 'i',
        long = "inspect",
        visible_alias = "info",
        value_name = "FILE",
        action = ArgAction::Append
    )]
    pub inspect: Vec<String>,

    /// Run the create, inspect and extract cycle against the built-in test key
    #[arg(short = 'x', long = "self-test", visible_alias = "test", action = ArgAction::Count)]
    pub self_test: u8,

    /// Print this information and exit
    #[arg(short = 'h', long = "help", action = ArgAction::Count)]
    pub help: u8,

    /// Private key for --create (required) or public key for --inspect
    /// (optional, the built-in key is used otherwise)
    #[arg(short = 'k', long = "key", value_name = "PATH", action = ArgAction::Append)]
    pub key: Vec<String>,

    /// Vendor being licensed [default: Ilan Smith]
    #[arg(short = 'v', long = "vendor", value_name = "NAME", action = ArgAction::Append)]
    pub vendor: Vec<String>,

    /// Validity from creation time, counted in --time-unit [default: unlimited]
    #[arg(short = 't', long = "time-limit", value_name = "N", action = ArgAction::Append)]
    pub time_limit: Vec<String>,

    /// Unit of --time-limit: day, week, month or year, or any prefix [default: month]
    #[arg(
        short = 'u',
        long = "time-unit",
        visible_alias = "unit",
        value_name = "UNIT",
        action = ArgAction::Append
    )]
    pub time_unit: Vec<String>,
}

impl Cli {
    /// Flattens the scanned arguments into an [`OptionSet`], keeping repeats.
    #[must_use]
    pub fn into_options(self) -> OptionSet {
        let mut options = OptionSet::new();
        push_count(&mut options, OptionFlag::Help, self.help);
        push_values(&mut options, OptionFlag::Create, self.create);
        push_values(&mut options, OptionFlag::Inspect, self.inspect);
        push_count(&mut options, OptionFlag::SelfTest, self.self_test);
        push_values(&mut options, OptionFlag::Key, self.key);
        push_values(&mut options, OptionFlag::Vendor, self.vendor);
        push_values(&mut options, OptionFlag::TimeLimit, self.time_limit);
        push_values(&mut options, OptionFlag::TimeUnit, self.time_unit);
        options
    }
}

fn push_count(options: &mut OptionSet, flag: OptionFlag, count: u8) {
    for _ in 0..count {
        options.push_flag(flag);
    }
}

fn push_values(options: &mut OptionSet, flag: OptionFlag, values: Vec<String>) {
    for value in values {
        options.push_value(flag, value);
    }
}

/// Rendered usage text.
#[must_use]
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}
