//! vendorlic: create and inspect signed vendor licenses.
//!
//! Usage:
//!   vendorlic --create acme --key private.pem --vendor Acme --time-limit 1 --time-unit year
//!   vendorlic --inspect acme.lic --key public.pem
//!   vendorlic --self-test

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use vendorlic_cli::{resolve, usage, Cli, Licensor, Outcome, Request, ResolveError};

/// Exit status for options the scanner could not read.
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            eprint!("{}", usage());
            return Ok(ExitCode::from(EXIT_USAGE));
        }
    };

    let now = Utc::now().timestamp();
    let resolution = match resolve(&cli.into_options(), now) {
        Ok(resolution) => resolution,
        Err(ResolveError::MissingAction) => {
            eprint!("{}", usage());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("invalid command line"),
    };
    for warning in &resolution.warnings {
        warn!("{warning}");
    }

    let request = &resolution.request;
    let outcome = Licensor::default()
        .run(request, &std::env::temp_dir(), now)
        .with_context(|| describe_failure(request))?;

    match outcome {
        Outcome::Help => print!("{}", usage()),
        Outcome::Created(created) => println!("{created}"),
        Outcome::Inspected(report) => println!("{report}"),
        Outcome::SelfTest(report) => println!("{report}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn describe_failure(request: &Request) -> String {
    match request {
        Request::Help => "failed to print usage".to_string(),
        Request::Create { license_path, .. } => {
            format!("failed to create {}", license_path.display())
        }
        Request::Inspect { license_path, .. } => {
            format!("failed to inspect {}", license_path.display())
        }
        Request::SelfTest => "self-test failed".to_string(),
    }
}
