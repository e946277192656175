mod common;

use common::{DAY, NOW};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use vendorlic_cli::{
    resolve, OptionFlag, OptionSet, Request, Resolution, ResolveError, ResolveWarning,
};
use vendorlic_record::{Expiry, DEFAULT_VENDOR_NAME};

fn create(name: &str) -> OptionSet {
    OptionSet::new()
        .with(OptionFlag::Create, name)
        .with(OptionFlag::Key, "private.key")
}

fn conflicting(options: &OptionSet) -> bool {
    matches!(resolve(options, NOW), Err(ResolveError::ConflictingOptions(_)))
}

// ── Actions ──────────────────────────────────────────────────────

#[test]
fn create_and_inspect_conflict() {
    let options = OptionSet::new()
        .with(OptionFlag::Create, "x")
        .with(OptionFlag::Inspect, "y");
    assert!(conflicting(&options));
}

#[test]
fn repeated_create_is_duplicate() {
    let options = OptionSet::new()
        .with(OptionFlag::Create, "x")
        .with(OptionFlag::Create, "z");
    assert_eq!(
        resolve(&options, NOW),
        Err(ResolveError::DuplicateOption(OptionFlag::Create))
    );
}

#[test]
fn duplicate_wins_over_conflict() {
    let options = OptionSet::new()
        .with(OptionFlag::Inspect, "y")
        .with(OptionFlag::Create, "x")
        .with(OptionFlag::Key, "a")
        .with(OptionFlag::Key, "b");
    assert_eq!(
        resolve(&options, NOW),
        Err(ResolveError::DuplicateOption(OptionFlag::Key))
    );
}

#[test]
fn help_alone_resolves() {
    let options = OptionSet::new().flag(OptionFlag::Help);
    assert_eq!(
        resolve(&options, NOW),
        Ok(Resolution {
            request: Request::Help,
            warnings: vec![],
        })
    );
}

#[test]
fn help_with_data_conflicts() {
    let options = OptionSet::new()
        .flag(OptionFlag::Help)
        .with(OptionFlag::Vendor, "Acme");
    assert!(conflicting(&options));
}

#[test]
fn no_action_is_missing_action() {
    assert_eq!(
        resolve(&OptionSet::new(), NOW),
        Err(ResolveError::MissingAction)
    );
    let data_only = OptionSet::new().with(OptionFlag::Vendor, "Acme");
    assert_eq!(resolve(&data_only, NOW), Err(ResolveError::MissingAction));
}

// ── Data flags ───────────────────────────────────────────────────

#[test]
fn time_limit_with_inspect_conflicts() {
    let options = OptionSet::new()
        .with(OptionFlag::TimeLimit, "5")
        .with(OptionFlag::Inspect, "y");
    assert!(conflicting(&options));
}

#[test]
fn vendor_with_self_test_conflicts() {
    let options = OptionSet::new()
        .flag(OptionFlag::SelfTest)
        .with(OptionFlag::Vendor, "Acme");
    assert!(conflicting(&options));
}

#[test]
fn key_with_self_test_conflicts() {
    let options = OptionSet::new()
        .flag(OptionFlag::SelfTest)
        .with(OptionFlag::Key, "k");
    assert!(conflicting(&options));
}

#[test]
fn inspect_accepts_optional_key() {
    let without = OptionSet::new().with(OptionFlag::Inspect, "a.lic");
    assert_eq!(
        resolve(&without, NOW).unwrap().request,
        Request::Inspect {
            license_path: PathBuf::from("a.lic"),
            key_path: None,
        }
    );

    let with = without.with(OptionFlag::Key, "public.pem");
    assert_eq!(
        resolve(&with, NOW).unwrap().request,
        Request::Inspect {
            license_path: PathBuf::from("a.lic"),
            key_path: Some(PathBuf::from("public.pem")),
        }
    );
}

#[test]
fn create_without_key_is_missing_key() {
    let options = OptionSet::new().with(OptionFlag::Create, "x");
    assert_eq!(resolve(&options, NOW), Err(ResolveError::MissingKey));
}

// ── Time limit and unit ──────────────────────────────────────────

#[test]
fn unit_without_limit_warns() {
    let options = create("x").with(OptionFlag::TimeUnit, "week");
    let resolution = resolve(&options, NOW).unwrap();
    assert_eq!(resolution.warnings, vec![ResolveWarning::TimeUnitIgnored]);
    match resolution.request {
        Request::Create { expiry, .. } => assert!(expiry.is_unlimited()),
        other => panic!("expected create, got {other:?}"),
    }
}

#[test]
fn non_numeric_limit_is_not_a_number() {
    let options = create("x").with(OptionFlag::TimeLimit, "abc");
    assert_eq!(
        resolve(&options, NOW),
        Err(ResolveError::NotANumber("abc".to_string()))
    );
}

#[test]
fn partially_numeric_and_negative_limits_are_rejected() {
    for token in ["5x", "-1", "", " 5"] {
        let options = create("x").with(OptionFlag::TimeLimit, token);
        assert_eq!(
            resolve(&options, NOW),
            Err(ResolveError::NotANumber(token.to_string())),
            "token {token:?}"
        );
    }
}

#[test]
fn oversized_limit_is_out_of_range() {
    let options = create("x").with(OptionFlag::TimeLimit, "5000000000");
    let err = resolve(&options, NOW).unwrap_err();
    assert_eq!(
        err,
        ResolveError::TimeLimitOutOfRange {
            token: "5000000000".to_string(),
            max: u32::MAX,
        }
    );
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn largest_limit_is_accepted() {
    let options = create("x")
        .with(OptionFlag::TimeLimit, u32::MAX.to_string())
        .with(OptionFlag::TimeUnit, "day");
    match resolve(&options, NOW).unwrap().request {
        Request::Create { expiry, .. } => {
            assert_eq!(expiry.as_secs(), NOW + DAY + i64::from(u32::MAX) * DAY);
        }
        other => panic!("expected create, got {other:?}"),
    }
}

#[test]
fn unknown_unit_is_invalid() {
    for token in ["fortnight", "", "Day", "days"] {
        let options = create("x")
            .with(OptionFlag::TimeLimit, "1")
            .with(OptionFlag::TimeUnit, token);
        assert_eq!(
            resolve(&options, NOW),
            Err(ResolveError::InvalidTimeUnit(token.to_string())),
            "token {token:?}"
        );
    }
}

#[test]
fn invalid_unit_reported_before_bad_limit() {
    let options = create("x")
        .with(OptionFlag::TimeLimit, "abc")
        .with(OptionFlag::TimeUnit, "q");
    assert_eq!(
        resolve(&options, NOW),
        Err(ResolveError::InvalidTimeUnit("q".to_string()))
    );
}

#[test]
fn acme_one_day_expires_two_days_out() {
    let options = create("acme")
        .with(OptionFlag::Vendor, "Acme")
        .with(OptionFlag::TimeLimit, "1")
        .with(OptionFlag::TimeUnit, "day");
    assert_eq!(
        resolve(&options, NOW),
        Ok(Resolution {
            request: Request::Create {
                license_path: PathBuf::from("acme.lic"),
                key_path: PathBuf::from("private.key"),
                vendor: "Acme".to_string(),
                expiry: Expiry::from_secs(NOW + 2 * DAY),
            },
            warnings: vec![],
        })
    );
}

#[test]
fn unit_prefixes_and_default_month() {
    let expiry_for = |unit: Option<&str>| {
        let mut options = create("x").with(OptionFlag::TimeLimit, "2");
        if let Some(unit) = unit {
            options = options.with(OptionFlag::TimeUnit, unit);
        }
        match resolve(&options, NOW).unwrap().request {
            Request::Create { expiry, .. } => expiry.as_secs() - NOW - DAY,
            other => panic!("expected create, got {other:?}"),
        }
    };

    assert_eq!(expiry_for(Some("d")), 2 * DAY);
    assert_eq!(expiry_for(Some("w")), 14 * DAY);
    assert_eq!(expiry_for(Some("mo")), 60 * DAY);
    assert_eq!(expiry_for(Some("y")), 730 * DAY);
    assert_eq!(expiry_for(None), 60 * DAY);
}

#[test]
fn zero_limit_is_unlimited() {
    let options = create("x").with(OptionFlag::TimeLimit, "0");
    match resolve(&options, NOW).unwrap().request {
        Request::Create { expiry, .. } => assert_eq!(expiry, Expiry::UNLIMITED),
        other => panic!("expected create, got {other:?}"),
    }
}

#[test]
fn vendor_defaults() {
    match resolve(&create("x"), NOW).unwrap().request {
        Request::Create {
            vendor,
            license_path,
            ..
        } => {
            assert_eq!(vendor, DEFAULT_VENDOR_NAME);
            assert_eq!(license_path, PathBuf::from("x.lic"));
        }
        other => panic!("expected create, got {other:?}"),
    }
}

#[test]
fn error_messages_name_the_offender() {
    assert_eq!(
        ResolveError::DuplicateOption(OptionFlag::TimeLimit).to_string(),
        "option --time-limit given more than once"
    );
    assert!(ResolveError::NotANumber("abc".into()).to_string().contains("abc"));
    assert!(ResolveError::InvalidTimeUnit("q".into()).to_string().contains("'q'"));
}
