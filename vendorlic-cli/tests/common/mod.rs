//! Shared fixtures for front-end tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use vendorlic_cli::embedded::{DEFAULT_VERIFYING_KEY, TEST_SIGNING_SEED, TEST_VERIFYING_KEY};

/// 2024-03-10 10:00:00 UTC.
pub const NOW: i64 = 1_710_064_800;

pub const DAY: i64 = 86_400;

/// Writes the built-in test key pair to `dir` as raw key files and returns
/// `(private, public)` paths.
pub fn write_test_keys(dir: &Path) -> (PathBuf, PathBuf) {
    let private = dir.join("private.key");
    let public = dir.join("public.key");
    std::fs::write(&private, TEST_SIGNING_SEED).unwrap();
    std::fs::write(&public, TEST_VERIFYING_KEY).unwrap();
    (private, public)
}

/// Writes a public key that did not sign anything the tests create.
pub fn write_foreign_public_key(dir: &Path) -> PathBuf {
    let path = dir.join("foreign.pub");
    std::fs::write(&path, DEFAULT_VERIFYING_KEY).unwrap();
    path
}

/// Lists the entries of `dir` by file name.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
