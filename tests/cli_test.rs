// ABOUTME: End-to-end tests for the garmin-zone-sync command-line interface
// ABOUTME: Exercises argument validation and startup failures without network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::process::{Command, Output};

use garmin_zone_sync::constants::env_config;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_garmin-zone-sync"))
        .args(args)
        .env_remove(env_config::GARMIN_EMAIL)
        .env_remove(env_config::GARMIN_PASSWORD)
        .env_remove(env_config::GARMIN_OAUTH2_TOKEN)
        .env_remove(env_config::GARMIN_OAUTH_CONSUMER_KEY)
        .env_remove(env_config::GARMIN_OAUTH_CONSUMER_SECRET)
        .env_remove(env_config::RUST_LOG)
        .output()
        .expect("failed to run garmin-zone-sync")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_lists_all_flags() {
    let output = run(&["--help"]);
    assert!(output.status.success());

    let help = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--filter",
        "--dry-run",
        "--verbose",
        "--zone",
        "--limit",
        "--list",
        "--dump-workout",
        "--sport",
        "--email",
        "--password",
    ] {
        assert!(help.contains(flag), "help is missing {flag}");
    }
}

#[test]
fn test_zone_out_of_range_is_rejected() {
    for zone in ["0", "6"] {
        let output = run(&["--zone", zone]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("--zone"));
    }
}

#[test]
fn test_list_conflicts_with_dump() {
    let output = run(&["--list", "--dump-workout", "42"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot be used with"));
}

#[test]
fn test_dump_requires_numeric_id() {
    let output = run(&["--dump-workout", "latest"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_credentials_fails_before_network() {
    let output = run(&["--dry-run"]);
    assert!(!output.status.success());

    let message = stderr(&output);
    assert!(message.contains("Error:"));
    assert!(message.contains(env_config::GARMIN_EMAIL));
    assert!(!message.contains("Logging in"));
}

#[test]
fn test_half_consumer_pair_is_config_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_garmin-zone-sync"))
        .env_remove(env_config::GARMIN_OAUTH_CONSUMER_SECRET)
        .env(env_config::GARMIN_OAUTH_CONSUMER_KEY, "key-only")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains(env_config::GARMIN_OAUTH_CONSUMER_SECRET));
}
