// ABOUTME: Environment variable names read by the configuration layer
// ABOUTME: Centralizes names to eliminate hardcoded strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Garmin Connect login email
pub const GARMIN_EMAIL: &str = "GARMIN_EMAIL";
/// Garmin Connect login password
pub const GARMIN_PASSWORD: &str = "GARMIN_PASSWORD";
/// Garmin domain override
pub const GARMIN_DOMAIN: &str = "GARMIN_DOMAIN";
/// Pre-issued OAuth2 bearer token, skips SSO login
pub const GARMIN_OAUTH2_TOKEN: &str = "GARMIN_OAUTH2_TOKEN";
/// OAuth1 consumer key override
pub const GARMIN_OAUTH_CONSUMER_KEY: &str = "GARMIN_OAUTH_CONSUMER_KEY";
/// OAuth1 consumer secret override
pub const GARMIN_OAUTH_CONSUMER_SECRET: &str = "GARMIN_OAUTH_CONSUMER_SECRET";
/// HTTP request timeout in seconds
pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
/// HTTP connect timeout in seconds
pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "HTTP_CONNECT_TIMEOUT_SECS";
/// Log output format (`pretty`, `json`, `compact`)
pub const LOG_FORMAT: &str = "LOG_FORMAT";
/// Tracing filter directives
pub const RUST_LOG: &str = "RUST_LOG";
