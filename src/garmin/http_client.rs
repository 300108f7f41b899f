// ABOUTME: HTTP client construction for Garmin SSO and Connect API calls
// ABOUTME: One cookie-aware client per run with configured timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use zone_sync_core::errors::{AppError, AppResult};

use crate::config::HttpClientConfig;

/// Build the HTTP client for one run
///
/// The cookie store carries the SSO session between the sign-in requests.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized
pub fn build_client(config: &HttpClientConfig) -> AppResult<Client> {
    ClientBuilder::new()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")).with_source(e))
}
