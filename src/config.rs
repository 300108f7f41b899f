// ABOUTME: Environment-driven configuration for the Garmin client and HTTP transport
// ABOUTME: Resolves credentials from CLI overrides, a pre-issued token or environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Configuration
//!
//! Everything is read from the environment; CLI flags override individual
//! values. There is no configuration file.

use std::env;
use std::fmt;
use std::str::FromStr;

use zone_sync_core::constants::env_config;
use zone_sync_core::constants::garmin::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_DOMAIN, DEFAULT_TIMEOUT_SECS,
};
use zone_sync_core::errors::{AppError, AppResult};

use crate::garmin::oauth1::OAuth1Consumer;

/// Garmin Connect login credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How the client obtains its bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// SSO login with email and password
    Password(Credentials),
    /// Pre-issued OAuth2 bearer token
    Token(String),
}

/// HTTP client timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl HttpClientConfig {
    /// Load timeouts from environment, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            timeout_secs: env_parse_or(env_config::HTTP_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS),
            connect_timeout_secs: env_parse_or(
                env_config::HTTP_CONNECT_TIMEOUT_SECS,
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        }
    }
}

/// Garmin Connect client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarminConfig {
    /// Garmin domain (`garmin.com` or `garmin.cn`)
    pub domain: String,
    /// Pre-issued OAuth2 token that bypasses SSO
    pub oauth2_token: Option<String>,
    /// Consumer key pair override; fetched from the published JSON when absent
    pub consumer: Option<OAuth1Consumer>,
    /// HTTP timeouts
    pub http: HttpClientConfig,
}

impl GarminConfig {
    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if only one half of the consumer key pair is set
    pub fn from_env() -> AppResult<Self> {
        let consumer = match (
            env_non_empty(env_config::GARMIN_OAUTH_CONSUMER_KEY),
            env_non_empty(env_config::GARMIN_OAUTH_CONSUMER_SECRET),
        ) {
            (Some(consumer_key), Some(consumer_secret)) => Some(OAuth1Consumer {
                consumer_key,
                consumer_secret,
            }),
            (None, None) => None,
            _ => {
                return Err(AppError::config_invalid(format!(
                    "{} and {} must be set together",
                    env_config::GARMIN_OAUTH_CONSUMER_KEY,
                    env_config::GARMIN_OAUTH_CONSUMER_SECRET
                )))
            }
        };

        Ok(Self {
            domain: env_var_or(env_config::GARMIN_DOMAIN, DEFAULT_DOMAIN),
            oauth2_token: env_non_empty(env_config::GARMIN_OAUTH2_TOKEN),
            consumer,
            http: HttpClientConfig::from_env(),
        })
    }

    /// Base URL of the Connect API
    #[must_use]
    pub fn connect_api_base(&self) -> String {
        format!("https://connectapi.{}", self.domain)
    }

    /// Pick the authentication method
    ///
    /// Credentials given on the command line win, then a pre-issued token,
    /// then `GARMIN_EMAIL` / `GARMIN_PASSWORD`.
    ///
    /// # Errors
    ///
    /// Returns an error if no complete credential source is available
    pub fn auth_method(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> AppResult<AuthMethod> {
        if let (Some(email), Some(password)) = (email.clone(), password.clone()) {
            return Ok(AuthMethod::Password(Credentials { email, password }));
        }
        if let Some(token) = &self.oauth2_token {
            return Ok(AuthMethod::Token(token.clone()));
        }

        let email = email.or_else(|| env_non_empty(env_config::GARMIN_EMAIL));
        let password = password.or_else(|| env_non_empty(env_config::GARMIN_PASSWORD));
        match (email, password) {
            (Some(email), Some(password)) => Ok(AuthMethod::Password(Credentials { email, password })),
            _ => Err(AppError::auth_required(format!(
                "Garmin credentials required: set {} and {} (or pass --email and --password)",
                env_config::GARMIN_EMAIL,
                env_config::GARMIN_PASSWORD
            ))),
        }
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env_non_empty(key).unwrap_or_else(|| default.to_owned())
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GarminConfig {
        GarminConfig {
            domain: DEFAULT_DOMAIN.to_owned(),
            oauth2_token: None,
            consumer: None,
            http: HttpClientConfig::default(),
        }
    }

    #[test]
    fn test_cli_credentials_win_over_token() {
        let mut config = config();
        config.oauth2_token = Some("token".to_owned());

        let method = config
            .auth_method(Some("me@example.com".to_owned()), Some("pw".to_owned()))
            .unwrap();

        assert_eq!(
            method,
            AuthMethod::Password(Credentials {
                email: "me@example.com".to_owned(),
                password: "pw".to_owned(),
            })
        );
    }

    #[test]
    fn test_token_used_without_cli_credentials() {
        let mut config = config();
        config.oauth2_token = Some("token".to_owned());

        assert_eq!(
            config.auth_method(None, None).unwrap(),
            AuthMethod::Token("token".to_owned())
        );
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            email: "me@example.com".to_owned(),
            password: "hunter2".to_owned(),
        };
        let debug = format!("{credentials:?}");
        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_connect_api_base_follows_domain() {
        let mut config = config();
        config.domain = "garmin.cn".to_owned();
        assert_eq!(config.connect_api_base(), "https://connectapi.garmin.cn");
    }
}
