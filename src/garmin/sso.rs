// ABOUTME: Garmin SSO login flow turning an email/password pair into an OAuth2 bearer token
// ABOUTME: Scrapes the embedded sign-in widget, then runs the OAuth1 to OAuth2 token exchange
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Garmin SSO Login
//!
//! Garmin Connect has no public password grant. The mobile apps sign in
//! through the embedded SSO widget, trade the resulting service ticket for an
//! OAuth1 token, then trade that for the OAuth2 bearer token the Connect API
//! accepts. This module replays that sequence:
//!
//! 1. `GET /sso/embed` to receive session cookies
//! 2. `GET /sso/signin` and scrape the `_csrf` token
//! 3. `POST /sso/signin` with the credentials
//! 4. scrape the service ticket from the success page
//! 5. `GET /oauth-service/oauth/preauthorized` (OAuth1 signed, consumer only)
//! 6. `POST /oauth-service/oauth/exchange/user/2.0` (OAuth1 signed, with token)

use regex::Regex;
use reqwest::header::{AUTHORIZATION, REFERER, USER_AGENT};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info};
use zone_sync_core::constants::garmin::{endpoints, OAUTH_CONSUMER_URL, SSO_USER_AGENT};
use zone_sync_core::errors::{AppError, AppResult};

use super::oauth1::{OAuth1Consumer, OAuth1Token, RequestSigner};
use crate::config::Credentials;

/// Failures specific to the SSO sign-in pages
#[derive(Debug, thiserror::Error)]
pub enum SsoError {
    /// The sign-in page did not contain a CSRF token
    #[error("CSRF token not found on the sign-in page")]
    MissingCsrf,

    /// The page after sign-in had no `<title>`
    #[error("sign-in response has no page title")]
    MissingTitle,

    /// Garmin asked for a second factor
    #[error("account requires multi-factor authentication, which is not supported")]
    MfaRequired,

    /// Credentials rejected or unexpected page
    #[error("sign-in failed (page title: '{title}')")]
    Rejected {
        /// Title of the page Garmin returned
        title: String,
    },

    /// Success page without a service ticket
    #[error("service ticket not found on the sign-in success page")]
    MissingTicket,
}

impl From<SsoError> for AppError {
    fn from(error: SsoError) -> Self {
        let message = error.to_string();
        match error {
            SsoError::Rejected { .. } => Self::auth_invalid(message).with_source(error),
            _ => Self::external_auth_failed(message).with_source(error),
        }
    }
}

/// OAuth2 token returned by the exchange endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct OAuth2Token {
    /// Bearer token for the Connect API
    pub access_token: String,
    /// Token type, normally `Bearer`
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Garmin SSO and OAuth endpoints for one domain
#[derive(Debug, Clone)]
pub struct SsoEndpoints {
    sso_base: String,
    connect_api_base: String,
}

impl SsoEndpoints {
    /// Endpoints rooted at explicit base URLs; `sso_base` includes the `/sso` path
    #[must_use]
    pub fn new(sso_base: impl Into<String>, connect_api_base: impl Into<String>) -> Self {
        let trimmed = |base: String| base.trim_end_matches('/').to_owned();
        Self {
            sso_base: trimmed(sso_base.into()),
            connect_api_base: trimmed(connect_api_base.into()),
        }
    }

    /// Endpoints for `garmin.com`, `garmin.cn`, ...
    #[must_use]
    pub fn for_domain(domain: &str) -> Self {
        Self::new(
            format!("https://sso.{domain}/sso"),
            format!("https://connectapi.{domain}"),
        )
    }

    fn embed(&self) -> String {
        format!("{}/embed", self.sso_base)
    }

    fn signin(&self) -> String {
        format!("{}/signin", self.sso_base)
    }

    fn oauth(&self, path: &str) -> String {
        format!("{}/{path}", self.connect_api_base)
    }

    /// Query parameters of the embed bootstrap request
    fn embed_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", "gauth-widget".to_owned()),
            ("embedWidget", "true".to_owned()),
            ("gauthHost", self.sso_base.clone()),
        ]
    }

    /// Query parameters of both sign-in requests
    fn signin_params(&self) -> Vec<(&'static str, String)> {
        let embed = self.embed();
        vec![
            ("id", "gauth-widget".to_owned()),
            ("embedWidget", "true".to_owned()),
            ("gauthHost", embed.clone()),
            ("service", embed.clone()),
            ("source", embed.clone()),
            ("redirectAfterAccountLoginUrl", embed.clone()),
            ("redirectAfterAccountCreationUrl", embed),
        ]
    }
}

/// Log in with email and password and return an OAuth2 token
///
/// # Errors
///
/// Returns an error if any request fails, the credentials are rejected, the
/// account needs MFA, or a page does not have the expected shape
pub async fn login(
    client: &Client,
    urls: &SsoEndpoints,
    consumer: &OAuth1Consumer,
    credentials: &Credentials,
) -> AppResult<OAuth2Token> {
    info!(email = %credentials.email, "Starting Garmin SSO login");

    let ticket = sign_in(client, urls, credentials).await?;
    debug!("Received SSO service ticket");

    let oauth1 = preauthorize(client, urls, consumer, &ticket).await?;
    debug!(mfa = oauth1.mfa_token.is_some(), "Received OAuth1 token");

    let oauth2 = exchange(client, urls, consumer, &oauth1).await?;
    info!(
        expires_in = ?oauth2.expires_in,
        "Garmin SSO login complete"
    );
    Ok(oauth2)
}

/// Fetch the published consumer key pair of the Garmin mobile app
///
/// # Errors
///
/// Returns an error if the request fails or the JSON is malformed
pub async fn fetch_consumer(client: &Client) -> AppResult<OAuth1Consumer> {
    fetch_consumer_from(client, OAUTH_CONSUMER_URL).await
}

/// Fetch a consumer key pair from `url`
///
/// # Errors
///
/// Returns an error if the request fails or the JSON is malformed
pub async fn fetch_consumer_from(client: &Client, url: &str) -> AppResult<OAuth1Consumer> {
    debug!(url, "Fetching OAuth1 consumer");
    let response = ensure_success(client.get(url).send().await?, "consumer").await?;
    Ok(response.json().await?)
}

async fn sign_in(
    client: &Client,
    urls: &SsoEndpoints,
    credentials: &Credentials,
) -> AppResult<String> {
    let embed_url = urls.embed();
    let signin_url = urls.signin();
    let signin_params = urls.signin_params();

    let embed = client
        .get(&embed_url)
        .query(&urls.embed_params())
        .header(USER_AGENT, SSO_USER_AGENT)
        .send()
        .await?;
    let embed = ensure_success(embed, "embed").await?;
    let referer = embed.url().to_string();

    let page = client
        .get(&signin_url)
        .query(&signin_params)
        .header(USER_AGENT, SSO_USER_AGENT)
        .header(REFERER, referer)
        .send()
        .await?;
    let page = ensure_success(page, "sign-in page").await?;
    let referer = page.url().to_string();
    let csrf = extract_csrf(&page.text().await?)?;

    let form = [
        ("username", credentials.email.as_str()),
        ("password", credentials.password.as_str()),
        ("embed", "true"),
        ("_csrf", csrf.as_str()),
    ];
    let result = client
        .post(&signin_url)
        .query(&signin_params)
        .header(USER_AGENT, SSO_USER_AGENT)
        .header(REFERER, referer)
        .form(&form)
        .send()
        .await?;
    let html = ensure_success(result, "sign-in").await?.text().await?;

    let title = extract_title(&html)?;
    if title.contains("MFA") {
        return Err(SsoError::MfaRequired.into());
    }
    if title != "Success" {
        return Err(SsoError::Rejected { title }.into());
    }
    extract_ticket(&html)
}

async fn preauthorize(
    client: &Client,
    urls: &SsoEndpoints,
    consumer: &OAuth1Consumer,
    ticket: &str,
) -> AppResult<OAuth1Token> {
    let url = urls.oauth(endpoints::OAUTH_PREAUTHORIZED);
    let login_url = urls.embed();
    let query = [
        ("ticket", ticket),
        ("login-url", login_url.as_str()),
        ("accepts-mfa-tokens", "true"),
    ];
    let authorization = RequestSigner::new(consumer, None).authorization("GET", &url, &query);

    let response = client
        .get(&url)
        .query(&query)
        .header(USER_AGENT, SSO_USER_AGENT)
        .header(AUTHORIZATION, authorization)
        .send()
        .await?;
    let body = ensure_success(response, "OAuth1 preauthorization")
        .await?
        .text()
        .await?;
    OAuth1Token::from_form(&body)
}

async fn exchange(
    client: &Client,
    urls: &SsoEndpoints,
    consumer: &OAuth1Consumer,
    oauth1: &OAuth1Token,
) -> AppResult<OAuth2Token> {
    let url = urls.oauth(endpoints::OAUTH_EXCHANGE);
    let form: Vec<(&str, &str)> = oauth1
        .mfa_token
        .as_deref()
        .map(|mfa| vec![("mfa_token", mfa)])
        .unwrap_or_default();
    let authorization =
        RequestSigner::new(consumer, Some(oauth1)).authorization("POST", &url, &form);

    let response = client
        .post(&url)
        .header(USER_AGENT, SSO_USER_AGENT)
        .header(AUTHORIZATION, authorization)
        .form(&form)
        .send()
        .await?;
    Ok(ensure_success(response, "OAuth2 exchange")
        .await?
        .json()
        .await?)
}

/// Turn a non-success response into an authentication error
async fn ensure_success(response: Response, step: &str) -> AppResult<Response> {
    let status = response.status();
    debug!(step, %status, "SSO response");
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AppError::external_auth_failed(format!(
        "{step} request failed with status {status}: {}",
        truncate(&body, 200)
    )))
}

fn truncate(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(index, _)| &text[..index])
}

fn capture(pattern: &str, html: &str) -> AppResult<Option<String>> {
    let regex = Regex::new(pattern)
        .map_err(|e| AppError::internal(format!("invalid pattern {pattern}: {e}")))?;
    Ok(regex
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().to_owned()))
}

/// CSRF token of the sign-in form
///
/// # Errors
///
/// Returns an error if the page has no `_csrf` input
pub fn extract_csrf(html: &str) -> AppResult<String> {
    capture(r#"name="_csrf"\s+value="(.+?)""#, html)?.ok_or_else(|| SsoError::MissingCsrf.into())
}

/// Text of the page `<title>`
///
/// # Errors
///
/// Returns an error if the page has no title
pub fn extract_title(html: &str) -> AppResult<String> {
    capture(r"<title>(.+?)</title>", html)?.ok_or_else(|| SsoError::MissingTitle.into())
}

/// Service ticket embedded in the success page
///
/// # Errors
///
/// Returns an error if the page has no ticket
pub fn extract_ticket(html: &str) -> AppResult<String> {
    capture(r#"embed\?ticket=([^"]+)""#, html)?.ok_or_else(|| SsoError::MissingTicket.into())
}
