// ABOUTME: OAuth1 HMAC-SHA1 request signing for the Garmin token exchange endpoints
// ABOUTME: Builds signature base strings, signs them with ring and renders Authorization headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth1 Signing
//!
//! Garmin still issues OAuth2 bearer tokens through an OAuth1 handshake, so
//! the two token exchange requests must carry an RFC 5849 signature. Only
//! HMAC-SHA1 is supported because that is all Garmin accepts.

use base64::{engine::general_purpose, Engine as _};
use rand::{distributions::Alphanumeric, Rng};
use ring::hmac;
use serde::Deserialize;
use url::form_urlencoded;
use zone_sync_core::errors::{AppError, AppResult};

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// OAuth1 consumer key pair of the Garmin mobile app
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OAuth1Consumer {
    /// Consumer key
    pub consumer_key: String,
    /// Consumer secret
    pub consumer_secret: String,
}

/// OAuth1 token issued for an SSO ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuth1Token {
    /// Token
    pub oauth_token: String,
    /// Token secret
    pub oauth_token_secret: String,
    /// MFA token, forwarded to the OAuth2 exchange when present
    pub mfa_token: Option<String>,
}

impl OAuth1Token {
    /// Parse the form-encoded body returned by the preauthorized endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the token or its secret is missing
    pub fn from_form(body: &str) -> AppResult<Self> {
        let mut oauth_token = None;
        let mut oauth_token_secret = None;
        let mut mfa_token = None;

        for (key, value) in form_urlencoded::parse(body.trim().as_bytes()) {
            match key.as_ref() {
                "oauth_token" => oauth_token = Some(value.into_owned()),
                "oauth_token_secret" => oauth_token_secret = Some(value.into_owned()),
                "mfa_token" if !value.is_empty() => mfa_token = Some(value.into_owned()),
                _ => {}
            }
        }

        match (oauth_token, oauth_token_secret) {
            (Some(oauth_token), Some(oauth_token_secret)) => Ok(Self {
                oauth_token,
                oauth_token_secret,
                mfa_token,
            }),
            _ => Err(AppError::invalid_format(
                "OAuth1 response is missing oauth_token or oauth_token_secret",
            )),
        }
    }
}

/// Signs requests with a consumer and an optional token
#[derive(Debug, Clone, Copy)]
pub struct RequestSigner<'a> {
    consumer: &'a OAuth1Consumer,
    token: Option<&'a OAuth1Token>,
}

impl<'a> RequestSigner<'a> {
    /// Signer for a consumer, optionally acting for a token holder
    #[must_use]
    pub const fn new(consumer: &'a OAuth1Consumer, token: Option<&'a OAuth1Token>) -> Self {
        Self { consumer, token }
    }

    /// `Authorization` header value with a fresh nonce and the current time
    ///
    /// `params` are the decoded query and form parameters of the request.
    #[must_use]
    pub fn authorization(&self, method: &str, base_url: &str, params: &[(&str, &str)]) -> String {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        self.authorization_with(
            method,
            base_url,
            params,
            &nonce,
            chrono::Utc::now().timestamp(),
        )
    }

    /// `Authorization` header value for a fixed nonce and timestamp
    #[must_use]
    pub fn authorization_with(
        &self,
        method: &str,
        base_url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> String {
        let mut oauth_params = self.oauth_params(nonce, timestamp);

        let mut all_params = oauth_params.clone();
        all_params.extend(
            params
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned())),
        );

        let base = signature_base_string(method, base_url, &all_params);
        let signature = sign(
            &base,
            &self.consumer.consumer_secret,
            self.token.map(|token| token.oauth_token_secret.as_str()),
        );
        oauth_params.push(("oauth_signature".to_owned(), signature));
        oauth_params.sort();

        let fields: Vec<String> = oauth_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
            .collect();
        format!("OAuth {}", fields.join(", "))
    }

    fn oauth_params(&self, nonce: &str, timestamp: i64) -> Vec<(String, String)> {
        let mut params = vec![
            (
                "oauth_consumer_key".to_owned(),
                self.consumer.consumer_key.clone(),
            ),
            ("oauth_nonce".to_owned(), nonce.to_owned()),
            (
                "oauth_signature_method".to_owned(),
                SIGNATURE_METHOD.to_owned(),
            ),
            ("oauth_timestamp".to_owned(), timestamp.to_string()),
            ("oauth_version".to_owned(), OAUTH_VERSION.to_owned()),
        ];
        if let Some(token) = self.token {
            params.push(("oauth_token".to_owned(), token.oauth_token.clone()));
        }
        params
    }
}

/// RFC 3986 percent-encoding (unreserved characters stay as-is)
#[must_use]
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// `METHOD&url&params` with parameters encoded, sorted and joined
#[must_use]
pub fn signature_base_string(method: &str, base_url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(key, value)| (percent_encode(key), percent_encode(value)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&normalized)
    )
}

/// Base64 HMAC-SHA1 of `base` keyed with `consumer_secret&token_secret`
#[must_use]
pub fn sign(base: &str, consumer_secret: &str, token_secret: Option<&str>) -> String {
    let signing_key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret.unwrap_or_default())
    );
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, signing_key.as_bytes());
    let tag = hmac::sign(&key, base.as_bytes());
    general_purpose::STANDARD.encode(tag.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREAUTHORIZED_URL: &str =
        "https://connectapi.garmin.com/oauth-service/oauth/preauthorized";

    fn consumer() -> OAuth1Consumer {
        OAuth1Consumer {
            consumer_key: "ck-test".to_owned(),
            consumer_secret: "cs-test".to_owned(),
        }
    }

    fn pairs(params: &[(&str, &str)]) -> Vec<(String, String)> {
        params
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_percent_encode_keeps_unreserved() {
        assert_eq!(percent_encode("AZaz09-._~"), "AZaz09-._~");
        assert_eq!(percent_encode("a b+c/d=e"), "a%20b%2Bc%2Fd%3De");
    }

    #[test]
    fn test_signature_base_string_sorts_and_double_encodes() {
        let params = pairs(&[
            ("ticket", "ST-0123-abc-cas"),
            ("login-url", "https://sso.garmin.com/sso/embed"),
            ("accepts-mfa-tokens", "true"),
            ("oauth_consumer_key", "ck-test"),
            ("oauth_nonce", "abc123"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1700000000"),
            ("oauth_version", "1.0"),
        ]);

        let base = signature_base_string("get", PREAUTHORIZED_URL, &params);

        assert_eq!(
            base,
            "GET&https%3A%2F%2Fconnectapi.garmin.com%2Foauth-service%2Foauth%2Fpreauthorized\
             &accepts-mfa-tokens%3Dtrue\
             %26login-url%3Dhttps%253A%252F%252Fsso.garmin.com%252Fsso%252Fembed\
             %26oauth_consumer_key%3Dck-test\
             %26oauth_nonce%3Dabc123\
             %26oauth_signature_method%3DHMAC-SHA1\
             %26oauth_timestamp%3D1700000000\
             %26oauth_version%3D1.0\
             %26ticket%3DST-0123-abc-cas"
        );
    }

    #[test]
    fn test_consumer_only_signature() {
        let consumer = consumer();
        let header = RequestSigner::new(&consumer, None).authorization_with(
            "GET",
            PREAUTHORIZED_URL,
            &[
                ("ticket", "ST-0123-abc-cas"),
                ("login-url", "https://sso.garmin.com/sso/embed"),
                ("accepts-mfa-tokens", "true"),
            ],
            "abc123",
            1_700_000_000,
        );

        assert!(header.starts_with("OAuth oauth_consumer_key=\"ck-test\", "));
        assert!(header.contains("oauth_signature=\"kBd9WhpKHZehsffwAY4r0XA70Z0%3D\""));
        assert!(!header.contains("oauth_token="));
    }

    #[test]
    fn test_token_signature_uses_token_secret() {
        let consumer = consumer();
        let token = OAuth1Token {
            oauth_token: "tok".to_owned(),
            oauth_token_secret: "tok secret".to_owned(),
            mfa_token: None,
        };
        let header = RequestSigner::new(&consumer, Some(&token)).authorization_with(
            "POST",
            "https://connectapi.garmin.com/oauth-service/oauth/exchange/user/2.0",
            &[("mfa_token", "m f+a")],
            "n0nce",
            1_700_000_001,
        );

        assert!(header.contains("oauth_token=\"tok\""));
        assert!(header.contains("oauth_signature=\"HEP4ZPEept3s2FKygeHGvHsWV44%3D\""));
    }

    #[test]
    fn test_fresh_nonces_differ() {
        let consumer = consumer();
        let signer = RequestSigner::new(&consumer, None);
        let first = signer.authorization("GET", PREAUTHORIZED_URL, &[]);
        let second = signer.authorization("GET", PREAUTHORIZED_URL, &[]);
        assert_ne!(first, second);
    }

    #[test]
    fn test_oauth1_token_from_form() {
        let token =
            OAuth1Token::from_form("oauth_token=abc&oauth_token_secret=s%2Fecret&mfa_token=")
                .unwrap();
        assert_eq!(token.oauth_token, "abc");
        assert_eq!(token.oauth_token_secret, "s/ecret");
        assert_eq!(token.mfa_token, None);

        assert!(OAuth1Token::from_form("oauth_token=abc").is_err());
    }
}
