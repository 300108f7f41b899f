// ABOUTME: Garmin Connect API client for listing, reading and updating workouts
// ABOUTME: Authenticates with a bearer token obtained via SSO or supplied by the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use zone_sync_core::constants::garmin::{endpoints, CONNECT_USER_AGENT};
use zone_sync_core::constants::SERVICE_NAME;
use zone_sync_core::errors::{AppError, AppResult};
use zone_sync_core::models::{Workout, WorkoutSummary};

use super::http_client::build_client;
use super::sso::{self, SsoEndpoints};
use super::WorkoutApi;
use crate::config::{AuthMethod, GarminConfig};

/// Profile fields used for the login banner
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SocialProfile {
    display_name: Option<String>,
    full_name: Option<String>,
}

/// Authenticated Garmin Connect API client
pub struct ConnectClient {
    client: Client,
    api_base_url: String,
    access_token: String,
}

impl ConnectClient {
    /// Create a client around an existing bearer token
    #[must_use]
    pub fn with_token(client: Client, api_base_url: impl Into<String>, access_token: String) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into(),
            access_token,
        }
    }

    /// Authenticate against Garmin Connect and return a ready client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or login fails
    pub async fn connect(config: &GarminConfig, auth: AuthMethod) -> AppResult<Self> {
        let client = build_client(&config.http)?;

        let access_token = match auth {
            AuthMethod::Token(token) => {
                info!("Using pre-issued Garmin OAuth2 token");
                token
            }
            AuthMethod::Password(credentials) => {
                let consumer = match &config.consumer {
                    Some(consumer) => consumer.clone(),
                    None => sso::fetch_consumer(&client).await?,
                };
                let urls = SsoEndpoints::for_domain(&config.domain);
                sso::login(&client, &urls, &consumer, &credentials)
                    .await?
                    .access_token
            }
        };

        Ok(Self::with_token(
            client,
            config.connect_api_base(),
            access_token,
        ))
    }

    /// Display name of the logged-in user, if the profile exposes one
    ///
    /// # Errors
    ///
    /// Returns an error if the profile request fails
    pub async fn display_name(&self) -> AppResult<Option<String>> {
        let profile: SocialProfile = self
            .send_json(self.request(Method::GET, endpoints::SOCIAL_PROFILE))
            .await?;
        Ok(profile.display_name.or(profile.full_name))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(USER_AGENT, CONNECT_USER_AGENT)
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "Received Garmin Connect response");

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_owned();
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::external_auth_failed(format!(
                "{SERVICE_NAME} rejected the access token for {url} ({status})"
            )));
        }
        Err(AppError::external_service(
            SERVICE_NAME,
            format!("request to {url} failed with status {status}: {body}"),
        ))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        Ok(self.send(request).await?.json().await?)
    }
}

#[async_trait]
impl WorkoutApi for ConnectClient {
    async fn list_workouts(&self, limit: u32) -> AppResult<Vec<WorkoutSummary>> {
        let limit = limit.to_string();
        let request = self.request(Method::GET, endpoints::WORKOUTS).query(&[
            ("start", "1"),
            ("limit", limit.as_str()),
            ("myWorkoutsOnly", "true"),
            ("sharedWorkoutsOnly", "false"),
            ("orderBy", "WORKOUT_NAME"),
            ("orderSeq", "ASC"),
            ("includeAtp", "false"),
        ]);
        let workouts: Vec<WorkoutSummary> = self.send_json(request).await?;
        info!(count = workouts.len(), "Fetched workout list");
        Ok(workouts)
    }

    async fn get_workout_raw(&self, workout_id: u64) -> AppResult<Value> {
        let path = format!("{}/{workout_id}", endpoints::WORKOUT);
        self.send_json(self.request(Method::GET, &path))
            .await
    }

    async fn update_workout(&self, workout: &Workout) -> AppResult<()> {
        let workout_id = workout.workout_id.ok_or_else(|| {
            AppError::invalid_input(format!("workout '{}' has no workoutId", workout.name()))
        })?;
        let path = format!("{}/{workout_id}", endpoints::WORKOUT);
        self.send(self.request(Method::PUT, &path).json(workout))
            .await?;
        info!(workout_id, "Updated workout");
        Ok(())
    }
}
