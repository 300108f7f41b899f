// ABOUTME: Garmin Connect integration: workout API trait, HTTP client and SSO authentication
// ABOUTME: The sync driver depends only on the WorkoutApi trait so it can run against fakes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Garmin Connect
//!
//! - **client**: `ConnectClient`, the reqwest-backed [`WorkoutApi`]
//! - **sso**: email/password login producing an OAuth2 bearer token
//! - **oauth1**: request signing for the token exchange
//! - **`http_client`**: shared HTTP client construction

/// Connect API client
pub mod client;
/// HTTP client construction
pub mod http_client;
/// OAuth1 request signing
pub mod oauth1;
/// SSO login flow
pub mod sso;

pub use client::ConnectClient;

use async_trait::async_trait;
use serde_json::Value;
use zone_sync_core::errors::AppResult;
use zone_sync_core::models::{Workout, WorkoutSummary};

/// Workout operations of the Garmin Connect API
#[async_trait]
pub trait WorkoutApi: Send + Sync {
    /// List the user's own workouts ordered by name
    async fn list_workouts(&self, limit: u32) -> AppResult<Vec<WorkoutSummary>>;

    /// Fetch a full workout as untyped JSON
    async fn get_workout_raw(&self, workout_id: u64) -> AppResult<Value>;

    /// Fetch a full workout
    async fn get_workout(&self, workout_id: u64) -> AppResult<Workout> {
        let raw = self.get_workout_raw(workout_id).await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Replace a workout with the given document
    async fn update_workout(&self, workout: &Workout) -> AppResult<()>;
}
