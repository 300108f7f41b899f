// ABOUTME: Library entry point for the Garmin workout heart rate zone sync tool
// ABOUTME: Classifies workout steps, applies zone targets and talks to Garmin Connect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Garmin Zone Sync
//!
//! Adds a heart rate zone target to the easy-effort steps of structured
//! Garmin Connect workouts.
//!
//! ## Architecture
//!
//! - **classifier**: pure keyword rules deciding which steps qualify
//! - **mutator**: applies the zone target and walks nested repeat groups
//! - **sync**: list, filter, fetch, mutate and update workouts
//! - **garmin**: Connect API client, SSO login and OAuth1 signing
//! - **config** / **logging**: environment-driven setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use garmin_zone_sync::config::GarminConfig;
//! use garmin_zone_sync::errors::AppResult;
//! use garmin_zone_sync::garmin::ConnectClient;
//! use garmin_zone_sync::sync::{sync_workouts, SyncOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> AppResult<()> {
//!     let config = GarminConfig::from_env()?;
//!     let auth = config.auth_method(None, None)?;
//!     let client = ConnectClient::connect(&config, auth).await?;
//!
//!     let options = SyncOptions { dry_run: true, ..SyncOptions::default() };
//!     sync_workouts(&client, &options, &mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

/// Step classification rules
pub mod classifier;

/// Environment configuration and credential resolution
pub mod config;

/// Garmin Connect client and authentication
pub mod garmin;

/// Tracing subscriber setup
pub mod logging;

/// Zone target application and step walking
pub mod mutator;

/// Sync, list and dump operations
pub mod sync;

// Re-export foundation modules from zone-sync-core
pub use zone_sync_core::{constants, errors, models};
