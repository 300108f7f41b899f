// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for Garmin identifiers, step keywords and environment names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than kept in one file.

/// Garmin Connect endpoints, user agents and workout identifiers
pub mod garmin;
/// Description keyword sets used by the step classifier
pub mod keywords;
/// Environment variable names
pub mod env_config;

/// Heart rate zone assigned when `--zone` is not given
pub const DEFAULT_HR_ZONE: u8 = 2;

/// Lowest heart rate zone Garmin accepts
pub const MIN_HR_ZONE: u8 = 1;

/// Highest heart rate zone Garmin accepts
pub const MAX_HR_ZONE: u8 = 5;

/// Number of workouts fetched when `--limit` is not given
pub const DEFAULT_WORKOUT_LIMIT: u32 = 30;

/// Sport type processed when `--sport` is not given
pub const DEFAULT_SPORT: &str = "running";

/// Workout names longer than this are cut in the `--list` table
pub const LIST_NAME_WIDTH: usize = 38;

/// Service label used in error messages and logs
pub const SERVICE_NAME: &str = "Garmin Connect";
