// ABOUTME: Core types and constants for Garmin workout HR zone sync
// ABOUTME: Foundation crate with error handling, constants and the workout document model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Zone Sync Core
//!
//! Foundation crate shared by the Garmin client, the step classifier and the
//! sync driver. It changes infrequently and carries no I/O.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Garmin identifiers, keyword sets, endpoints and env names
//! - **models**: Workout document model that round-trips unknown fields

/// Unified error handling with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Workout document model (workouts, segments, steps, targets)
pub mod models;
