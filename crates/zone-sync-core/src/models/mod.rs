// ABOUTME: Core data models for Garmin structured workouts
// ABOUTME: Re-exports workout, segment, step and target types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Workout document model
pub mod workout;

pub use workout::{
    EndCondition, ExecutableStep, Nullable, RepeatGroup, SportType, StepKind, StepType, TargetType,
    Workout, WorkoutSegment, WorkoutStep, WorkoutSummary,
};
