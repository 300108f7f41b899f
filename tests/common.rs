// ABOUTME: Shared test utilities for integration tests
// ABOUTME: In-memory WorkoutApi fake and workout document fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs, dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use garmin_zone_sync::errors::{AppError, AppResult};
use garmin_zone_sync::garmin::WorkoutApi;
use garmin_zone_sync::models::{Workout, WorkoutSummary};
use serde_json::{json, Value};

/// In-memory Garmin Connect stand-in that records every update
#[derive(Default)]
pub struct FakeWorkoutApi {
    summaries: Vec<WorkoutSummary>,
    documents: HashMap<u64, Value>,
    updates: Mutex<Vec<Workout>>,
    fail_updates: bool,
}

impl FakeWorkoutApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a workout document; its list entry is derived from it
    pub fn with_workout(mut self, document: Value) -> Self {
        let summary: WorkoutSummary = serde_json::from_value(json!({
            "workoutId": document["workoutId"],
            "workoutName": document["workoutName"],
            "sportType": document["sportType"],
            "ownerId": 99,
        }))
        .unwrap();
        if let Some(id) = summary.workout_id {
            self.documents.insert(id, document);
        }
        self.summaries.push(summary);
        self
    }

    /// Register a list entry that has no fetchable document behind it
    pub fn with_listing(mut self, entry: Value) -> Self {
        self.summaries.push(serde_json::from_value(entry).unwrap());
        self
    }

    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    pub fn updates(&self) -> Vec<Workout> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkoutApi for FakeWorkoutApi {
    async fn list_workouts(&self, limit: u32) -> AppResult<Vec<WorkoutSummary>> {
        Ok(self
            .summaries
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_workout_raw(&self, workout_id: u64) -> AppResult<Value> {
        self.documents.get(&workout_id).cloned().ok_or_else(|| {
            AppError::external_service("Garmin Connect", format!("workout {workout_id} not found"))
        })
    }

    async fn update_workout(&self, workout: &Workout) -> AppResult<()> {
        if self.fail_updates {
            return Err(AppError::external_service(
                "Garmin Connect",
                "request failed with status 500 Internal Server Error",
            ));
        }
        self.updates.lock().unwrap().push(workout.clone());
        Ok(())
    }
}

pub fn running() -> Value {
    json!({"sportTypeId": 1, "sportTypeKey": "running", "displayOrder": 1})
}

pub fn cycling() -> Value {
    json!({"sportTypeId": 2, "sportTypeKey": "cycling", "displayOrder": 2})
}

/// Warmup, 4x (tempo interval + recovery), cooldown; recovery and the
/// bookends have no target yet
pub fn interval_workout(id: u64, name: &str) -> Value {
    json!({
        "workoutId": id,
        "ownerId": 99,
        "workoutName": name,
        "sportType": running(),
        "estimatedDurationInSecs": 2700,
        "workoutSegments": [{
            "segmentOrder": 1,
            "sportType": running(),
            "workoutSteps": [
                {
                    "type": "ExecutableStepDTO",
                    "stepId": 11,
                    "stepOrder": 1,
                    "stepType": {"stepTypeId": 1, "stepTypeKey": "warmup", "displayOrder": 1},
                    "description": "Easy 10 minutes",
                    "endCondition": {"conditionTypeId": 2, "conditionTypeKey": "time"},
                    "endConditionValue": 600.0,
                    "targetType": {"workoutTargetTypeId": 1, "workoutTargetTypeKey": "no.target"}
                },
                {
                    "type": "RepeatGroupDTO",
                    "stepId": 12,
                    "stepOrder": 2,
                    "stepType": {"stepTypeId": 6, "stepTypeKey": "repeat"},
                    "numberOfIterations": 4,
                    "smartRepeat": false,
                    "workoutSteps": [
                        {
                            "type": "ExecutableStepDTO",
                            "stepId": 13,
                            "stepOrder": 3,
                            "stepType": {"stepTypeId": 3, "stepTypeKey": "interval"},
                            "description": "Tempo 1km",
                            "endCondition": {"conditionTypeId": 3, "conditionTypeKey": "distance"},
                            "endConditionValue": 1000.0,
                            "targetType": null
                        },
                        {
                            "type": "ExecutableStepDTO",
                            "stepId": 14,
                            "stepOrder": 4,
                            "stepType": {"stepTypeId": 4, "stepTypeKey": "recovery"},
                            "description": "Jog",
                            "endCondition": {"conditionTypeId": 2, "conditionTypeKey": "time"},
                            "endConditionValue": 90.0,
                            "targetType": null
                        }
                    ]
                },
                {
                    "type": "ExecutableStepDTO",
                    "stepId": 15,
                    "stepOrder": 5,
                    "stepType": {"stepTypeId": 2, "stepTypeKey": "cooldown"},
                    "description": "Slow jog home",
                    "endCondition": {"conditionTypeId": 1, "conditionTypeKey": "lap.button"},
                    "targetType": null
                }
            ]
        }]
    })
}

/// A single interval step that already carries a pace target
pub fn targeted_workout(id: u64, name: &str) -> Value {
    json!({
        "workoutId": id,
        "workoutName": name,
        "sportType": running(),
        "workoutSegments": [{
            "segmentOrder": 1,
            "workoutSteps": [{
                "type": "ExecutableStepDTO",
                "stepType": {"stepTypeId": 4, "stepTypeKey": "recovery"},
                "description": "Recovery jog",
                "targetType": {"workoutTargetTypeId": 6, "workoutTargetTypeKey": "pace.zone"},
                "targetValueOne": 3.0,
                "targetValueTwo": 3.3
            }]
        }]
    })
}
