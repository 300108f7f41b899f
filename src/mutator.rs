// ABOUTME: Applies heart rate zone targets to classified workout steps
// ABOUTME: Walks segments and nested repeat groups and reports every step decision
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use zone_sync_core::constants::{DEFAULT_HR_ZONE, MAX_HR_ZONE, MIN_HR_ZONE};
use zone_sync_core::errors::{AppError, AppResult};
use zone_sync_core::models::{ExecutableStep, Workout, WorkoutStep};

use crate::classifier::{classify, Decision};

/// Validated heart rate zone number (1-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HrZone(u8);

impl HrZone {
    /// Validate a zone number
    ///
    /// # Errors
    ///
    /// Returns an error if `zone` is outside 1-5
    pub fn new(zone: u8) -> AppResult<Self> {
        if (MIN_HR_ZONE..=MAX_HR_ZONE).contains(&zone) {
            Ok(Self(zone))
        } else {
            Err(AppError::invalid_input(format!(
                "HR zone must be between {MIN_HR_ZONE} and {MAX_HR_ZONE}, got {zone}"
            )))
        }
    }

    /// Zone number
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for HrZone {
    fn default() -> Self {
        Self(DEFAULT_HR_ZONE)
    }
}

/// What happened to one executable step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Human-readable step summary, taken before mutation
    pub summary: String,
    /// Classifier decision
    pub decision: Decision,
}

impl StepOutcome {
    /// Whether the step was given a zone target
    #[must_use]
    pub const fn modified(&self) -> bool {
        self.decision.should_add()
    }
}

/// Result of applying zone targets to a workout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutChanges {
    /// One entry per executable step, in document order
    pub outcomes: Vec<StepOutcome>,
    /// `false` when the workout had no segments at all
    pub has_segments: bool,
}

impl WorkoutChanges {
    /// Number of steps that received a target
    #[must_use]
    pub fn modified_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.modified()).count()
    }
}

/// Set the zone target on a step if the classifier allows it
///
/// Returns the decision; the step is only touched when it says so.
pub fn apply_zone(step: &mut ExecutableStep, zone: HrZone) -> Decision {
    let decision = classify(step);
    if decision.should_add() {
        step.set_heart_rate_zone(zone.get());
    }
    decision
}

/// Apply zone targets to every executable step of a workout
pub fn apply_to_workout(workout: &mut Workout, zone: HrZone) -> WorkoutChanges {
    let Some(segments) = workout.workout_segments.as_mut() else {
        return WorkoutChanges::default();
    };

    let mut changes = WorkoutChanges {
        outcomes: Vec::new(),
        has_segments: true,
    };
    for segment in segments {
        apply_to_steps(&mut segment.workout_steps, zone, &mut changes.outcomes);
    }
    changes
}

fn apply_to_steps(steps: &mut [WorkoutStep], zone: HrZone, outcomes: &mut Vec<StepOutcome>) {
    for step in steps {
        match step {
            WorkoutStep::Repeat(group) => apply_to_steps(&mut group.workout_steps, zone, outcomes),
            WorkoutStep::Executable(executable) => {
                let summary = describe_step(executable);
                let decision = apply_zone(executable, zone);
                outcomes.push(StepOutcome { summary, decision });
            }
        }
    }
}

/// Render `"<type> (<duration>) -> target: <target> <value>"`
#[must_use]
pub fn describe_step(step: &ExecutableStep) -> String {
    let condition = step.end_condition_key().unwrap_or("?");

    let duration = match (condition, step.end_value()) {
        ("time", Some(seconds)) if seconds > 0.0 => format_seconds(seconds),
        ("distance", Some(meters)) if meters > 0.0 => format!("{meters}m"),
        _ => condition.to_owned(),
    };

    let target = step
        .target()
        .and_then(|target| target.workout_target_type_key.as_deref())
        .unwrap_or("none");
    let value = step
        .target_value()
        .map_or_else(String::new, |value| format!(" {value}"));

    format!("{} ({duration}) -> target: {target}{value}", step.kind().label())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_seconds(seconds: f64) -> String {
    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn step(value: serde_json::Value) -> ExecutableStep {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_zone_validation() {
        assert!(HrZone::new(0).is_err());
        assert!(HrZone::new(6).is_err());
        assert_eq!(HrZone::new(3).unwrap().get(), 3);
        assert_eq!(HrZone::default().get(), 2);
    }

    #[test]
    fn test_apply_zone_sets_all_target_fields() {
        let mut warmup = step(json!({
            "stepType": {"stepTypeId": 1, "stepTypeKey": "warmup"},
            "description": "Easy 5km warmup",
            "targetType": {"workoutTargetTypeId": 1, "workoutTargetTypeKey": "no.target"}
        }));

        let decision = apply_zone(&mut warmup, HrZone::new(3).unwrap());

        assert!(decision.should_add());
        let target = warmup.target().unwrap();
        assert_eq!(target.workout_target_type_id, Some(4));
        assert_eq!(
            target.workout_target_type_key.as_deref(),
            Some("heart.rate.zone")
        );
        assert_eq!(warmup.target_value(), Some(3.0));
        assert_eq!(warmup.target_value_two, Some(None));
        assert_eq!(warmup.zone(), Some(3));
    }

    #[test]
    fn test_apply_zone_leaves_targeted_step_untouched() {
        let original = step(json!({
            "stepType": {"stepTypeId": 4, "stepTypeKey": "recovery"},
            "description": "Recovery jog",
            "targetType": {"workoutTargetTypeId": 6, "workoutTargetTypeKey": "pace.zone"},
            "targetValueOne": 3.1,
            "targetValueTwo": 3.4
        }));
        let mut recovery = original.clone();

        let decision = apply_zone(&mut recovery, HrZone::default());

        assert_eq!(decision, Decision::HasTarget);
        assert_eq!(recovery, original);
    }

    #[test]
    fn test_apply_to_workout_recurses_into_repeat_groups() {
        let mut workout: Workout = serde_json::from_value(json!({
            "workoutId": 1,
            "workoutName": "Runna: Intervals",
            "workoutSegments": [{
                "workoutSteps": [
                    {"stepType": {"stepTypeKey": "warmup"}, "description": "Easy jog"},
                    {
                        "stepType": {"stepTypeKey": "repeat"},
                        "numberOfIterations": 4,
                        "workoutSteps": [
                            {"stepType": {"stepTypeKey": "interval"}, "description": "Sprint 200m"},
                            {"stepType": {"stepTypeKey": "recovery"}, "description": "Walk or jog"},
                            {"stepType": {"stepTypeKey": "rest"}}
                        ]
                    },
                    {"stepType": {"stepTypeKey": "cooldown"}, "description": "Slow jog home"}
                ]
            }]
        }))
        .unwrap();

        let changes = apply_to_workout(&mut workout, HrZone::default());

        assert!(changes.has_segments);
        assert_eq!(changes.outcomes.len(), 5);
        assert_eq!(changes.modified_count(), 3);

        let WorkoutStep::Repeat(group) =
            &workout.workout_segments.as_ref().unwrap()[0].workout_steps[1]
        else {
            panic!("expected repeat group");
        };
        let WorkoutStep::Executable(recovery) = &group.workout_steps[1] else {
            panic!("expected executable step");
        };
        assert_eq!(recovery.zone(), Some(2));
    }

    #[test]
    fn test_second_pass_modifies_nothing() {
        let mut workout: Workout = serde_json::from_value(json!({
            "workoutSegments": [{
                "workoutSteps": [
                    {"stepType": {"stepTypeKey": "warmup"}, "description": "Easy jog"},
                    {"stepType": {"stepTypeKey": "interval"}, "description": "Conversational 3km"}
                ]
            }]
        }))
        .unwrap();

        let first = apply_to_workout(&mut workout, HrZone::default());
        let after_first = workout.clone();
        let second = apply_to_workout(&mut workout, HrZone::default());

        assert_eq!(first.modified_count(), 2);
        assert_eq!(second.modified_count(), 0);
        assert_eq!(workout, after_first);
    }

    #[test]
    fn test_workout_without_segments() {
        let mut workout: Workout =
            serde_json::from_value(json!({"workoutId": 5, "workoutName": "Empty"})).unwrap();

        let changes = apply_to_workout(&mut workout, HrZone::default());

        assert!(!changes.has_segments);
        assert_eq!(changes.modified_count(), 0);
    }

    #[test]
    fn test_describe_step_formats() {
        let timed = step(json!({
            "stepType": {"stepTypeKey": "warmup"},
            "endCondition": {"conditionTypeKey": "time"},
            "endConditionValue": 630.0
        }));
        assert_eq!(describe_step(&timed), "warmup (10:30) -> target: none");

        let distance = step(json!({
            "stepType": {"stepTypeKey": "interval"},
            "endCondition": {"conditionTypeKey": "distance"},
            "endConditionValue": 400.0,
            "targetType": {"workoutTargetTypeKey": "heart.rate.zone"},
            "targetValueOne": 2.0
        }));
        assert_eq!(
            describe_step(&distance),
            "interval (400m) -> target: heart.rate.zone 2"
        );

        let lap = step(json!({
            "stepType": {"stepTypeKey": "cooldown"},
            "endCondition": {"conditionTypeKey": "lap.button"}
        }));
        assert_eq!(describe_step(&lap), "cooldown (lap.button) -> target: none");
    }

    #[test]
    fn test_describe_step_appends_value_only_when_present() {
        let integer_zone = step(json!({
            "stepType": {"stepTypeKey": "recovery"},
            "endCondition": {"conditionTypeKey": "time"},
            "endConditionValue": 90,
            "targetType": {"workoutTargetTypeKey": "heart.rate.zone"},
            "targetValueOne": 2
        }));
        assert_eq!(
            describe_step(&integer_zone),
            "recovery (1:30) -> target: heart.rate.zone 2"
        );

        let null_value = step(json!({
            "stepType": {"stepTypeKey": "warmup"},
            "targetType": {"workoutTargetTypeKey": "no.target"},
            "targetValueOne": null
        }));
        assert_eq!(describe_step(&null_value), "warmup (?) -> target: no.target");
    }
}
