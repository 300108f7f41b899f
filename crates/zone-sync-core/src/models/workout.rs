// ABOUTME: Garmin Connect workout document model with lossless round-tripping
// ABOUTME: Models the fields the tool reads or writes and keeps everything else verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Document Model
//!
//! Workouts are owned by Garmin Connect. The tool fetches a document, touches
//! a handful of target fields and PUTs the whole document back, so every type
//! here carries a flattened `extra` map holding the fields it does not model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::constants::garmin::{step_types, target_types};

/// Entry returned by the workout list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    /// Workout identifier; entries without one cannot be fetched
    #[serde(default)]
    pub workout_id: Option<u64>,
    /// Workout name as shown in Garmin Connect
    #[serde(default)]
    pub workout_name: Option<String>,
    /// Sport the workout is planned for
    #[serde(default)]
    pub sport_type: Option<SportType>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkoutSummary {
    /// Workout name, or `"Unknown"` when the service omits it
    #[must_use]
    pub fn name(&self) -> &str {
        self.workout_name.as_deref().unwrap_or("Unknown")
    }

    /// Sport type key (e.g. `running`), empty when absent
    #[must_use]
    pub fn sport_key(&self) -> &str {
        self.sport_type
            .as_ref()
            .and_then(|sport| sport.sport_type_key.as_deref())
            .unwrap_or_default()
    }
}

/// Full workout document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Workout identifier, required for updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<u64>,
    /// Workout name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_name: Option<String>,
    /// Sport the workout is planned for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<SportType>,
    /// Ordered workout segments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_segments: Option<Vec<WorkoutSegment>>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Workout {
    /// Workout name, or `"Unknown"` when the service omits it
    #[must_use]
    pub fn name(&self) -> &str {
        self.workout_name.as_deref().unwrap_or("Unknown")
    }
}

/// Sport type reference (`sportType`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportType {
    /// Numeric sport id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_type_id: Option<u32>,
    /// Sport key such as `running` or `cycling`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_type_key: Option<String>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A segment of a workout (multi-sport workouts have several)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSegment {
    /// Ordered steps of the segment
    #[serde(default)]
    pub workout_steps: Vec<WorkoutStep>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A workout step: either a repeat group or an executable leaf step
///
/// Repeat groups are recognised by their nested `workoutSteps` array; any
/// other object is an executable step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkoutStep {
    /// Group of steps repeated a number of times
    Repeat(RepeatGroup),
    /// Leaf step the watch executes
    Executable(ExecutableStep),
}

/// Repeat group holding nested steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatGroup {
    /// Nested steps, possibly groups themselves
    pub workout_steps: Vec<WorkoutStep>,
    /// Number of repetitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_iterations: Option<u32>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A key that may be absent, present with `null`, or present with a value
///
/// `None` is an absent key and is never serialized; `Some(None)` is an
/// explicit `null` and is written back as `null`.
#[allow(clippy::option_option)]
pub type Nullable<T> = Option<Option<T>>;

/// Deserialize a present key into `Some`, keeping `null` as `Some(None)`
fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Leaf workout step
///
/// Fields the tool writes keep the absent/`null` distinction so an untouched
/// step serializes back to the exact document it was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableStep {
    /// Step type (warmup, interval, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_type: Option<StepType>,
    /// Free-text description written by the plan author
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,
    /// How the step ends (time, distance, lap button)
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub end_condition: Nullable<EndCondition>,
    /// End condition value (seconds or meters), kept in its original number form
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub end_condition_value: Nullable<Number>,
    /// Target type; unset or `no.target` means the step is untargeted
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub target_type: Nullable<TargetType>,
    /// Lower target bound, or the zone number for zone targets
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub target_value_one: Nullable<Number>,
    /// Upper target bound
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub target_value_two: Nullable<Number>,
    /// Zone number for zone targets
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub zone_number: Nullable<u32>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExecutableStep {
    /// Classified step type
    #[must_use]
    pub fn kind(&self) -> StepKind {
        self.step_type
            .as_ref()
            .map_or(StepKind::Unknown, StepType::kind)
    }

    /// Step description, if any
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().and_then(Option::as_deref)
    }

    /// End condition key such as `time`
    #[must_use]
    pub fn end_condition_key(&self) -> Option<&str> {
        self.end_condition
            .as_ref()
            .and_then(Option::as_ref)
            .and_then(|condition| condition.condition_type_key.as_deref())
    }

    /// End condition value as a float
    #[must_use]
    pub fn end_value(&self) -> Option<f64> {
        self.end_condition_value
            .as_ref()
            .and_then(Option::as_ref)
            .and_then(Number::as_f64)
    }

    /// Target type, if any
    #[must_use]
    pub fn target(&self) -> Option<&TargetType> {
        self.target_type.as_ref().and_then(Option::as_ref)
    }

    /// Lower target bound as a float
    #[must_use]
    pub fn target_value(&self) -> Option<f64> {
        self.target_value_one
            .as_ref()
            .and_then(Option::as_ref)
            .and_then(Number::as_f64)
    }

    /// Zone number, if any
    #[must_use]
    pub const fn zone(&self) -> Option<u32> {
        match self.zone_number {
            Some(Some(zone)) => Some(zone),
            _ => None,
        }
    }

    /// Whether the step already carries a real target
    #[must_use]
    pub fn has_target(&self) -> bool {
        self.target().is_some_and(TargetType::is_set)
    }

    /// Replace the target with a heart rate zone
    pub fn set_heart_rate_zone(&mut self, zone: u8) {
        self.target_type = Some(Some(TargetType::heart_rate_zone()));
        self.target_value_one = Some(Some(Number::from(zone)));
        self.target_value_two = Some(None);
        self.zone_number = Some(Some(u32::from(zone)));
    }
}

/// Step type reference (`stepType`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepType {
    /// Numeric step type id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_type_id: Option<u32>,
    /// Step type key such as `warmup`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_type_key: Option<String>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StepType {
    /// Classify this reference; the key wins over the id when both are present
    #[must_use]
    pub fn kind(&self) -> StepKind {
        self.step_type_key
            .as_deref()
            .and_then(StepKind::from_key)
            .or_else(|| self.step_type_id.and_then(StepKind::from_id))
            .unwrap_or(StepKind::Unknown)
    }
}

/// Garmin step categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Warmup
    Warmup,
    /// Cooldown
    Cooldown,
    /// Work interval
    Interval,
    /// Recovery between intervals
    Recovery,
    /// Standing rest
    Rest,
    /// Repeat group
    Repeat,
    /// Uncategorised
    Other,
    /// Missing or unrecognised step type
    Unknown,
}

impl StepKind {
    /// Parse a `stepTypeKey`
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "warmup" => Some(Self::Warmup),
            "cooldown" => Some(Self::Cooldown),
            "interval" => Some(Self::Interval),
            "recovery" => Some(Self::Recovery),
            "rest" => Some(Self::Rest),
            "repeat" => Some(Self::Repeat),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Parse a `stepTypeId`
    #[must_use]
    pub const fn from_id(id: u32) -> Option<Self> {
        match id {
            step_types::WARMUP_ID => Some(Self::Warmup),
            step_types::COOLDOWN_ID => Some(Self::Cooldown),
            step_types::INTERVAL_ID => Some(Self::Interval),
            step_types::RECOVERY_ID => Some(Self::Recovery),
            step_types::REST_ID => Some(Self::Rest),
            step_types::REPEAT_ID => Some(Self::Repeat),
            step_types::OTHER_ID => Some(Self::Other),
            _ => None,
        }
    }

    /// Lowercase label used in step descriptions
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warmup => "warmup",
            Self::Cooldown => "cooldown",
            Self::Interval => "interval",
            Self::Recovery => "recovery",
            Self::Rest => "rest",
            Self::Repeat => "repeat",
            Self::Other => "other",
            Self::Unknown => "?",
        }
    }
}

/// Step target type (`targetType`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetType {
    /// Numeric target type id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_target_type_id: Option<u32>,
    /// Target type key such as `pace.zone`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_target_type_key: Option<String>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TargetType {
    /// Heart rate zone target reference
    #[must_use]
    pub fn heart_rate_zone() -> Self {
        Self {
            workout_target_type_id: Some(target_types::HEART_RATE_ZONE_ID),
            workout_target_type_key: Some(target_types::HEART_RATE_ZONE_KEY.to_owned()),
            extra: Map::new(),
        }
    }

    /// A missing id or `no.target` counts as unset
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.workout_target_type_id
            .is_some_and(|id| id != target_types::NO_TARGET_ID)
    }
}

/// Step end condition (`endCondition`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndCondition {
    /// Condition key such as `time`, `distance` or `lap.button`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_type_key: Option<String>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
