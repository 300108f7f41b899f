// ABOUTME: Sync driver that adds heart rate zone targets to matching Garmin workouts
// ABOUTME: Also implements the workout listing and single-workout JSON dump operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Sync
//!
//! User-facing progress goes to the supplied writer (stdout in the binary);
//! diagnostics go through `tracing`.

use std::io::Write;

use tracing::{debug, info, warn};
use zone_sync_core::constants::{DEFAULT_SPORT, DEFAULT_WORKOUT_LIMIT, LIST_NAME_WIDTH};
use zone_sync_core::errors::AppResult;
use zone_sync_core::models::WorkoutSummary;

use crate::garmin::WorkoutApi;
use crate::mutator::{apply_to_workout, HrZone};

/// Options for one sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Case-insensitive workout name substring
    pub filter: Option<String>,
    /// Sport type key workouts must have
    pub sport: String,
    /// Zone to apply
    pub zone: HrZone,
    /// Maximum number of workouts to fetch
    pub limit: u32,
    /// Report changes without submitting them
    pub dry_run: bool,
    /// Print every step decision
    pub verbose: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            filter: None,
            sport: DEFAULT_SPORT.to_owned(),
            zone: HrZone::default(),
            limit: DEFAULT_WORKOUT_LIMIT,
            dry_run: false,
            verbose: false,
        }
    }
}

impl SyncOptions {
    /// Whether a listed workout passes the sport and name filters
    #[must_use]
    pub fn matches(&self, summary: &WorkoutSummary) -> bool {
        if !summary.sport_key().eq_ignore_ascii_case(&self.sport) {
            return false;
        }
        self.filter.as_deref().is_none_or(|filter| {
            summary
                .name()
                .to_lowercase()
                .contains(&filter.to_lowercase())
        })
    }
}

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Workouts returned by the list endpoint
    pub scanned: usize,
    /// Workouts passing the sport and name filters
    pub matched: usize,
    /// Workouts with at least one modified step
    pub changed: usize,
    /// Workouts submitted back to Garmin Connect
    pub updated: usize,
    /// Steps given a zone target across all workouts
    pub steps_modified: usize,
}

/// Add zone targets to every matching workout
///
/// Stops at the first error; workouts already submitted stay updated.
///
/// # Errors
///
/// Returns an error if any API call fails or output cannot be written
pub async fn sync_workouts<W: Write>(
    api: &dyn WorkoutApi,
    options: &SyncOptions,
    out: &mut W,
) -> AppResult<SyncSummary> {
    let zone = options.zone.get();
    let workouts = api.list_workouts(options.limit).await?;

    let mut summary = SyncSummary {
        scanned: workouts.len(),
        ..SyncSummary::default()
    };
    info!(count = workouts.len(), sport = %options.sport, "Scanning workouts");

    for listed in workouts.iter().filter(|listed| options.matches(listed)) {
        summary.matched += 1;
        let Some(workout_id) = listed.workout_id else {
            warn!(name = listed.name(), "Listed workout has no id, skipping");
            writeln!(out, "\nSkipping: {} (no workout ID)", listed.name())?;
            continue;
        };
        writeln!(out, "\nProcessing: {} (ID: {workout_id})", listed.name())?;

        let mut workout = api.get_workout(workout_id).await?;
        let changes = apply_to_workout(&mut workout, options.zone);

        if !changes.has_segments {
            writeln!(out, "  No workout segments found")?;
            continue;
        }

        if options.verbose {
            for outcome in &changes.outcomes {
                if outcome.modified() {
                    writeln!(out, "  + {} -> Adding Zone {zone}", outcome.summary)?;
                } else {
                    writeln!(out, "  - {} -> Skip ({})", outcome.summary, outcome.decision)?;
                }
            }
        }

        let modified = changes.modified_count();
        if modified == 0 {
            writeln!(out, "  No changes needed")?;
            continue;
        }

        summary.changed += 1;
        summary.steps_modified += modified;
        writeln!(out, "  Modified {modified} steps with Zone {zone} HR target")?;

        if options.dry_run {
            writeln!(out, "  DRY RUN - would update workout")?;
            debug!(workout_id, "Skipping update in dry run");
            continue;
        }

        api.update_workout(&workout).await?;
        summary.updated += 1;
        writeln!(out, "  Updated successfully")?;
    }

    if summary.matched == 0 {
        warn!(sport = %options.sport, filter = ?options.filter, "No workouts matched");
    }

    writeln!(
        out,
        "\nScanned {} workouts, {} matched, {} changed, {} updated ({} steps)",
        summary.scanned, summary.matched, summary.changed, summary.updated, summary.steps_modified
    )?;
    Ok(summary)
}

/// Print an `ID / Sport / Name` table of the user's workouts
///
/// Names are cut to [`LIST_NAME_WIDTH`] characters; a missing id prints as `?`.
///
/// # Errors
///
/// Returns an error if the list request fails or output cannot be written
pub async fn list_workouts<W: Write>(
    api: &dyn WorkoutApi,
    limit: u32,
    out: &mut W,
) -> AppResult<usize> {
    let workouts = api.list_workouts(limit).await?;

    writeln!(out, "\n{:<12} {:<20} Name", "ID", "Sport")?;
    writeln!(out, "{}", "-".repeat(60))?;
    for workout in &workouts {
        let id = workout
            .workout_id
            .map_or_else(|| "?".to_owned(), |id| id.to_string());
        let name: String = workout.name().chars().take(LIST_NAME_WIDTH).collect();
        writeln!(out, "{id:<12} {:<20} {name}", workout.sport_key())?;
    }
    Ok(workouts.len())
}

/// Print one workout as pretty JSON, exactly as the service returned it
///
/// # Errors
///
/// Returns an error if the request fails or output cannot be written
pub async fn dump_workout<W: Write>(
    api: &dyn WorkoutApi,
    workout_id: u64,
    out: &mut W,
) -> AppResult<()> {
    let raw = api.get_workout_raw(workout_id).await?;
    writeln!(out, "{}", serde_json::to_string_pretty(&raw)?)?;
    Ok(())
}
