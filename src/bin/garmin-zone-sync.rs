// ABOUTME: Command-line entry point that adds HR zone targets to Garmin Connect workouts
// ABOUTME: Parses flags, configures logging, logs in and runs sync, list or dump
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Preview which steps of "easy" running workouts would get a Zone 2 target
//! garmin-zone-sync --filter easy --dry-run --verbose
//!
//! # Apply Zone 1 to every running workout
//! garmin-zone-sync --zone 1
//!
//! # List workouts, or dump one as JSON
//! garmin-zone-sync --list
//! garmin-zone-sync --dump-workout 123456789
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use garmin_zone_sync::config::GarminConfig;
use garmin_zone_sync::constants::{
    DEFAULT_HR_ZONE, DEFAULT_SPORT, DEFAULT_WORKOUT_LIMIT, MAX_HR_ZONE, MIN_HR_ZONE,
};
use garmin_zone_sync::errors::AppResult;
use garmin_zone_sync::garmin::ConnectClient;
use garmin_zone_sync::logging::LoggingConfig;
use garmin_zone_sync::mutator::HrZone;
use garmin_zone_sync::sync::{self, SyncOptions};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "garmin-zone-sync",
    version,
    about = "Add heart rate zone targets to easy steps of Garmin Connect workouts",
    long_about = "Scans your Garmin Connect workouts and adds a heart rate zone target to warmup, \
                  cooldown, recovery and easy-described steps that have no target yet."
)]
struct Cli {
    /// Only process workouts whose name contains this text (case-insensitive)
    #[arg(long, short = 'f')]
    filter: Option<String>,

    /// Show what would change without updating Garmin Connect
    #[arg(long, short = 'd')]
    dry_run: bool,

    /// Print every step decision and enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Heart rate zone to apply
    #[arg(
        long,
        short = 'z',
        default_value_t = DEFAULT_HR_ZONE,
        value_parser = clap::value_parser!(u8).range(i64::from(MIN_HR_ZONE)..=i64::from(MAX_HR_ZONE))
    )]
    zone: u8,

    /// Maximum number of workouts to fetch
    #[arg(long, short = 'l', default_value_t = DEFAULT_WORKOUT_LIMIT)]
    limit: u32,

    /// List workouts and exit
    #[arg(long)]
    list: bool,

    /// Print one workout's full JSON and exit
    #[arg(long, value_name = "ID", conflicts_with = "list")]
    dump_workout: Option<u64>,

    /// Sport type key of workouts to process
    #[arg(long, default_value = DEFAULT_SPORT)]
    sport: String,

    /// Garmin Connect email (overrides `GARMIN_EMAIL`)
    #[arg(long, short = 'e')]
    email: Option<String>,

    /// Garmin Connect password (overrides `GARMIN_PASSWORD`)
    #[arg(long, short = 'p')]
    password: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::from_env(cli.verbose).init() {
        eprintln!("Warning: {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let zone = HrZone::new(cli.zone)?;
    let config = GarminConfig::from_env()?;
    let auth = config.auth_method(cli.email, cli.password)?;

    eprintln!("Logging in to Garmin Connect...");
    let client = ConnectClient::connect(&config, auth).await?;
    match client.display_name().await {
        Ok(Some(name)) => eprintln!("Logged in as: {name}"),
        Ok(None) => eprintln!("Logged in"),
        Err(e) => {
            warn!(error = %e, "Could not fetch profile");
            eprintln!("Logged in");
        }
    }

    let mut stdout = io::stdout();

    if cli.list {
        let count = sync::list_workouts(&client, cli.limit, &mut stdout).await?;
        info!(count, "Listed workouts");
        return Ok(());
    }

    if let Some(workout_id) = cli.dump_workout {
        return sync::dump_workout(&client, workout_id, &mut stdout).await;
    }

    if cli.dry_run {
        println!("\n=== DRY RUN MODE - No changes will be made ===");
    }

    let options = SyncOptions {
        filter: cli.filter,
        sport: cli.sport,
        zone,
        limit: cli.limit,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };
    sync::sync_workouts(&client, &options, &mut stdout).await?;

    println!("\nDone!");
    Ok(())
}
