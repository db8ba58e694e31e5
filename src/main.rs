//! Trunk Planner - HOS-compliant trip planning for the Trunk ELD platform
//!
//! Takes a trip's total driving duration and the driver's consumed cycle
//! hours, and emits a day-by-day duty schedule plus trip totals as JSON.

mod cli;
mod config;
mod defaults;
mod services;
mod types;

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use services::hos::{plan_trip, PlanInput};
use services::logsheet::build_daily_logs;

fn main() -> Result<()> {
    // Logs directory - use LOGS_DIR env var or default to ./logs
    let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "planner.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging - stderr (stdout carries the JSON plan) and file
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,trunk_planner=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let config = config::Config::from_env()?;
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Plan {
            driving_seconds,
            driving_hours,
            cycle_used,
            date,
            logsheets,
        } => {
            let total_driving_seconds = match (driving_seconds, driving_hours) {
                (Some(seconds), _) => seconds,
                (None, Some(hours)) if hours >= 0.0 => (hours * 3600.0).round() as u64,
                (None, Some(hours)) => bail!("--driving-hours must be non-negative, got {hours}"),
                (None, None) => bail!("one of --driving-seconds or --driving-hours is required"),
            };

            let start_date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let trip_start = NaiveDateTime::new(start_date, config.day_start);

            info!(
                total_driving_seconds,
                cycle_used_hours = cycle_used,
                %trip_start,
                "planning trip"
            );

            let input = PlanInput {
                total_driving_seconds,
                cycle_used_hours: cycle_used,
                trip_start,
            };
            let plan = plan_trip(&input)?;

            if logsheets {
                let logs = build_daily_logs(&plan);
                let output = serde_json::json!({ "plan": plan, "logsheets": logs });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            }
        }
    }

    Ok(())
}
