//! CLI argument parsing for the trunk-planner binary.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trunk-planner", about = "Trunk HOS trip planning engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Plan an HOS-compliant trip schedule and print it as JSON
    Plan {
        /// Total driving duration in seconds (routing service output)
        #[arg(long, conflicts_with = "driving_hours")]
        driving_seconds: Option<u64>,
        /// Total driving duration in hours
        #[arg(long)]
        driving_hours: Option<f64>,
        /// Cycle hours already used in the current 70-hour/8-day window
        #[arg(long, default_value_t = 0.0)]
        cycle_used: f64,
        /// Trip start date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Include per-day duty-log data in the output
        #[arg(long)]
        logsheets: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_plan_with_seconds_parses() {
        let cli = Cli::parse_from([
            "trunk-planner",
            "plan",
            "--driving-seconds",
            "34200",
            "--cycle-used",
            "12.5",
        ]);
        let Command::Plan {
            driving_seconds,
            driving_hours,
            cycle_used,
            ..
        } = cli.command;
        assert_eq!(driving_seconds, Some(34_200));
        assert_eq!(driving_hours, None);
        assert_eq!(cycle_used, 12.5);
    }

    #[test]
    fn test_cli_plan_with_hours_parses() {
        let cli = Cli::parse_from(["trunk-planner", "plan", "--driving-hours", "9.5"]);
        let Command::Plan {
            driving_hours,
            cycle_used,
            logsheets,
            ..
        } = cli.command;
        assert_eq!(driving_hours, Some(9.5));
        assert_eq!(cycle_used, 0.0);
        assert!(!logsheets);
    }

    #[test]
    fn test_cli_rejects_both_duration_args() {
        let result = Cli::try_parse_from([
            "trunk-planner",
            "plan",
            "--driving-seconds",
            "3600",
            "--driving-hours",
            "1.0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_plan_date_and_logsheets_parse() {
        let cli = Cli::parse_from([
            "trunk-planner",
            "plan",
            "--driving-hours",
            "4",
            "--date",
            "2026-03-02",
            "--logsheets",
        ]);
        let Command::Plan { date, logsheets, .. } = cli.command;
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 2));
        assert!(logsheets);
    }
}
