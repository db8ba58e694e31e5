//! Configuration management

use anyhow::{Context, Result};
use chrono::NaiveTime;

use crate::defaults;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Wall-clock time a planned day starts (`HOS_DAY_START`, HH:MM)
    pub day_start: NaiveTime,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let day_start = match std::env::var("HOS_DAY_START") {
            Ok(raw) => parse_day_start(&raw)
                .with_context(|| format!("invalid HOS_DAY_START '{raw}', expected HH:MM"))?,
            Err(_) => defaults::default_day_start(),
        };

        Ok(Self { day_start })
    }
}

/// Parse a `HH:MM` wall-clock time.
fn parse_day_start(raw: &str) -> Result<NaiveTime> {
    Ok(NaiveTime::parse_from_str(raw.trim(), "%H:%M")?)
}
