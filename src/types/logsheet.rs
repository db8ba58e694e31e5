//! Daily duty-log types
//!
//! Structured form of the driver's daily log: contiguous duty-status segments
//! over the 24-hour grid plus the totals box and remarks. Rendering the grid
//! into a printable document happens downstream; this crate only derives the
//! data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minutes in a full 24-hour log grid.
pub const DAY_END_MINUTE: u32 = 24 * 60;

/// The four standard duty-status lines on a daily log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    OffDuty,
    /// Present on the standard grid; this planner never emits it.
    SleeperBerth,
    Driving,
    /// On duty, not driving (pickup, dropoff, rest break).
    OnDuty,
}

impl DutyStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "off_duty",
            DutyStatus::SleeperBerth => "sleeper_berth",
            DutyStatus::Driving => "driving",
            DutyStatus::OnDuty => "on_duty",
        }
    }
}

/// One contiguous run on a duty-status line.
///
/// Positions are minutes from midnight on the log grid; `end_minute` is
/// exclusive and capped at 1440.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutySegment {
    pub status: DutyStatus,
    pub start_minute: u32,
    pub end_minute: u32,
}

impl DutySegment {
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }
}

/// Derived daily log data for one planned day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    /// Day number matching the plan's day record.
    pub day: u32,
    pub date: NaiveDate,
    /// Contiguous duty-status segments covering the full grid.
    pub segments: Vec<DutySegment>,
    /// Hours on the driving line.
    pub driving_hours: f64,
    /// Hours on the on-duty (not driving) line.
    pub on_duty_not_driving_hours: f64,
    /// Hours on the off-duty line.
    pub off_duty_hours: f64,
    /// Estimated miles covered, from driving time at the average highway
    /// speed.
    pub estimated_miles: f64,
    /// Remarks block lines (start/end times, fuel stop).
    pub remarks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_status_as_str() {
        assert_eq!(DutyStatus::OffDuty.as_str(), "off_duty");
        assert_eq!(DutyStatus::SleeperBerth.as_str(), "sleeper_berth");
        assert_eq!(DutyStatus::Driving.as_str(), "driving");
        assert_eq!(DutyStatus::OnDuty.as_str(), "on_duty");
    }

    #[test]
    fn test_duty_status_serializes_snake_case() {
        let json = serde_json::to_string(&DutyStatus::SleeperBerth).unwrap();
        assert_eq!(json, "\"sleeper_berth\"");
    }

    #[test]
    fn test_segment_duration() {
        let segment = DutySegment {
            status: DutyStatus::Driving,
            start_minute: 360,
            end_minute: 840,
        };
        assert_eq!(segment.duration_minutes(), 480);
    }
}
