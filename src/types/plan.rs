//! Trip plan types
//!
//! The planner emits an ordered sequence of day records and restart markers
//! plus trip-level totals. Times serialize as 24-hour `HH:MM` strings and the
//! next-day start carries a `(+1 day)` annotation, which is what the results
//! page and the log-sheet renderer consume.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One planned calendar day of the trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Day number within the trip (1-based; restart markers are unnumbered).
    pub day: u32,
    /// Calendar date of the day.
    pub date: NaiveDate,
    /// Wall-clock start of the on-duty window.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Driving hours allocated to this day, rounded to one decimal.
    pub driving_hours: f64,
    /// Total on-duty hours: driving plus break and pickup/dropoff overhead.
    pub on_duty_hours: f64,
    /// Human-readable event list, e.g. `"Drive 9.0h"`.
    pub events: Vec<String>,
    /// A 30-minute fuel stop falls on this day.
    pub fuel_stop: bool,
    /// A 30-minute rest break was inserted (driving exceeded 8 hours).
    pub includes_break: bool,
    /// End of the 14-hour on-duty window.
    #[serde(with = "hhmm")]
    pub off_duty_start: NaiveTime,
    /// Start of the next day after the 10-hour rest, on the following
    /// calendar day.
    #[serde(with = "hhmm_next_day")]
    pub next_day_start: NaiveTime,
}

/// A mandatory 34-hour off-duty restart injected between day records.
///
/// Carries no driving or on-duty hours and does not count toward the days
/// needed for the trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartMarker {
    /// Why the restart was required.
    pub note: String,
    /// Date driving resumes.
    pub resume_date: NaiveDate,
    /// Wall-clock time driving resumes.
    #[serde(with = "hhmm")]
    pub resume_time: NaiveTime,
}

/// An entry in the daily plan: a planned day or a 34-hour restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlanEntry {
    Day(DayRecord),
    Restart(RestartMarker),
}

impl PlanEntry {
    /// The day record, if this entry is a planned day.
    pub fn as_day(&self) -> Option<&DayRecord> {
        match self {
            PlanEntry::Day(day) => Some(day),
            PlanEntry::Restart(_) => None,
        }
    }

    pub fn is_restart(&self) -> bool {
        matches!(self, PlanEntry::Restart(_))
    }
}

/// Trip-level summary plus the ordered daily plan. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HosPlan {
    /// Calendar days of work needed (restart markers excluded).
    pub total_days_needed: u32,
    /// On-duty hours added across the trip.
    pub total_on_duty_hours: f64,
    /// Cycle budget left after the trip, floored at zero.
    pub remaining_cycle_after_trip: f64,
    /// At least one 34-hour restart was required.
    pub requires_restart: bool,
    /// Ordered day records and restart markers.
    pub daily_plan: Vec<PlanEntry>,
}

/// Serde adapter: `NaiveTime` as a 24-hour `HH:MM` string.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter: `NaiveTime` as `HH:MM (+1 day)`. The next-day start always
/// falls on the following calendar day (14-hour window plus 10-hour rest).
mod hhmm_next_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const SUFFIX: &str = " (+1 day)";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&format_args!("{}{}", time.format(super::hhmm::FORMAT), SUFFIX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.strip_suffix(SUFFIX).unwrap_or(&raw);
        NaiveTime::parse_from_str(trimmed, super::hhmm::FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_day() -> DayRecord {
        DayRecord {
            day: 1,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            start_time: hm(5, 0),
            driving_hours: 9.0,
            on_duty_hours: 11.5,
            events: vec!["Drive 9.0h".to_string()],
            fuel_stop: false,
            includes_break: true,
            off_duty_start: hm(19, 0),
            next_day_start: hm(5, 0),
        }
    }

    #[test]
    fn test_day_record_serializes_display_contract() {
        let json = serde_json::to_string(&sample_day()).unwrap();
        assert!(json.contains("\"startTime\":\"05:00\""));
        assert!(json.contains("\"offDutyStart\":\"19:00\""));
        assert!(json.contains("\"nextDayStart\":\"05:00 (+1 day)\""));
        assert!(json.contains("\"drivingHours\":9.0"));
        assert!(json.contains("\"onDutyHours\":11.5"));
        assert!(json.contains("\"includesBreak\":true"));
        assert!(json.contains("\"date\":\"2026-03-02\""));
    }

    #[test]
    fn test_plan_entries_are_tagged() {
        let day = serde_json::to_string(&PlanEntry::Day(sample_day())).unwrap();
        assert!(day.contains("\"type\":\"day\""));

        let restart = PlanEntry::Restart(RestartMarker {
            note: "Required to regain 70-hour cycle".to_string(),
            resume_date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            resume_time: hm(15, 0),
        });
        let json = serde_json::to_string(&restart).unwrap();
        assert!(json.contains("\"type\":\"restart\""));
        assert!(json.contains("\"resumeTime\":\"15:00\""));
    }

    #[test]
    fn test_day_record_round_trips_through_json() {
        let json = serde_json::to_string(&sample_day()).unwrap();
        let back: DayRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.day, 1);
        assert_eq!(back.start_time, hm(5, 0));
        assert_eq!(back.next_day_start, hm(5, 0));
        assert_eq!(back.driving_hours, 9.0);
        assert!(back.includes_break);
    }

    #[test]
    fn test_plan_entry_accessors() {
        let entry = PlanEntry::Day(sample_day());
        assert!(entry.as_day().is_some());
        assert!(!entry.is_restart());

        let restart = PlanEntry::Restart(RestartMarker {
            note: String::new(),
            resume_date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            resume_time: hm(15, 0),
        });
        assert!(restart.as_day().is_none());
        assert!(restart.is_restart());
    }
}
