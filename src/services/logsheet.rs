//! Daily duty-log derivation.
//!
//! Folds a finished HOS plan into per-day duty-status segment sequences for
//! the downstream log-sheet renderer: off-duty lead-in, the pickup hour on
//! day one, driving split by the 30-minute break at the 8-hour mark, dropoff
//! after the final driving block, off-duty to midnight. Positions are minutes
//! from midnight on the 24-hour grid.

use chrono::Timelike;
use tracing::debug;

use crate::defaults::AVERAGE_SPEED_MPH;
use crate::services::hos::{BREAK_DURATION_MINUTES, BREAK_TRIGGER_MINUTES, PICKUP_MINUTES};
use crate::types::{DailyLog, DayRecord, DutySegment, DutyStatus, HosPlan, PlanEntry, DAY_END_MINUTE};

/// Minutes from midnight for a wall-clock time.
fn minute_of_day(time: chrono::NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

/// Whole minutes from a display-rounded hours value.
fn hours_to_minutes(hours: f64) -> u32 {
    (hours * 60.0).round().max(0.0) as u32
}

/// Display hours from grid minutes, rounded to one decimal.
fn grid_hours(minutes: u32) -> f64 {
    round1(f64::from(minutes) / 60.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Appends segments left to right, merging adjacent runs of the same status
/// and clamping at the end of the grid.
struct SegmentCursor {
    segments: Vec<DutySegment>,
    minute: u32,
}

impl SegmentCursor {
    fn new() -> Self {
        Self {
            segments: Vec::new(),
            minute: 0,
        }
    }

    fn push(&mut self, status: DutyStatus, minutes: u32) {
        if minutes == 0 || self.minute >= DAY_END_MINUTE {
            return;
        }
        let end = self.minute.saturating_add(minutes).min(DAY_END_MINUTE);
        match self.segments.last_mut() {
            Some(last) if last.status == status && last.end_minute == self.minute => {
                last.end_minute = end;
            }
            _ => self.segments.push(DutySegment {
                status,
                start_minute: self.minute,
                end_minute: end,
            }),
        }
        self.minute = end;
    }

    fn fill_to_end(&mut self, status: DutyStatus) {
        if self.minute < DAY_END_MINUTE {
            self.push(status, DAY_END_MINUTE - self.minute);
        }
    }
}

fn status_total_minutes(segments: &[DutySegment], status: DutyStatus) -> u32 {
    segments
        .iter()
        .filter(|s| s.status == status)
        .map(DutySegment::duration_minutes)
        .sum()
}

/// Derive daily duty-log data for every planned day.
///
/// Restart markers produce no log sheet; driving simply resumes on the next
/// day record.
pub fn build_daily_logs(plan: &HosPlan) -> Vec<DailyLog> {
    let logs: Vec<DailyLog> = plan
        .daily_plan
        .iter()
        .filter_map(PlanEntry::as_day)
        .map(build_day_log)
        .collect();
    debug!(count = logs.len(), "daily logs built");
    logs
}

fn build_day_log(day: &DayRecord) -> DailyLog {
    let driving_minutes = hours_to_minutes(day.driving_hours);
    let on_duty_minutes = hours_to_minutes(day.on_duty_hours);
    let break_minutes = if day.includes_break {
        BREAK_DURATION_MINUTES as u32
    } else {
        0
    };

    // Non-driving overhead is the pickup/dropoff hours. Pickup opens the
    // first day; everything else lands after the driving block.
    let overhead_minutes = on_duty_minutes.saturating_sub(driving_minutes + break_minutes);
    let pickup_minutes = if day.day == 1 {
        overhead_minutes.min(PICKUP_MINUTES as u32)
    } else {
        0
    };
    let tail_minutes = overhead_minutes - pickup_minutes;

    let mut cursor = SegmentCursor::new();
    cursor.push(DutyStatus::OffDuty, minute_of_day(day.start_time));
    cursor.push(DutyStatus::OnDuty, pickup_minutes);
    let trigger = BREAK_TRIGGER_MINUTES as u32;
    if day.includes_break && driving_minutes > trigger {
        cursor.push(DutyStatus::Driving, trigger);
        cursor.push(DutyStatus::OnDuty, break_minutes);
        cursor.push(DutyStatus::Driving, driving_minutes - trigger);
    } else {
        cursor.push(DutyStatus::Driving, driving_minutes);
    }
    cursor.push(DutyStatus::OnDuty, tail_minutes);
    cursor.fill_to_end(DutyStatus::OffDuty);

    let driving_total = status_total_minutes(&cursor.segments, DutyStatus::Driving);
    let on_duty_total = status_total_minutes(&cursor.segments, DutyStatus::OnDuty);
    let off_duty_total = status_total_minutes(&cursor.segments, DutyStatus::OffDuty);

    let mut remarks = vec![
        format!(
            "Start: {} | End: {}",
            day.start_time.format("%H:%M"),
            day.off_duty_start.format("%H:%M")
        ),
        format!(
            "Total Driving: {:.1}h | On Duty: {:.1}h",
            day.driving_hours, day.on_duty_hours
        ),
    ];
    if day.fuel_stop {
        remarks.push("Fuel stop taken (30 min)".to_string());
    }

    DailyLog {
        day: day.day,
        date: day.date,
        segments: cursor.segments,
        driving_hours: grid_hours(driving_total),
        on_duty_not_driving_hours: grid_hours(on_duty_total),
        off_duty_hours: grid_hours(off_duty_total),
        estimated_miles: round1(f64::from(driving_total) / 60.0 * AVERAGE_SPEED_MPH),
        remarks,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
