//! Hours-of-Service compliance planning.
//!
//! Given a trip's total driving duration and the cycle hours the driver has
//! already used, this module walks the trip day by day and allocates driving
//! time, rest breaks, pickup/dropoff overhead, fuel stops and 34-hour
//! restarts until the whole trip is scheduled, then folds the day records
//! into trip-level totals.
//!
//! The walk is a pure function of its input: every running total lives in an
//! explicit state record threaded through the loop, so independent trips can
//! be planned concurrently with no shared state. Time is tracked in integer
//! **minutes** and converted to fractional hours only when a day record is
//! emitted, matching `DayRecord`'s one-decimal display fields.

use chrono::{Duration, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, info};

use crate::defaults::AVERAGE_SPEED_MPH;
use crate::types::{DayRecord, HosPlan, PlanEntry, RestartMarker};

/// Rolling on-duty budget: 70 hours in any 8 days.
const CYCLE_BUDGET_MINUTES: i64 = 70 * 60;
/// Daily driving cap.
const MAX_DAILY_DRIVING_MINUTES: i64 = 11 * 60;
/// Length of the daily on-duty window.
const ON_DUTY_WINDOW_MINUTES: i64 = 14 * 60;
/// Mandatory off-duty rest between working days.
const DAILY_REST_MINUTES: i64 = 10 * 60;
/// Continuous driving allowed before the 30-minute break.
pub(crate) const BREAK_TRIGGER_MINUTES: i64 = 8 * 60;
/// The rest break itself.
pub(crate) const BREAK_DURATION_MINUTES: i64 = 30;
/// Off-duty period that restores the 70-hour cycle.
const RESTART_DURATION_MINUTES: i64 = 34 * 60;
/// On-duty overhead for pickup on the first day.
pub(crate) const PICKUP_MINUTES: i64 = 60;
/// On-duty overhead for dropoff on the last day.
const DROPOFF_MINUTES: i64 = 60;
/// A day whose remaining driving fits within this slack of today's
/// allocation is the last day.
const LAST_DAY_SLACK_MINUTES: i64 = 30;
/// Residual driving at or below this is rounding dust, not another day.
const DRIVING_EPSILON_MINUTES: i64 = 6;
/// A one-time fuel stop is inserted once the projected distance crosses this.
const FUEL_STOP_THRESHOLD_MILES: f64 = 950.0;

/// Input to the planning engine.
///
/// `trip_start` is supplied by the caller so the engine stays deterministic;
/// the CLI builds it from the requested date and the configured day start.
#[derive(Debug, Clone)]
pub struct PlanInput {
    /// Total driving duration in seconds, as resolved by the routing service.
    pub total_driving_seconds: u64,
    /// Cycle hours already used at trip start (one decimal expected).
    pub cycle_used_hours: f64,
    /// Wall-clock start of the first planned day.
    pub trip_start: NaiveDateTime,
}

/// Planning failure modes.
///
/// Input rejection happens before any day is simulated; a rejected input
/// never yields a partial plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Caller contract violation: cycle hours must be finite and in [0, 70].
    #[error("cycle hours used must be between 0 and 70, got {0}")]
    CycleHoursOutOfRange(f64),
    /// Internal fault: the daily loop failed to consume the driving budget
    /// within the defensive iteration ceiling.
    #[error("plan failed to converge after {days} simulated days")]
    IterationCeiling { days: usize },
}

/// Running totals threaded through the daily loop.
#[derive(Debug)]
struct CycleState {
    /// Minutes consumed against the 70-hour window; resets only on restart.
    cycle_used_minutes: i64,
    /// Driving minutes not yet scheduled.
    driving_left_minutes: i64,
    /// Driving minutes scheduled so far; feeds the fuel-stop projection.
    cumulative_driving_minutes: i64,
    /// Wall clock stamping each day's start.
    clock: NaiveDateTime,
    /// At most one fuel stop per trip.
    fuel_stop_taken: bool,
}

impl CycleState {
    fn remaining_cycle_minutes(&self) -> i64 {
        CYCLE_BUDGET_MINUTES - self.cycle_used_minutes
    }
}

/// Whole minutes from fractional hours, rounded to the nearest minute.
fn hours_to_minutes(hours: f64) -> i64 {
    (hours * 60.0).round() as i64
}

/// Display hours from minutes, rounded to one decimal.
fn display_hours(minutes: i64) -> f64 {
    round1(minutes as f64 / 60.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Miles the truck is expected to have covered after this much driving.
fn projected_miles(driving_minutes: i64) -> f64 {
    driving_minutes as f64 / 60.0 * AVERAGE_SPEED_MPH
}

/// Plan an HOS-compliant trip.
///
/// Walks simulated days until the driving budget is consumed, then builds
/// the trip summary. The returned plan interleaves day records with restart
/// markers in schedule order.
pub fn plan_trip(input: &PlanInput) -> Result<HosPlan, PlanError> {
    if !input.cycle_used_hours.is_finite() || !(0.0..=70.0).contains(&input.cycle_used_hours) {
        return Err(PlanError::CycleHoursOutOfRange(input.cycle_used_hours));
    }

    let starting_cycle_minutes = hours_to_minutes(input.cycle_used_hours);
    let total_driving_minutes = (input.total_driving_seconds as f64 / 60.0).round() as i64;

    // Hard bound on simulated days: any input that can progress consumes at
    // least the epsilon of driving per day. A fully consumed cycle (restarts
    // restore nothing, every day allocates zero driving) trips this instead
    // of looping forever.
    let iteration_ceiling = (total_driving_minutes / DRIVING_EPSILON_MINUTES).max(1) as usize + 64;

    let mut state = CycleState {
        cycle_used_minutes: starting_cycle_minutes,
        driving_left_minutes: total_driving_minutes,
        cumulative_driving_minutes: 0,
        clock: input.trip_start,
        fuel_stop_taken: false,
    };

    let mut daily_plan: Vec<PlanEntry> = Vec::new();
    let mut day: u32 = 1;
    let mut days_simulated: usize = 0;

    while state.driving_left_minutes > DRIVING_EPSILON_MINUTES {
        if days_simulated == iteration_ceiling {
            return Err(PlanError::IterationCeiling {
                days: days_simulated,
            });
        }
        days_simulated += 1;

        // Daily allocation: how much driving and on-duty time this day
        // absorbs. Driving is capped by the 11-hour rule and the remaining
        // cycle budget at the start of the day.
        let driving_today = state
            .remaining_cycle_minutes()
            .min(MAX_DAILY_DRIVING_MINUTES)
            .max(0)
            .min(state.driving_left_minutes);

        let includes_break = driving_today > BREAK_TRIGGER_MINUTES;
        let mut on_duty_today = driving_today;
        if includes_break {
            on_duty_today += BREAK_DURATION_MINUTES;
        }
        if day == 1 {
            on_duty_today += PICKUP_MINUTES;
        }
        let last_day = state.driving_left_minutes <= driving_today + LAST_DAY_SLACK_MINUTES;
        if last_day {
            on_duty_today += DROPOFF_MINUTES;
        }

        // Fuel-stop tracker: first crossing of the distance threshold, at
        // most once per trip.
        state.cumulative_driving_minutes += driving_today;
        let mut events = Vec::new();
        let fuel_stop = !state.fuel_stop_taken
            && projected_miles(state.cumulative_driving_minutes) >= FUEL_STOP_THRESHOLD_MILES;
        if fuel_stop {
            state.fuel_stop_taken = true;
            events.push("30-min fuel stop".to_string());
        }
        events.push(format!("Drive {:.1}h", display_hours(driving_today)));

        let off_duty_start = state.clock + Duration::minutes(ON_DUTY_WINDOW_MINUTES);
        let next_day_start = off_duty_start + Duration::minutes(DAILY_REST_MINUTES);

        daily_plan.push(PlanEntry::Day(DayRecord {
            day,
            date: state.clock.date(),
            start_time: state.clock.time(),
            driving_hours: display_hours(driving_today),
            on_duty_hours: display_hours(on_duty_today),
            events,
            fuel_stop,
            includes_break,
            off_duty_start: off_duty_start.time(),
            next_day_start: next_day_start.time(),
        }));

        // Cycle state tracker: consume budget, restart when exhausted. A
        // restart resets cycle used to its value at trip start (not zero)
        // and jumps the clock 34 hours from the day's start.
        state.driving_left_minutes -= driving_today;
        state.cycle_used_minutes += on_duty_today;

        if state.remaining_cycle_minutes() <= 0
            && state.driving_left_minutes > DRIVING_EPSILON_MINUTES
        {
            state.clock += Duration::minutes(RESTART_DURATION_MINUTES);
            state.cycle_used_minutes = starting_cycle_minutes;
            daily_plan.push(PlanEntry::Restart(RestartMarker {
                note: "Required to regain 70-hour cycle".to_string(),
                resume_date: state.clock.date(),
                resume_time: state.clock.time(),
            }));
            debug!(day, "34-hour restart inserted");
        } else {
            state.clock = next_day_start;
        }

        day += 1;
    }

    // Summary: fold day records into trip totals. On-duty sums use the
    // display-rounded per-day values so the summary always matches what the
    // log sheets show.
    let total_on_duty_hours = round1(
        daily_plan
            .iter()
            .filter_map(PlanEntry::as_day)
            .map(|d| d.on_duty_hours)
            .sum(),
    );
    let total_days_needed = daily_plan.iter().filter(|e| !e.is_restart()).count() as u32;
    let requires_restart = daily_plan.iter().any(PlanEntry::is_restart);
    let remaining_cycle_after_trip =
        round1(70.0 - (input.cycle_used_hours + total_on_duty_hours)).max(0.0);

    info!(
        days = total_days_needed,
        on_duty_hours = total_on_duty_hours,
        requires_restart,
        "trip plan complete"
    );

    Ok(HosPlan {
        total_days_needed,
        total_on_duty_hours,
        remaining_cycle_after_trip,
        requires_restart,
        daily_plan,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
