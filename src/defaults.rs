use chrono::NaiveTime;

/// Estimated average highway speed in mph, used to project miles from
/// driving time (fuel-stop placement, per-day mileage estimates).
pub const AVERAGE_SPEED_MPH: f64 = 55.0;

pub fn default_day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(5, 0, 0).expect("valid static default day start")
}
