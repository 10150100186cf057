//! Julian Day conversions.
//!
//! Pure arithmetic on the Unix epoch, keeping sub-second precision so the
//! return finder can bisect below one second.

use chrono::{DateTime, Utc};

/// Julian Day of 1970-01-01T00:00:00Z.
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert UTC datetime to Julian Day (UT).
pub fn datetime_to_julian_day(dt: &DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9;
    JD_UNIX_EPOCH + seconds / SECONDS_PER_DAY
}

/// Convert Julian Day (UT) to UTC datetime. `None` when out of chrono's range.
pub fn julian_day_to_datetime(jd: f64) -> Option<DateTime<Utc>> {
    if !jd.is_finite() {
        return None;
    }
    let seconds = (jd - JD_UNIX_EPOCH) * SECONDS_PER_DAY;
    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(whole as i64, nanos)
}
