//! Exact return of a body to its reference longitude.
//!
//! The search brackets a sign change of the wrapped longitude difference in a
//! window around the anniversary, then bisects it.

use crate::ephemeris::{datetime_to_julian_day, julian_day_to_datetime, EphemerisError, GeoLocation, PositionOracle};
use crate::western::Body;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Half-width of the search window around the anniversary, in days.
pub const SEARCH_HALF_WINDOW_DAYS: f64 = 5.0;
/// Stride between window samples, in days (6 hours).
pub const SAMPLE_STEP_DAYS: f64 = 0.25;
/// Samples in a full window scan, both endpoints included.
pub const WINDOW_SAMPLES: usize = 41;
/// Bisection steps. Ten days halved sixty times is far below a microsecond.
pub const BISECTION_ITERATIONS: usize = 60;

#[derive(Error, Debug)]
pub enum ReturnError {
    #[error("No return of {body} found within ±{half_window_days} days of {center} after {probes} samples")]
    NoBracket {
        body: Body,
        center: DateTime<Utc>,
        half_window_days: f64,
        probes: usize,
    },

    #[error("Cannot place {month:02}-{day:02} in {year}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Julian day {jd} is outside the supported date range")]
    OutOfRange { jd: f64 },

    #[error("Oracle failed during return search: {0}")]
    Oracle(#[from] EphemerisError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnMode {
    Exact,
    Approximate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarReturn {
    pub instant: DateTime<Utc>,
    pub mode: ReturnMode,
}

/// Wrap `longitude - target` into [-180, 180).
pub fn wrapped_difference(longitude: f64, target: f64) -> f64 {
    (longitude - target + 180.0).rem_euclid(360.0) - 180.0
}

/// Same month and day as `reference`, in `year`. 29 February falls back to
/// 28 February outside leap years.
fn anniversary_date<Tz: TimeZone>(reference: &DateTime<Tz>, year: i32) -> Result<NaiveDate, ReturnError> {
    let local = reference.naive_local();
    let (month, day) = (local.month(), local.day());

    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| (month == 2 && day == 29).then(|| NaiveDate::from_ymd_opt(year, 2, 28)).flatten())
        .ok_or(ReturnError::InvalidDate { year, month, day })
}

/// Interpret a wall-clock time in the reference's zone.
fn localize<Tz: TimeZone>(reference: &DateTime<Tz>, local: NaiveDateTime) -> Result<DateTime<Utc>, ReturnError> {
    reference
        .timezone()
        .from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(ReturnError::InvalidDate {
            year: local.year(),
            month: local.month(),
            day: local.day(),
        })
}

/// Center of the search window: noon local time on the anniversary.
pub fn search_center<Tz: TimeZone>(reference: &DateTime<Tz>, year: i32) -> Result<DateTime<Utc>, ReturnError> {
    let date = anniversary_date(reference, year)?;
    let noon = date.and_hms_opt(12, 0, 0).ok_or(ReturnError::InvalidDate {
        year,
        month: date.month(),
        day: date.day(),
    })?;
    localize(reference, noon)
}

/// Degraded answer: the same calendar date and local clock time in `year`.
/// Never called by the finder itself.
pub fn approximate_return<Tz: TimeZone>(reference: &DateTime<Tz>, year: i32) -> Result<SolarReturn, ReturnError> {
    let date = anniversary_date(reference, year)?;
    let instant = localize(reference, date.and_time(reference.naive_local().time()))?;
    Ok(SolarReturn {
        instant,
        mode: ReturnMode::Approximate,
    })
}

/// Bracket-and-bisect root finder for a body's return to its reference
/// longitude.
///
/// Precondition, not verified: the body's longitude increases monotonically
/// through one cycle across the search window. This holds for the Sun, never
/// retrograde; for other bodies the result may be any one of several crossings.
pub struct SolarReturnFinder<'a, O: PositionOracle> {
    oracle: &'a O,
    location: GeoLocation,
    body: Body,
}

impl<'a, O: PositionOracle> SolarReturnFinder<'a, O> {
    pub fn new(oracle: &'a O, location: GeoLocation) -> Self {
        Self {
            oracle,
            location,
            body: Body::Sun,
        }
    }

    /// Search for another body's return. See the precondition above.
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    fn longitude_at(&self, jd: f64) -> Result<f64, ReturnError> {
        let instant = julian_day_to_datetime(jd).ok_or(ReturnError::OutOfRange { jd })?;
        Ok(self.oracle.position(instant, &self.location, self.body)?.longitude)
    }

    fn diff(&self, jd: f64, target: f64) -> Result<f64, ReturnError> {
        Ok(wrapped_difference(self.longitude_at(jd)?, target))
    }

    /// Find the sub-interval of [center - 5 d, center + 5 d] holding the
    /// sign change. Returns the interval and the difference at its start.
    fn bracket(&self, center_jd: f64, target: f64) -> Result<(f64, f64, f64), ReturnError> {
        let start = center_jd - SEARCH_HALF_WINDOW_DAYS;
        let end = center_jd + SEARCH_HALF_WINDOW_DAYS;
        let f_start = self.diff(start, target)?;
        let f_end = self.diff(end, target)?;

        if f_start * f_end <= 0.0 {
            return Ok((start, end, f_start));
        }

        let (mut prev_jd, mut prev_f) = (start, f_start);
        for k in 1..WINDOW_SAMPLES {
            let (jd, f) = if k == WINDOW_SAMPLES - 1 {
                (end, f_end)
            } else {
                let jd = start + k as f64 * SAMPLE_STEP_DAYS;
                (jd, self.diff(jd, target)?)
            };
            if prev_f * f <= 0.0 {
                log::debug!("Bracket found at sample {}", k);
                return Ok((prev_jd, jd, prev_f));
            }
            prev_jd = jd;
            prev_f = f;
        }

        let center = julian_day_to_datetime(center_jd).ok_or(ReturnError::OutOfRange { jd: center_jd })?;
        Err(ReturnError::NoBracket {
            body: self.body,
            center,
            half_window_days: SEARCH_HALF_WINDOW_DAYS,
            probes: WINDOW_SAMPLES,
        })
    }

    /// Exact instant in `year` at which the body returns to its longitude at
    /// `reference`. Fails with [`ReturnError::NoBracket`] rather than guessing.
    pub fn find<Tz: TimeZone>(&self, reference: &DateTime<Tz>, year: i32) -> Result<SolarReturn, ReturnError> {
        let target = self
            .oracle
            .position(reference.with_timezone(&Utc), &self.location, self.body)?
            .longitude;
        let center_jd = datetime_to_julian_day(&search_center(reference, year)?);

        let (mut lo, mut hi, mut f_lo) = self.bracket(center_jd, target)?;
        for _ in 0..BISECTION_ITERATIONS {
            let mid = 0.5 * (lo + hi);
            let f_mid = self.diff(mid, target)?;
            if f_lo * f_mid <= 0.0 {
                hi = mid;
            } else {
                lo = mid;
                f_lo = f_mid;
            }
        }

        let jd = 0.5 * (lo + hi);
        let instant = julian_day_to_datetime(jd).ok_or(ReturnError::OutOfRange { jd })?;
        log::debug!("{} return to {:.6}° at {}", self.body, target, instant);

        Ok(SolarReturn {
            instant,
            mode: ReturnMode::Exact,
        })
    }
}
