//! The position oracle boundary.
//!
//! Everything the engine knows about the sky comes through [`PositionOracle`].

use crate::ephemeris::types::{BodyPosition, GeoLocation};
use crate::western::Body;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Body {body} is not supported by this oracle")]
    UnsupportedBody { body: Body },
    #[error("Failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: Body,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Invalid reading for {body}: {message}")]
    InvalidReading { body: String, message: String },
}

/// Source of body positions. Implementations must be deterministic for
/// identical inputs.
pub trait PositionOracle {
    fn position(
        &self,
        instant: DateTime<Utc>,
        location: &GeoLocation,
        body: Body,
    ) -> Result<BodyPosition, EphemerisError>;
}

impl<T: PositionOracle + ?Sized> PositionOracle for &T {
    fn position(
        &self,
        instant: DateTime<Utc>,
        location: &GeoLocation,
        body: Body,
    ) -> Result<BodyPosition, EphemerisError> {
        (**self).position(instant, location, body)
    }
}

/// Positions gathered for one instant. Bodies the oracle could not provide are
/// listed in `excluded` instead of failing the whole snapshot.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub positions: Vec<BodyPosition>,
    pub excluded: Vec<Body>,
}

/// Ask the oracle for each body in turn.
pub fn collect_snapshot<O: PositionOracle>(
    oracle: &O,
    instant: DateTime<Utc>,
    location: &GeoLocation,
    bodies: &[Body],
) -> Snapshot {
    let mut snapshot = Snapshot::default();

    for &body in bodies {
        match oracle.position(instant, location, body) {
            Ok(position) => snapshot.positions.push(position),
            Err(e) => {
                log::warn!("Excluding {} from snapshot: {}", body, e);
                snapshot.excluded.push(body);
            }
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct SunOnly;

    impl PositionOracle for SunOnly {
        fn position(
            &self,
            _instant: DateTime<Utc>,
            _location: &GeoLocation,
            body: Body,
        ) -> Result<BodyPosition, EphemerisError> {
            match body {
                Body::Sun => Ok(BodyPosition::from_longitude(Body::Sun, 135.0, 5, false)),
                other => Err(EphemerisError::UnsupportedBody { body: other }),
            }
        }
    }

    #[test]
    fn test_collect_snapshot_excludes_failures() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let location = GeoLocation { lat: 0.0, lon: 0.0 };
        let snapshot = collect_snapshot(&SunOnly, instant, &location, &[Body::Sun, Body::Moon]);
        assert_eq!(snapshot.positions.len(), 1);
        assert_eq!(snapshot.excluded, vec![Body::Moon]);
    }
}
