//! Loosely-typed readings as they arrive from JSON snapshots.
//!
//! Sign spellings and house labels are parsed here, once, so everything past
//! this point works with [`BodyPosition`].

use crate::ephemeris::houses::parse_house_label;
use crate::ephemeris::oracle::EphemerisError;
use crate::ephemeris::types::BodyPosition;
use crate::western::{Body, Sign};
use serde::{Deserialize, Serialize};

/// House given as a number or a label such as `"Tenth_House"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HouseField {
    Number(u8),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub body: String,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub sign: Option<String>,
    #[serde(default)]
    pub degree: Option<f64>,
    pub house: HouseField,
    #[serde(default)]
    pub retrograde: bool,
}

impl RawReading {
    /// Resolve into a checked position. Longitude wins when both longitude
    /// and sign are present.
    pub fn resolve(&self) -> Result<BodyPosition, EphemerisError> {
        let invalid = |message: String| EphemerisError::InvalidReading {
            body: self.body.clone(),
            message,
        };

        let body: Body = self.body.parse().map_err(|e| invalid(format!("{}", e)))?;
        let house = match &self.house {
            HouseField::Number(n) if (1..=12).contains(n) => *n,
            HouseField::Number(n) => return Err(invalid(format!("house {} outside 1..=12", n))),
            HouseField::Label(label) => {
                parse_house_label(label).ok_or_else(|| invalid(format!("unknown house label '{}'", label)))?
            }
        };

        let position = match (self.longitude, self.sign.as_deref(), self.degree) {
            (Some(longitude), _, _) => BodyPosition::from_longitude(body, longitude, house, self.retrograde),
            (None, Some(sign), Some(degree)) => {
                let sign: Sign = sign.parse().map_err(|e| invalid(format!("{}", e)))?;
                BodyPosition::from_sign(body, sign, degree, house, self.retrograde)
            }
            _ => return Err(invalid("needs a longitude or a sign and degree".to_string())),
        };

        position.check().map_err(invalid)?;
        Ok(position)
    }
}

/// Resolve a batch, keeping what parses. Failures are logged and returned by
/// name.
pub fn resolve_readings(readings: &[RawReading]) -> (Vec<BodyPosition>, Vec<String>) {
    let mut positions = Vec::with_capacity(readings.len());
    let mut rejected = Vec::new();

    for reading in readings {
        match reading.resolve() {
            Ok(position) => positions.push(position),
            Err(e) => {
                log::warn!("Skipping reading: {}", e);
                rejected.push(reading.body.clone());
            }
        }
    }

    (positions, rejected)
}
