use crate::western::{Body, Sign};
use serde::{Deserialize, Serialize};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// One body's reading from the position oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Absolute ecliptic longitude in degrees [0, 360)
    pub longitude: f64,
    pub sign: Sign,
    /// Degree within the sign [0, 30)
    pub degree: f64,
    /// House number 1..=12
    pub house: u8,
    pub retrograde: bool,
}

impl BodyPosition {
    /// Build a reading from an absolute longitude, deriving sign and degree.
    pub fn from_longitude(body: Body, longitude: f64, house: u8, retrograde: bool) -> Self {
        let mut longitude = longitude.rem_euclid(360.0);
        // rem_euclid rounds tiny negatives up to exactly 360.0
        if longitude >= 360.0 {
            longitude = 0.0;
        }
        let sign = Sign::from_longitude(longitude);
        Self {
            body,
            longitude,
            sign,
            degree: longitude - sign.start_longitude(),
            house,
            retrograde,
        }
    }

    /// Build a reading from sign and degree, deriving the absolute longitude.
    pub fn from_sign(body: Body, sign: Sign, degree: f64, house: u8, retrograde: bool) -> Self {
        Self {
            body,
            longitude: sign.start_longitude() + degree,
            sign,
            degree,
            house,
            retrograde,
        }
    }

    /// Range checks on the reading. Returns a description of the first
    /// problem found.
    pub fn check(&self) -> Result<(), String> {
        if !self.longitude.is_finite() || !(0.0..360.0).contains(&self.longitude) {
            return Err(format!("longitude {} outside [0, 360)", self.longitude));
        }
        if !self.degree.is_finite() || !(0.0..30.0).contains(&self.degree) {
            return Err(format!("degree {} outside [0, 30)", self.degree));
        }
        if !(1..=12).contains(&self.house) {
            return Err(format!("house {} outside 1..=12", self.house));
        }
        let derived = self.sign.start_longitude() + self.degree;
        if (derived - self.longitude).abs() > 1e-6 {
            return Err(format!(
                "{} {:.4}° does not match longitude {:.4}",
                self.sign, self.degree, self.longitude
            ));
        }
        Ok(())
    }
}

/// House cusps for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePositions {
    /// House system name
    pub system: String,
    /// Cusp longitudes for houses 1..=12, in order
    pub cusps: [f64; 12],
    pub asc: f64,
    pub mc: f64,
}

/// Settings for ephemeris calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisSettings {
    /// House system name
    pub house_system: String,
    /// Bodies to request when building a snapshot
    pub include_bodies: Vec<Body>,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            house_system: "placidus".to_string(),
            include_bodies: Body::PLANETS.to_vec(),
        }
    }
}
