use crate::ephemeris::houses::house_for_longitude;
use crate::ephemeris::oracle::{EphemerisError, PositionOracle};
use crate::ephemeris::time::datetime_to_julian_day;
use crate::ephemeris::types::{BodyPosition, EphemerisSettings, GeoLocation, HousePositions};
use crate::western::Body;
use chrono::{DateTime, Utc};
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::calc_ut;

// Swiss Ephemeris body codes: SUN=0 .. PLUTO=9, TRUE_NODE=11, CHIRON=15
fn swiss_body_code(body: Body) -> i32 {
    match body {
        Body::Sun => 0,
        Body::Moon => 1,
        Body::Mercury => 2,
        Body::Venus => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
        Body::Uranus => 7,
        Body::Neptune => 8,
        Body::Pluto => 9,
        Body::NorthNode => 11,
        Body::Chiron => 15,
    }
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, u8)] = &[
    ("placidus", b'P'),
    ("whole_sign", b'W'),
    ("koch", b'K'),
    ("equal", b'E'),
    ("regiomontanus", b'R'),
    ("campanus", b'C'),
    ("alcabitius", b'A'),
    ("morinus", b'M'),
];

// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: i32 = 2 | 256;

/// Swiss Ephemeris backed [`PositionOracle`]. Tropical zodiac only.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    house_system: String,
    house_system_byte: u8,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(
        ephemeris_path: Option<PathBuf>,
        settings: &EphemerisSettings,
    ) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let house_system_byte = get_house_system_byte(&settings.house_system)?;
        log::debug!(
            "Swiss Ephemeris adapter ready at {} ({} houses)",
            path.display(),
            settings.house_system
        );

        Ok(Self {
            ephemeris_path: path,
            house_system: settings.house_system.to_lowercase(),
            house_system_byte,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    pub fn house_system(&self) -> &str {
        &self.house_system
    }

    /// Ecliptic longitude and its daily speed for a single body.
    pub fn calc_body(
        &self,
        body: Body,
        jd: f64,
        datetime: DateTime<Utc>,
    ) -> Result<(f64, f64), EphemerisError> {
        let result = calc_ut(jd, swiss_body_code(body) as u32, CALC_FLAGS as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                datetime,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok((out[0].rem_euclid(360.0), out[3]))
    }

    /// Calculate house cusps and angles
    pub fn calc_houses(&self, jd: f64, location: &GeoLocation) -> Result<HousePositions, EphemerisError> {
        use swisseph::swe::houses_ex;
        use swisseph::{AscMc, Cusp};

        let (c, a) = houses_ex(jd, CALC_FLAGS, location.lat, location.lon, self.house_system_byte as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusp_values.iter().any(|c| !c.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("non-finite cusp for {} houses", self.house_system),
            });
        }

        Ok(HousePositions {
            system: self.house_system.clone(),
            cusps: cusp_values.map(|c| c.rem_euclid(360.0)),
            asc: ascmc.ascendant.rem_euclid(360.0),
            mc: ascmc.mc.rem_euclid(360.0),
        })
    }
}

impl PositionOracle for SwissEphemerisAdapter {
    fn position(
        &self,
        instant: DateTime<Utc>,
        location: &GeoLocation,
        body: Body,
    ) -> Result<BodyPosition, EphemerisError> {
        let jd = datetime_to_julian_day(&instant);
        let (longitude, speed) = self.calc_body(body, jd, instant)?;
        let houses = self.calc_houses(jd, location)?;
        let house = house_for_longitude(longitude, &houses.cusps).ok_or_else(|| {
            EphemerisError::HouseCalculationFailed {
                message: format!("no house contains {:.4}°", longitude),
            }
        })?;

        Ok(BodyPosition::from_longitude(body, longitude, house, speed < 0.0))
    }
}

/// Convert house system string to byte format
fn get_house_system_byte(house_system: &str) -> Result<u8, EphemerisError> {
    HOUSE_SYSTEMS
        .iter()
        .find(|(name, _)| *name == house_system.to_lowercase())
        .map(|(_, byte)| *byte)
        .ok_or_else(|| EphemerisError::InvalidHouseSystem {
            system: house_system.to_string(),
            valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
        })
}
