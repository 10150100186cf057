//! Zodiac signs and chart bodies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown sign: {0}")]
    UnknownSign(String),
    #[error("Unknown body: {0}")]
    UnknownBody(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const SIGN_ORDER: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    /// Sign at `index` (wraps modulo 12).
    pub fn from_index(index: usize) -> Sign {
        SIGN_ORDER[index % 12]
    }

    /// Zero-based position in the zodiac (Aries = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign containing an absolute ecliptic longitude.
    pub fn from_longitude(longitude: f64) -> Sign {
        let lon = longitude.rem_euclid(360.0);
        Self::from_index((lon / 30.0) as usize)
    }

    /// Longitude of the first degree of this sign.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "aries",
            Sign::Taurus => "taurus",
            Sign::Gemini => "gemini",
            Sign::Cancer => "cancer",
            Sign::Leo => "leo",
            Sign::Virgo => "virgo",
            Sign::Libra => "libra",
            Sign::Scorpio => "scorpio",
            Sign::Sagittarius => "sagittarius",
            Sign::Capricorn => "capricorn",
            Sign::Aquarius => "aquarius",
            Sign::Pisces => "pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sign {
    type Err = ParseError;

    /// Accepts full names and the three-letter abbreviations ephemeris
    /// libraries commonly emit (`Ari`, `Tau`, ...), in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        SIGN_ORDER
            .iter()
            .copied()
            .find(|sign| sign.name() == lower || (lower.len() == 3 && sign.name().starts_with(&lower)))
            .ok_or_else(|| ParseError::UnknownSign(s.to_string()))
    }
}

/// A chart body: the ten planets plus computed points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    NorthNode,
}

impl Body {
    pub const PLANETS: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub const ALL: [Body; 12] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Chiron,
        Body::NorthNode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::Chiron => "chiron",
            Body::NorthNode => "north_node",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase().replace([' ', '-'], "_");
        let lower = match lower.as_str() {
            "true_node" | "mean_node" | "node" => "north_node".to_string(),
            _ => lower,
        };
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name() == lower)
            .ok_or_else(|| ParseError::UnknownBody(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_from_longitude() {
        assert_eq!(Sign::from_longitude(0.0), Sign::Aries);
        assert_eq!(Sign::from_longitude(135.0), Sign::Leo);
        assert_eq!(Sign::from_longitude(359.99), Sign::Pisces);
        assert_eq!(Sign::from_longitude(370.0), Sign::Aries);
        assert_eq!(Sign::from_longitude(-10.0), Sign::Pisces);
    }

    #[test]
    fn test_sign_parsing() {
        assert_eq!("Leo".parse::<Sign>().unwrap(), Sign::Leo);
        assert_eq!("Sco".parse::<Sign>().unwrap(), Sign::Scorpio);
        assert_eq!("AQU".parse::<Sign>().unwrap(), Sign::Aquarius);
        assert!("Ophiuchus".parse::<Sign>().is_err());
    }

    #[test]
    fn test_body_parsing() {
        assert_eq!("Sun".parse::<Body>().unwrap(), Body::Sun);
        assert_eq!("true_node".parse::<Body>().unwrap(), Body::NorthNode);
        assert_eq!("North Node".parse::<Body>().unwrap(), Body::NorthNode);
        assert!("ceres".parse::<Body>().is_err());
    }
}
