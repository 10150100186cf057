//! Sign rulers for Western astrology.
//!
//! Maps zodiac signs to their ruling bodies. Scorpio, Aquarius and Pisces
//! differ between the traditional and modern conventions, so the convention is
//! always passed explicitly.

use crate::western::types::{Body, Sign};
use serde::{Deserialize, Serialize};

/// Which set of sign rulers to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulershipConvention {
    /// Scorpio → Mars, Aquarius → Saturn, Pisces → Jupiter.
    Traditional,
    /// Scorpio → Pluto, Aquarius → Uranus, Pisces → Neptune.
    #[default]
    Modern,
}

const TRADITIONAL_RULERS: [Body; 12] = [
    Body::Mars,    // Aries
    Body::Venus,   // Taurus
    Body::Mercury, // Gemini
    Body::Moon,    // Cancer
    Body::Sun,     // Leo
    Body::Mercury, // Virgo
    Body::Venus,   // Libra
    Body::Mars,    // Scorpio
    Body::Jupiter, // Sagittarius
    Body::Saturn,  // Capricorn
    Body::Saturn,  // Aquarius
    Body::Jupiter, // Pisces
];

const MODERN_RULERS: [Body; 12] = [
    Body::Mars,
    Body::Venus,
    Body::Mercury,
    Body::Moon,
    Body::Sun,
    Body::Mercury,
    Body::Venus,
    Body::Pluto,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
];

/// Get the ruler of a sign under the given convention.
pub fn sign_ruler(sign: Sign, convention: RulershipConvention) -> Body {
    match convention {
        RulershipConvention::Traditional => TRADITIONAL_RULERS[sign.index()],
        RulershipConvention::Modern => MODERN_RULERS[sign.index()],
    }
}

/// Get the ruler of the sign containing `longitude`.
pub fn sign_ruler_from_longitude(longitude: f64, convention: RulershipConvention) -> Body {
    sign_ruler(Sign::from_longitude(longitude), convention)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_ruler_traditional() {
        let c = RulershipConvention::Traditional;
        assert_eq!(sign_ruler(Sign::Aries, c), Body::Mars);
        assert_eq!(sign_ruler(Sign::Cancer, c), Body::Moon);
        assert_eq!(sign_ruler(Sign::Leo, c), Body::Sun);
        assert_eq!(sign_ruler(Sign::Scorpio, c), Body::Mars);
        assert_eq!(sign_ruler(Sign::Aquarius, c), Body::Saturn);
    }

    #[test]
    fn test_sign_ruler_modern() {
        let c = RulershipConvention::Modern;
        assert_eq!(sign_ruler(Sign::Scorpio, c), Body::Pluto);
        assert_eq!(sign_ruler(Sign::Aquarius, c), Body::Uranus);
        assert_eq!(sign_ruler(Sign::Pisces, c), Body::Neptune);
    }

    #[test]
    fn test_ruler_from_longitude() {
        assert_eq!(
            sign_ruler_from_longitude(135.0, RulershipConvention::Modern),
            Body::Sun
        );
    }
}
