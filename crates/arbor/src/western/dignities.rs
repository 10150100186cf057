//! Essential dignities for Western astrology.
//!
//! Classifies a body in a sign as domicile, exaltation, exile, fall or
//! peregrine, and assigns the base weight used by the weighting stage.

use crate::western::types::{Body, Sign};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DignityCategory {
    Domicile,
    Exaltation,
    Peregrine,
    Exile,
    Fall,
}

impl DignityCategory {
    pub fn base_weight(self) -> f64 {
        match self {
            DignityCategory::Domicile => 3.0,
            DignityCategory::Exaltation => 2.0,
            DignityCategory::Peregrine => 1.0,
            DignityCategory::Exile => 0.5,
            DignityCategory::Fall => 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DignityRecord {
    pub category: DignityCategory,
    pub base_weight: f64,
}

impl DignityRecord {
    pub fn new(category: DignityCategory) -> Self {
        Self {
            category,
            base_weight: category.base_weight(),
        }
    }
}

struct BodyDignities {
    domicile: &'static [Sign],
    exaltation: &'static [Sign],
    exile: &'static [Sign],
    fall: &'static [Sign],
}

fn dignity_table(body: Body) -> Option<&'static BodyDignities> {
    use Sign::*;

    const SUN: BodyDignities = BodyDignities {
        domicile: &[Leo],
        exaltation: &[Aries],
        exile: &[Aquarius],
        fall: &[Libra],
    };
    const MOON: BodyDignities = BodyDignities {
        domicile: &[Cancer],
        exaltation: &[Taurus],
        exile: &[Capricorn],
        fall: &[Scorpio],
    };
    const MERCURY: BodyDignities = BodyDignities {
        domicile: &[Gemini, Virgo],
        exaltation: &[Virgo],
        exile: &[Sagittarius, Pisces],
        fall: &[Pisces],
    };
    const VENUS: BodyDignities = BodyDignities {
        domicile: &[Taurus, Libra],
        exaltation: &[Pisces],
        exile: &[Aries, Scorpio],
        fall: &[Virgo],
    };
    const MARS: BodyDignities = BodyDignities {
        domicile: &[Aries, Scorpio],
        exaltation: &[Capricorn],
        exile: &[Libra, Taurus],
        fall: &[Cancer],
    };
    const JUPITER: BodyDignities = BodyDignities {
        domicile: &[Sagittarius, Pisces],
        exaltation: &[Cancer],
        exile: &[Gemini, Virgo],
        fall: &[Capricorn],
    };
    const SATURN: BodyDignities = BodyDignities {
        domicile: &[Capricorn, Aquarius],
        exaltation: &[Libra],
        exile: &[Cancer, Leo],
        fall: &[Aries],
    };
    const URANUS: BodyDignities = BodyDignities {
        domicile: &[Aquarius],
        exaltation: &[Scorpio],
        exile: &[Leo],
        fall: &[Taurus],
    };
    const NEPTUNE: BodyDignities = BodyDignities {
        domicile: &[Pisces],
        exaltation: &[Cancer],
        exile: &[Virgo],
        fall: &[Capricorn],
    };
    const PLUTO: BodyDignities = BodyDignities {
        domicile: &[Scorpio],
        exaltation: &[Leo],
        exile: &[Taurus],
        fall: &[Aquarius],
    };

    match body {
        Body::Sun => Some(&SUN),
        Body::Moon => Some(&MOON),
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
        Body::Pluto => Some(&PLUTO),
        Body::Chiron | Body::NorthNode => None,
    }
}

pub struct DignityClassifier;

impl DignityClassifier {
    /// Classify `body` in `sign`. Bodies without a table entry, and signs in
    /// none of the body's lists, are peregrine.
    ///
    /// Domicile is checked before exaltation, so Mercury in Virgo is domicile.
    pub fn classify(&self, body: Body, sign: Sign) -> DignityRecord {
        let Some(table) = dignity_table(body) else {
            return DignityRecord::new(DignityCategory::Peregrine);
        };

        let category = if table.domicile.contains(&sign) {
            DignityCategory::Domicile
        } else if table.exaltation.contains(&sign) {
            DignityCategory::Exaltation
        } else if table.exile.contains(&sign) {
            DignityCategory::Exile
        } else if table.fall.contains(&sign) {
            DignityCategory::Fall
        } else {
            DignityCategory::Peregrine
        };

        DignityRecord::new(category)
    }

    /// Classify from an absolute longitude.
    pub fn classify_longitude(&self, body: Body, longitude: f64) -> DignityRecord {
        self.classify(body, Sign::from_longitude(longitude))
    }
}
