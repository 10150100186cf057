use serde::{Deserialize, Serialize};

pub const ANGULAR_MULTIPLIER: f64 = 1.20;
pub const SUCCEDENT_MULTIPLIER: f64 = 1.00;
pub const CADENT_MULTIPLIER: f64 = 0.85;
pub const RETROGRADE_MULTIPLIER: f64 = 0.90;
pub const EXACT_ASPECT_BONUS: f64 = 0.07;
pub const MAX_ASPECT_BONUS: f64 = 0.35;

/// Largest weight any body can reach: domicile, angular, direct, full aspect bonus.
pub const MAX_FINAL_WEIGHT: f64 = 3.0 * ANGULAR_MULTIPLIER * 1.0 * (1.0 + MAX_ASPECT_BONUS);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseClass {
    Angular,
    Succedent,
    Cadent,
}

impl HouseClass {
    /// Houses 1, 4, 7, 10 are angular; 2, 5, 8, 11 succedent; the rest cadent.
    pub fn of(house: u8) -> HouseClass {
        match house % 3 {
            1 => HouseClass::Angular,
            2 => HouseClass::Succedent,
            _ => HouseClass::Cadent,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            HouseClass::Angular => ANGULAR_MULTIPLIER,
            HouseClass::Succedent => SUCCEDENT_MULTIPLIER,
            HouseClass::Cadent => CADENT_MULTIPLIER,
        }
    }
}

/// Weight breakdown for one body. All factors are kept at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub base_weight: f64,
    pub house_multiplier: f64,
    pub retrograde_multiplier: f64,
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub aspect_multiplier: f64,
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub final_weight: f64,
}

impl Weight {
    /// Final weight rounded to two decimals, for display.
    pub fn rounded(&self) -> f64 {
        crate::rounding::round_to(self.final_weight, 2)
    }
}

pub struct WeightCalculator;

impl WeightCalculator {
    pub fn house_multiplier(house: u8) -> f64 {
        HouseClass::of(house).multiplier()
    }

    pub fn retrograde_multiplier(retrograde: bool) -> f64 {
        if retrograde {
            RETROGRADE_MULTIPLIER
        } else {
            1.0
        }
    }

    /// 1.00 plus 0.07 per exact aspect, capped at +0.35.
    pub fn aspect_multiplier(exact_aspects: usize) -> f64 {
        1.0 + (exact_aspects as f64 * EXACT_ASPECT_BONUS).min(MAX_ASPECT_BONUS)
    }

    pub fn compute(&self, base_weight: f64, house: u8, retrograde: bool, exact_aspects: usize) -> Weight {
        let house_multiplier = Self::house_multiplier(house);
        let retrograde_multiplier = Self::retrograde_multiplier(retrograde);
        let aspect_multiplier = Self::aspect_multiplier(exact_aspects);

        Weight {
            base_weight,
            house_multiplier,
            retrograde_multiplier,
            aspect_multiplier,
            final_weight: base_weight * house_multiplier * retrograde_multiplier * aspect_multiplier,
        }
    }
}
