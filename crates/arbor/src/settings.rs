use crate::aspects::{AspectKind, AspectSettings};
use crate::tree::HiddenNodePolicy;
use crate::western::RulershipConvention;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for any single orb.
pub const MAX_ORB: f64 = 30.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("Invalid orb for {kind:?}: {orb} (must be greater than 0 and less than {max})")]
    InvalidOrb { kind: AspectKind, orb: f64, max: f64 },

    #[error("Invalid exact threshold {threshold}: must be between 0 and the smallest orb ({smallest_orb})")]
    InvalidExactThreshold { threshold: f64, smallest_orb: f64 },

    #[error("Orbs for {first:?} and {second:?} overlap: {first_orb} + {second_orb} must be less than {gap}")]
    OverlappingOrbs {
        first: AspectKind,
        second: AspectKind,
        first_orb: f64,
        second_orb: f64,
        gap: f64,
    },
}

/// Engine-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub rulership: RulershipConvention,
    pub hidden_node: HiddenNodePolicy,
    pub aspects: AspectSettings,
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut smallest_orb = f64::INFINITY;
        for kind in AspectKind::ALL {
            let orb = self.aspects.orbs.get(kind);
            if !(orb > 0.0 && orb < MAX_ORB) {
                return Err(SettingsError::InvalidOrb {
                    kind,
                    orb,
                    max: MAX_ORB,
                });
            }
            smallest_orb = smallest_orb.min(orb);
        }

        // Neighbouring angles can be only 30° apart (sextile, square, trine)
        for pair in AspectKind::ALL.windows(2) {
            let (first, second) = (pair[0], pair[1]);
            let first_orb = self.aspects.orbs.get(first);
            let second_orb = self.aspects.orbs.get(second);
            let gap = second.angle() - first.angle();
            if first_orb + second_orb >= gap {
                return Err(SettingsError::OverlappingOrbs {
                    first,
                    second,
                    first_orb,
                    second_orb,
                    gap,
                });
            }
        }

        let threshold = self.aspects.exact_threshold;
        if !(threshold >= 0.0 && threshold <= smallest_orb) {
            return Err(SettingsError::InvalidExactThreshold {
                threshold,
                smallest_orb,
            });
        }
        Ok(())
    }
}
