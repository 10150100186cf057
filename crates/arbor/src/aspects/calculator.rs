use crate::aspects::types::{Aspect, AspectKind, AspectSet, AspectSettings};
use crate::ephemeris::types::BodyPosition;

/// Shortest angular distance between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).rem_euclid(360.0);
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Aspect calculator
pub struct AspectCalculator {
    settings: AspectSettings,
}

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new(settings: AspectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// Classify a separation in [0, 180] against the aspect angles.
    ///
    /// With validated settings the orbs of neighbouring angles never touch,
    /// so at most one aspect can match.
    pub fn classify_separation(&self, separation: f64) -> Option<(AspectKind, f64)> {
        AspectKind::ALL.iter().find_map(|&kind| {
            let orb = (separation - kind.angle()).abs();
            (orb <= self.settings.orbs.get(kind)).then_some((kind, orb))
        })
    }

    /// Compute aspects between every unordered pair of bodies.
    pub fn compute(&self, positions: &[BodyPosition]) -> AspectSet {
        let mut set = AspectSet::default();
        for position in positions {
            set.by_body.entry(position.body).or_default();
        }

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let p1 = &positions[i];
                let p2 = &positions[j];

                let separation = angular_separation(p1.longitude, p2.longitude);
                let Some((kind, orb)) = self.classify_separation(separation) else {
                    continue;
                };

                let index = set.aspects.len();
                set.aspects.push(Aspect {
                    body_a: p1.body,
                    body_b: p2.body,
                    kind,
                    separation,
                    orb,
                    exact: orb <= self.settings.exact_threshold,
                });
                set.by_body.entry(p1.body).or_default().push(index);
                set.by_body.entry(p2.body).or_default().push(index);
            }
        }

        log::debug!(
            "Found {} aspects among {} bodies",
            set.aspects.len(),
            positions.len()
        );
        set
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new(AspectSettings::default())
    }
}
