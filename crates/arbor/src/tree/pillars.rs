use crate::rounding::round_to;
use crate::tree::nodes::{body_node, HiddenNodePolicy, Pillar};
use crate::western::Body;
use serde::Serialize;
use std::collections::BTreeMap;

/// Percentage below which the leading pillar is not considered dominant.
pub const DOMINANCE_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PillarShare {
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub weight_sum: f64,
    #[serde(serialize_with = "crate::rounding::one_decimal")]
    pub percentage: f64,
    pub bodies: Vec<Body>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Balance {
    Balanced,
    Dominant,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PillarDiagnosis {
    pub pillar: Pillar,
    #[serde(serialize_with = "crate::rounding::one_decimal")]
    pub percentage: f64,
    pub balance: Balance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarAggregation {
    pub pillars: BTreeMap<Pillar, PillarShare>,
    pub dominant: PillarDiagnosis,
}

impl PillarAggregation {
    pub fn share(&self, pillar: Pillar) -> Option<&PillarShare> {
        self.pillars.get(&pillar)
    }
}

/// Sum body weights per pillar. Bodies without a node are skipped, as are
/// hidden-node bodies under `ExcludeFromPillars`.
pub fn aggregate_pillars<I>(weights: I, policy: HiddenNodePolicy) -> PillarAggregation
where
    I: IntoIterator<Item = (Body, f64)>,
{
    let mut pillars: BTreeMap<Pillar, PillarShare> =
        Pillar::ALL.iter().map(|&p| (p, PillarShare::default())).collect();

    for (body, weight) in weights {
        let Some(node) = body_node(body) else {
            continue;
        };
        if node.is_hidden() && policy == HiddenNodePolicy::ExcludeFromPillars {
            continue;
        }
        let share = pillars.entry(node.pillar()).or_default();
        share.weight_sum += weight;
        share.bodies.push(body);
    }

    let total: f64 = pillars.values().map(|s| s.weight_sum).sum();
    for share in pillars.values_mut() {
        share.percentage = if total > 0.0 {
            share.weight_sum / total * 100.0
        } else {
            0.0
        };
    }

    // First maximum in left, middle, right order, compared at display precision.
    let mut dominant = Pillar::Left;
    let mut best = f64::NEG_INFINITY;
    for pillar in Pillar::ALL {
        let percentage = pillars.get(&pillar).map_or(0.0, |s| round_to(s.percentage, 1));
        if percentage > best {
            best = percentage;
            dominant = pillar;
        }
    }

    let percentage = pillars.get(&dominant).map_or(0.0, |s| s.percentage);
    let balance = if round_to(percentage, 1) < DOMINANCE_THRESHOLD {
        Balance::Balanced
    } else {
        Balance::Dominant
    };

    PillarAggregation {
        pillars,
        dominant: PillarDiagnosis {
            pillar: dominant,
            percentage,
            balance,
        },
    }
}
