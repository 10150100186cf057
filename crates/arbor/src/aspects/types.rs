use crate::western::Body;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    /// Squares and oppositions.
    pub fn is_hard(self) -> bool {
        matches!(self, AspectKind::Square | AspectKind::Opposition)
    }
}

/// An aspect between two bodies. Stored once; both bodies reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    pub kind: AspectKind,
    /// Angular separation in [0, 180]
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub separation: f64,
    /// Deviation from the exact angle
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub orb: f64,
    /// Whether the orb is within the exactness threshold
    pub exact: bool,
}

impl Aspect {
    /// The other body of the pair, if `body` takes part in this aspect.
    pub fn other(&self, body: Body) -> Option<Body> {
        if self.body_a == body {
            Some(self.body_b)
        } else if self.body_b == body {
            Some(self.body_a)
        } else {
            None
        }
    }

    pub fn involves(&self, body: Body) -> bool {
        self.body_a == body || self.body_b == body
    }
}

/// Orb tolerance per aspect, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectOrbs {
    pub conjunction: f64,
    pub sextile: f64,
    pub square: f64,
    pub trine: f64,
    pub opposition: f64,
}

impl AspectOrbs {
    pub fn get(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Conjunction => self.conjunction,
            AspectKind::Sextile => self.sextile,
            AspectKind::Square => self.square,
            AspectKind::Trine => self.trine,
            AspectKind::Opposition => self.opposition,
        }
    }
}

impl Default for AspectOrbs {
    fn default() -> Self {
        Self {
            conjunction: 8.0,
            sextile: 6.0,
            square: 8.0,
            trine: 8.0,
            opposition: 8.0,
        }
    }
}

/// Settings for aspect calculations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectSettings {
    pub orbs: AspectOrbs,
    /// Aspects with an orb at or below this are exact
    pub exact_threshold: f64,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            orbs: AspectOrbs::default(),
            exact_threshold: 3.0,
        }
    }
}

/// All aspects of a chart, with per-body index lists into `aspects`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AspectSet {
    pub aspects: Vec<Aspect>,
    pub by_body: HashMap<Body, Vec<usize>>,
}

impl AspectSet {
    /// Aspects involving `body`.
    pub fn for_body(&self, body: Body) -> impl Iterator<Item = &Aspect> + '_ {
        self.by_body
            .get(&body)
            .into_iter()
            .flatten()
            .filter_map(move |&i| self.aspects.get(i))
    }

    /// Number of exact aspects involving `body`.
    pub fn exact_count(&self, body: Body) -> usize {
        self.for_body(body).filter(|a| a.exact).count()
    }

    /// The aspect between two bodies, in either order.
    pub fn between(&self, a: Body, b: Body) -> Option<&Aspect> {
        self.for_body(a).find(|aspect| aspect.other(a) == Some(b))
    }

    pub fn len(&self) -> usize {
        self.aspects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aspects.is_empty()
    }
}
