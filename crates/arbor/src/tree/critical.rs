use crate::aspects::types::{AspectKind, AspectSet};
use crate::tree::nodes::body_node;
use crate::tree::paths::{path_between, SymbolicPath};
use crate::western::Body;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Urgency {
    High,
    Medium,
}

impl Urgency {
    pub fn for_aspect(kind: AspectKind) -> Urgency {
        if kind.is_hard() {
            Urgency::High
        } else {
            Urgency::Medium
        }
    }
}

/// A path whose two endpoint bodies are joined by an aspect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalPath {
    pub path: &'static SymbolicPath,
    pub body_a: Body,
    pub body_b: Body,
    pub aspect: AspectKind,
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub orb: f64,
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub combined_weight: f64,
    pub urgency: Urgency,
}

impl CriticalPath {
    pub fn involves(&self, body: Body) -> bool {
        self.body_a == body || self.body_b == body
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathCriticalityDetector;

impl PathCriticalityDetector {
    /// One entry per aspect whose bodies sit at the two ends of a path,
    /// strongest combined weight first.
    pub fn detect(&self, aspects: &AspectSet, weights: &HashMap<Body, f64>) -> Vec<CriticalPath> {
        let mut critical: Vec<CriticalPath> = aspects
            .aspects
            .iter()
            .filter_map(|aspect| {
                let node_a = body_node(aspect.body_a)?;
                let node_b = body_node(aspect.body_b)?;
                let path = path_between(node_a, node_b)?;
                let weight_a = weights.get(&aspect.body_a).copied().unwrap_or(0.0);
                let weight_b = weights.get(&aspect.body_b).copied().unwrap_or(0.0);

                Some(CriticalPath {
                    path,
                    body_a: aspect.body_a,
                    body_b: aspect.body_b,
                    aspect: aspect.kind,
                    orb: aspect.orb,
                    combined_weight: weight_a + weight_b,
                    urgency: Urgency::for_aspect(aspect.kind),
                })
            })
            .collect();

        // Vec::sort_by is stable; ties keep aspect order.
        critical.sort_by(|a, b| b.combined_weight.total_cmp(&a.combined_weight));
        log::debug!("{} critical paths", critical.len());
        critical
    }
}
