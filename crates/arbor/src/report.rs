//! Chart engine: runs every stage over one snapshot and assembles the report.

use crate::aspects::{Aspect, AspectCalculator, AspectKind};
use crate::ephemeris::{collect_snapshot, BodyPosition, GeoLocation, PositionOracle};
use crate::graph::{DispositorGraph, DispositorGraphBuilder};
use crate::settings::{EngineSettings, SettingsError};
use crate::tree::{
    aggregate_pillars, body_node, paths_touching, CriticalPath, PathCriticalityDetector, Pillar,
    PillarAggregation, Sephirah,
};
use crate::weighting::{Weight, WeightCalculator};
use crate::western::{genius_for_sign_and_degree, Body, DignityClassifier, DignityRecord, GeniusInfo, Sign};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// An aspect as seen from one of its bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectRef {
    /// Index into `ChartReport::aspects`
    pub index: usize,
    pub with: Body,
    pub kind: AspectKind,
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub orb: f64,
    pub exact: bool,
}

/// A path touching a body's node, named by the node at its far end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupationPath {
    pub number: u8,
    pub name: &'static str,
    pub trump: u8,
    pub connects_to: Sephirah,
    pub attribution: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyReport {
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub longitude: f64,
    pub sign: Sign,
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub degree: f64,
    pub house: u8,
    pub retrograde: bool,
    pub dignity: DignityRecord,
    pub weight: Weight,
    pub aspects: Vec<AspectRef>,
    pub node: Option<Sephirah>,
    pub pillar: Option<Pillar>,
    pub genius: GeniusInfo,
    pub occupation_paths: Vec<OccupationPath>,
    pub critical_paths: Vec<CriticalPath>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartReport {
    pub bodies: BTreeMap<Body, BodyReport>,
    pub aspects: Vec<Aspect>,
    pub graph: DispositorGraph,
    pub critical_paths: Vec<CriticalPath>,
    pub pillar_aggregation: PillarAggregation,
    /// Bodies left out because their reading was missing or invalid
    pub excluded: Vec<String>,
}

impl ChartReport {
    pub fn body(&self, body: Body) -> Option<&BodyReport> {
        self.bodies.get(&body)
    }

    pub fn final_weight(&self, body: Body) -> Option<f64> {
        self.bodies.get(&body).map(|b| b.weight.final_weight)
    }
}

/// Runs dignity, weighting, aspect, graph and path stages over a snapshot.
#[derive(Debug, Clone, Default)]
pub struct ChartEngine {
    settings: EngineSettings,
}

impl ChartEngine {
    /// Fails if the settings would let one separation match two aspects.
    pub fn new(settings: EngineSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Query the oracle for `bodies` at `instant` and compute the report.
    /// Bodies the oracle fails on are listed under `excluded`.
    pub fn compute_from_oracle<O: PositionOracle>(
        &self,
        oracle: &O,
        instant: DateTime<Utc>,
        location: &GeoLocation,
        bodies: &[Body],
    ) -> ChartReport {
        let snapshot = collect_snapshot(oracle, instant, location, bodies);
        let mut report = self.compute(&snapshot.positions);
        let mut excluded: Vec<String> = snapshot.excluded.iter().map(|b| b.to_string()).collect();
        excluded.append(&mut report.excluded);
        report.excluded = excluded;
        report
    }

    /// Compute the full report. Invalid or repeated readings are excluded
    /// with a warning; everything else is always computed.
    pub fn compute(&self, positions: &[BodyPosition]) -> ChartReport {
        let mut accepted: Vec<BodyPosition> = Vec::with_capacity(positions.len());
        let mut excluded = Vec::new();

        for position in positions {
            if let Err(message) = position.check() {
                log::warn!("Excluding {}: {}", position.body, message);
                excluded.push(position.body.to_string());
            } else if accepted.iter().any(|p| p.body == position.body) {
                log::warn!("Excluding repeated reading for {}", position.body);
                excluded.push(position.body.to_string());
            } else {
                accepted.push(position.clone());
            }
        }

        let aspect_set = AspectCalculator::new(self.settings.aspects).compute(&accepted);

        let mut dignities: HashMap<Body, DignityRecord> = HashMap::new();
        let mut weights: HashMap<Body, Weight> = HashMap::new();
        for position in &accepted {
            let dignity = DignityClassifier.classify(position.body, position.sign);
            let weight = WeightCalculator.compute(
                dignity.base_weight,
                position.house,
                position.retrograde,
                aspect_set.exact_count(position.body),
            );
            dignities.insert(position.body, dignity);
            weights.insert(position.body, weight);
        }
        let final_weights: HashMap<Body, f64> =
            weights.iter().map(|(&body, w)| (body, w.final_weight)).collect();

        let graph = DispositorGraphBuilder::new(self.settings.rulership).build(&accepted, &final_weights);
        let critical_paths = PathCriticalityDetector.detect(&aspect_set, &final_weights);
        let pillar_aggregation = aggregate_pillars(
            accepted.iter().map(|p| (p.body, final_weights.get(&p.body).copied().unwrap_or(0.0))),
            self.settings.hidden_node,
        );

        let mut bodies = BTreeMap::new();
        for position in &accepted {
            let (Some(&dignity), Some(&weight)) = (dignities.get(&position.body), weights.get(&position.body))
            else {
                continue;
            };
            let node = body_node(position.body);

            let aspects = aspect_set
                .by_body
                .get(&position.body)
                .into_iter()
                .flatten()
                .filter_map(|&index| {
                    let aspect = aspect_set.aspects.get(index)?;
                    Some(AspectRef {
                        index,
                        with: aspect.other(position.body)?,
                        kind: aspect.kind,
                        orb: aspect.orb,
                        exact: aspect.exact,
                    })
                })
                .collect();

            let occupation_paths = node
                .map(|node| {
                    paths_touching(node)
                        .into_iter()
                        .filter_map(|path| {
                            Some(OccupationPath {
                                number: path.number,
                                name: path.name,
                                trump: path.trump,
                                connects_to: path.other_end(node)?,
                                attribution: path.attribution,
                            })
                        })
                        .collect()
                })
                .unwrap_or_default();

            bodies.insert(
                position.body,
                BodyReport {
                    longitude: position.longitude,
                    sign: position.sign,
                    degree: position.degree,
                    house: position.house,
                    retrograde: position.retrograde,
                    dignity,
                    weight,
                    aspects,
                    node,
                    pillar: node.map(Sephirah::pillar),
                    genius: genius_for_sign_and_degree(position.sign, position.degree),
                    occupation_paths,
                    critical_paths: critical_paths
                        .iter()
                        .filter(|c| c.involves(position.body))
                        .cloned()
                        .collect(),
                },
            );
        }

        log::debug!(
            "Report: {} bodies, {} aspects, {} critical paths, {} excluded",
            bodies.len(),
            aspect_set.len(),
            critical_paths.len(),
            excluded.len()
        );

        ChartReport {
            bodies,
            aspects: aspect_set.aspects,
            graph,
            critical_paths,
            pillar_aggregation,
            excluded,
        }
    }
}
