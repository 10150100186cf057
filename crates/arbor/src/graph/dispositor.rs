use crate::ephemeris::types::BodyPosition;
use crate::western::{sign_ruler, Body, RulershipConvention};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inbound-per-weight ratio above which a convergence is critical.
pub const CRITICAL_PRESSURE: f64 = 5.0;
/// Inbound-per-weight ratio above which a convergence is high.
pub const HIGH_PRESSURE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PressureLevel {
    Critical,
    High,
    Medium,
}

impl PressureLevel {
    pub fn from_pressure(pressure: f64) -> PressureLevel {
        if pressure > CRITICAL_PRESSURE {
            PressureLevel::Critical
        } else if pressure > HIGH_PRESSURE {
            PressureLevel::High
        } else {
            PressureLevel::Medium
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub body: Body,
    /// Ruler of this body's sign, unless the body rules itself or the ruler is absent.
    pub outgoing: Option<Body>,
    pub incoming: Vec<Body>,
    pub retrograde: bool,
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispositorEdge {
    pub from: Body,
    pub to: Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Convergence {
    pub body: Body,
    pub inbound: usize,
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub pressure: f64,
    pub level: PressureLevel,
}

/// A body whose sign ruler is not part of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedRuler {
    pub body: Body,
    pub ruler: Body,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispositorGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<DispositorEdge>,
    pub motors: Vec<Body>,
    pub convergences: Vec<Convergence>,
    pub valves: Vec<Body>,
    pub cycles: Vec<Vec<Body>>,
    pub unresolved: Vec<UnresolvedRuler>,
}

impl DispositorGraph {
    pub fn node(&self, body: Body) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.body == body)
    }

    pub fn in_degree(&self, body: Body) -> usize {
        self.node(body).map_or(0, |n| n.incoming.len())
    }

    pub fn out_degree(&self, body: Body) -> usize {
        self.node(body).map_or(0, |n| usize::from(n.outgoing.is_some()))
    }

    pub fn is_motor(&self, body: Body) -> bool {
        self.motors.contains(&body)
    }
}

/// Builds the directed ruler-reference graph over a snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispositorGraphBuilder {
    pub convention: RulershipConvention,
}

impl DispositorGraphBuilder {
    pub fn new(convention: RulershipConvention) -> Self {
        Self { convention }
    }

    /// Build and classify the graph. `weights` feeds convergence pressure;
    /// bodies without an entry count as weight 1.0.
    pub fn build(&self, positions: &[BodyPosition], weights: &HashMap<Body, f64>) -> DispositorGraph {
        let mut graph = DispositorGraph::default();
        let mut index: HashMap<Body, usize> = HashMap::new();
        let mut signs = Vec::new();

        for position in positions {
            if index.contains_key(&position.body) {
                log::debug!("Ignoring repeated {} in dispositor graph", position.body);
                continue;
            }
            index.insert(position.body, graph.nodes.len());
            signs.push(position.sign);
            graph.nodes.push(GraphNode {
                body: position.body,
                outgoing: None,
                incoming: Vec::new(),
                retrograde: position.retrograde,
                weight: weights
                    .get(&position.body)
                    .copied()
                    .filter(|w| *w > 0.0)
                    .unwrap_or(1.0),
            });
        }

        // Edges
        let mut next: Vec<Option<usize>> = vec![None; graph.nodes.len()];
        for (from, sign) in signs.into_iter().enumerate() {
            let body = graph.nodes[from].body;
            let ruler = sign_ruler(sign, self.convention);
            if ruler == body {
                graph.motors.push(body);
                continue;
            }

            match index.get(&ruler) {
                Some(&to) => {
                    graph.nodes[from].outgoing = Some(ruler);
                    graph.nodes[to].incoming.push(body);
                    graph.edges.push(DispositorEdge { from: body, to: ruler });
                    next[from] = Some(to);
                }
                None => graph.unresolved.push(UnresolvedRuler { body, ruler }),
            }
        }

        for node in &graph.nodes {
            if node.retrograde {
                graph.valves.push(node.body);
            }
            let inbound = node.incoming.len();
            if inbound > 1 {
                let pressure = inbound as f64 / node.weight;
                graph.convergences.push(Convergence {
                    body: node.body,
                    inbound,
                    pressure,
                    level: PressureLevel::from_pressure(pressure),
                });
            }
        }

        graph.cycles = find_cycles(&graph.nodes, &next);

        log::debug!(
            "Dispositor graph: {} edges, {} motors, {} convergences, {} cycles, {} unresolved",
            graph.edges.len(),
            graph.motors.len(),
            graph.convergences.len(),
            graph.cycles.len(),
            graph.unresolved.len()
        );
        graph
    }
}

/// Walk outgoing edges from every node not yet seen. Each node belongs to the
/// first traversal that reaches it, so every loop is closed exactly once.
fn find_cycles(nodes: &[GraphNode], next: &[Option<usize>]) -> Vec<Vec<Body>> {
    let mut owner: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut cycles = Vec::new();

    for start in 0..nodes.len() {
        if owner[start].is_some() {
            continue;
        }

        let mut path: Vec<usize> = Vec::new();
        let mut current = Some(start);
        while let Some(i) = current {
            match owner[i] {
                Some(traversal) if traversal == start => {
                    if let Some(pos) = path.iter().position(|&p| p == i) {
                        let mut cycle: Vec<Body> = path[pos..].iter().map(|&p| nodes[p].body).collect();
                        cycle.push(nodes[i].body);
                        cycles.push(cycle);
                    }
                    break;
                }
                Some(_) => break,
                None => {
                    owner[i] = Some(start);
                    path.push(i);
                    current = next[i];
                }
            }
        }
    }

    cycles
}
