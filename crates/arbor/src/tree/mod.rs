pub mod critical;
pub mod nodes;
pub mod paths;
pub mod pillars;

pub use critical::{CriticalPath, PathCriticalityDetector, Urgency};
pub use nodes::{body_node, HiddenNodePolicy, Pillar, Sephirah};
pub use paths::{path_between, path_by_number, paths_touching, SymbolicPath, PATHS};
pub use pillars::{aggregate_pillars, Balance, PillarAggregation, PillarDiagnosis, PillarShare};
