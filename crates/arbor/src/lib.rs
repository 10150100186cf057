pub mod aspects;
pub mod ephemeris;
pub mod graph;
pub mod report;
pub mod returns;
pub mod rounding;
pub mod settings;
pub mod store;
pub mod transits;
pub mod tree;
pub mod weighting;
pub mod western;

pub use ephemeris::{BodyPosition, GeoLocation, PositionOracle, SwissEphemerisAdapter};
pub use report::{BodyReport, ChartEngine, ChartReport};
pub use returns::{approximate_return, ReturnError, ReturnMode, SolarReturn, SolarReturnFinder};
pub use settings::{EngineSettings, SettingsError};
pub use store::{ReportId, ReportStore};
pub use transits::{detect_transits, Transit};
pub use western::{Body, Sign};
