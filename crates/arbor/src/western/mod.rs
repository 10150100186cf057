pub mod dignities;
pub mod rulers;
pub mod quinaries;
pub mod types;

pub use dignities::{DignityCategory, DignityClassifier, DignityRecord};
pub use rulers::{sign_ruler, sign_ruler_from_longitude, RulershipConvention};
pub use quinaries::{genius_for_sign_and_degree, genius_from_longitude, get_quinary_index, GeniusInfo};
pub use types::{Body, ParseError, Sign, SIGN_ORDER};
