pub mod finder;

pub use finder::{
    approximate_return, search_center, wrapped_difference, ReturnError, ReturnMode, SolarReturn,
    SolarReturnFinder,
};
