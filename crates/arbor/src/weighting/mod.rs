pub mod calculator;

pub use calculator::{HouseClass, Weight, WeightCalculator, MAX_FINAL_WEIGHT};
