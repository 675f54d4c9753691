pub mod engine;
pub mod error;
pub mod parser;

pub mod momentum;
pub mod volatility;

pub use engine::{compute, minimum_lookback};
pub use error::IndicatorError;
pub use parser::*;
