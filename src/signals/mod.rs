//! Trading signal derivation from indicator readings.

pub mod signal_generator;

pub use signal_generator::*;
