//! Cross-instrument ranking by technical strength.

pub mod engine;
pub mod scoring;

pub use engine::{rerank, RankingEngine};
pub use scoring::score;
