//! Core application primitives (pipeline, orchestrator)

pub mod analyzer;
pub mod error;
pub mod pipeline;

pub use analyzer::*;
pub use error::AnalysisError;
pub use pipeline::*;
