use thiserror::Error;

use crate::models::indicators::IndicatorKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("insufficient history for {kind}: need {required} bars, got {available}")]
    InsufficientHistory {
        kind: IndicatorKind,
        required: usize,
        available: usize,
    },
    #[error("unknown indicator: {0}")]
    UnknownIndicatorKind(String),
    #[error("invalid {kind} parameters: {reason}")]
    InvalidParameters {
        kind: IndicatorKind,
        reason: String,
    },
}
