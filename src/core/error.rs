use thiserror::Error;

use crate::services::market_data::RetrievalError;

/// Failure of one instrument's analysis. Indicator problems never end up
/// here; they are recorded in the indicator's own slot.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to retrieve price history for {symbol}: {source}")]
    Retrieval {
        symbol: String,
        #[source]
        source: RetrievalError,
    },
}
