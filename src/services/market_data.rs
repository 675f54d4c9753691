//! Market data provider interface.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::analysis::LookbackPeriod;
use crate::models::indicators::{PriceSeries, SeriesError};

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request for {symbol} failed: {source}")]
    Http {
        symbol: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider returned HTTP {status} for {symbol}")]
    Status { symbol: String, status: u16 },
    #[error("provider error [{code}]: {description}")]
    Api { code: String, description: String },
    #[error("malformed response for {symbol}: {source}")]
    Parse {
        symbol: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no price data available for {0}")]
    NoData(String),
    #[error("invalid price series for {symbol}: {source}")]
    InvalidSeries {
        symbol: String,
        #[source]
        source: SeriesError,
    },
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl RetrievalError {
    /// Worth retrying: transport failures, throttling and server errors.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { source, .. } => !source.is_decode(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Supplies price history for one instrument. Guarantees a non-empty,
/// chronologically ordered series or an error.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_series(
        &self,
        symbol: &str,
        period: LookbackPeriod,
    ) -> Result<PriceSeries, RetrievalError>;
}

/// Serves preloaded series, keyed by upper-cased symbol. The period is ignored.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketDataProvider {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, series: PriceSeries) -> Self {
        self.insert(symbol, series);
        self
    }

    pub fn insert(&mut self, symbol: &str, series: PriceSeries) {
        self.series.insert(symbol.trim().to_uppercase(), series);
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn fetch_series(
        &self,
        symbol: &str,
        _period: LookbackPeriod,
    ) -> Result<PriceSeries, RetrievalError> {
        let key = symbol.trim().to_uppercase();
        self.series
            .get(&key)
            .cloned()
            .ok_or(RetrievalError::NoData(key))
    }
}
