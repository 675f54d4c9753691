//! Yahoo Finance market data provider implementation

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::DateTime;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::messages::{ChartData, ChartResponse};
use crate::config::DataSourceConfig;
use crate::models::analysis::LookbackPeriod;
use crate::models::indicators::{PriceBar, PriceSeries};
use crate::services::market_data::{MarketDataProvider, RetrievalError};

const BAR_INTERVAL: &str = "1d";

pub struct YahooMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
    max_retries: usize,
    min_retry_delay: Duration,
}

impl YahooMarketDataProvider {
    pub fn new(config: &DataSourceConfig) -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("stock-analyzer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RetrievalError::Client)?;
        Ok(Self::with_client(config.base_url.clone(), client).with_max_retries(config.max_retries))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            max_retries: 3,
            min_retry_delay: Duration::from_millis(200),
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_min_retry_delay(mut self, delay: Duration) -> Self {
        self.min_retry_delay = delay;
        self
    }

    pub fn chart_url(&self, symbol: &str, period: LookbackPeriod) -> Result<Url, RetrievalError> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            symbol
        ))?;
        url.query_pairs_mut()
            .append_pair("range", period.as_str())
            .append_pair("interval", BAR_INTERVAL);
        Ok(url)
    }

    async fn fetch_once(
        &self,
        symbol: &str,
        period: LookbackPeriod,
    ) -> Result<PriceSeries, RetrievalError> {
        let url = self.chart_url(symbol, period)?;
        debug!(symbol, %url, "requesting chart data");

        let http_error = |source: reqwest::Error| RetrievalError::Http {
            symbol: symbol.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status();
        let body = response.text().await.map_err(http_error)?;

        // Unknown symbols come back as 404 with an error payload
        let chart = match serde_json::from_str::<ChartResponse>(&body) {
            Ok(chart) => chart.chart,
            Err(_) if !status.is_success() => {
                return Err(RetrievalError::Status {
                    symbol: symbol.to_string(),
                    status: status.as_u16(),
                })
            }
            Err(source) => {
                return Err(RetrievalError::Parse {
                    symbol: symbol.to_string(),
                    source,
                })
            }
        };

        if let Some(error) = chart.error {
            return Err(RetrievalError::Api {
                code: error.code,
                description: error.description,
            });
        }
        if !status.is_success() {
            return Err(RetrievalError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let data = chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| RetrievalError::NoData(symbol.to_string()))?;
        into_series(symbol, data)
    }
}

/// Bars with a missing OHLC value are dropped; missing volume counts as zero.
fn into_series(symbol: &str, data: ChartData) -> Result<PriceSeries, RetrievalError> {
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars: Vec<PriceBar> = data
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let timestamp = DateTime::from_timestamp(ts, 0)?;
            let open = quote.open.get(i).copied().flatten()?;
            let high = quote.high.get(i).copied().flatten()?;
            let low = quote.low.get(i).copied().flatten()?;
            let close = quote.close.get(i).copied().flatten()?;
            let volume = quote.volume.get(i).copied().flatten().unwrap_or(0.0);
            Some(PriceBar::new(open, high, low, close, volume, timestamp))
        })
        .collect();

    // Keep the latest quote for a repeated timestamp
    bars.dedup_by(|next, prev| {
        if next.timestamp == prev.timestamp {
            std::mem::swap(next, prev);
            true
        } else {
            false
        }
    });

    if bars.is_empty() {
        return Err(RetrievalError::NoData(symbol.to_string()));
    }

    debug!(symbol, bars = bars.len(), "decoded chart data");
    PriceSeries::new(bars).map_err(|source| RetrievalError::InvalidSeries {
        symbol: symbol.to_string(),
        source,
    })
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch_series(
        &self,
        symbol: &str,
        period: LookbackPeriod,
    ) -> Result<PriceSeries, RetrievalError> {
        let symbol = symbol.trim().to_uppercase();
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.min_retry_delay)
            .with_max_times(self.max_retries);

        (|| async { self.fetch_once(&symbol, period).await })
            .retry(backoff)
            .when(RetrievalError::is_transient)
            .notify(|err: &RetrievalError, delay: Duration| {
                warn!(
                    symbol = %symbol,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "retrying chart request"
                );
            })
            .await
    }
}
