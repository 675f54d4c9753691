//! Orchestrates retrieval, analysis and ranking across instruments.

use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AnalyzerConfig;
use crate::core::error::AnalysisError;
use crate::core::pipeline::analyze_series;
use crate::indicators::{requests_for, IndicatorRequest};
use crate::models::analysis::{
    AlertStatus, Analysis, BasketResult, InstrumentFailure, LookbackPeriod, RankingMethod,
    StandingAlert,
};
use crate::ranking::RankingEngine;
use crate::services::market_data::MarketDataProvider;

pub struct StockAnalyzer {
    provider: Arc<dyn MarketDataProvider>,
    config: AnalyzerConfig,
}

impl StockAnalyzer {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: AnalyzerConfig) -> Self {
        info!(
            data_source = %config.data_source.name,
            max_concurrency = config.analysis.max_concurrency,
            "StockAnalyzer initialized"
        );
        Self { provider, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one instrument. Only a retrieval failure is an error.
    pub async fn analyze(
        &self,
        symbol: &str,
        requests: &[IndicatorRequest],
        period: LookbackPeriod,
    ) -> Result<Analysis, AnalysisError> {
        let ticker = symbol.trim().to_uppercase();
        info!(ticker = %ticker, period = %period, indicators = requests.len(), "analyzing");

        let series = self
            .provider
            .fetch_series(&ticker, period)
            .await
            .map_err(|source| AnalysisError::Retrieval {
                symbol: ticker.clone(),
                source,
            })?;

        let analysis = analyze_series(&ticker, &series, requests, period, &self.config.indicators);
        info!(
            ticker = %analysis.ticker,
            bars = series.len(),
            action = %analysis.signal.action,
            confidence = %analysis.signal.confidence,
            "analysis complete"
        );
        Ok(analysis)
    }

    /// Analyze with the configured default indicators and period.
    pub async fn analyze_default(&self, symbol: &str) -> Result<Analysis, AnalysisError> {
        let requests = requests_for(&self.config.analysis.indicators);
        self.analyze(symbol, &requests, self.config.analysis.analyze_period)
            .await
    }

    /// Rank a basket. Instruments whose history cannot be retrieved are
    /// listed in `failures` and the rest of the basket is still ranked.
    pub async fn compare<S: AsRef<str>>(
        &self,
        symbols: &[S],
        method: RankingMethod,
        requests: &[IndicatorRequest],
    ) -> BasketResult {
        let period = self.config.analysis.compare_period;
        let concurrency = self.config.analysis.max_concurrency.max(1);
        info!(
            count = symbols.len(),
            method = %method,
            period = %period,
            concurrency,
            "comparing basket"
        );

        // `buffered` yields in input order, which the stable ranking relies on
        let outcomes: Vec<(String, Result<Analysis, AnalysisError>)> = stream::iter(
            symbols.iter().map(|s| s.as_ref().trim().to_uppercase()),
        )
        .map(move |ticker| async move {
            let result = self.analyze(&ticker, requests, period).await;
            (ticker, result)
        })
        .buffered(concurrency)
        .collect()
        .await;

        let mut analyses = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for (ticker, result) in outcomes {
            match result {
                Ok(analysis) => analyses.push(analysis),
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "skipping instrument");
                    failures.push(InstrumentFailure {
                        ticker,
                        error: e.to_string(),
                    });
                }
            }
        }

        let engine = RankingEngine::new(method);
        let ranked_stocks = engine.rank(analyses);
        for entry in &ranked_stocks {
            info!(rank = entry.rank, ticker = %entry.ticker, score = entry.score, "ranked");
        }
        info!(
            ranked = ranked_stocks.len(),
            failed = failures.len(),
            "comparison complete"
        );

        BasketResult {
            ranked_stocks,
            failures,
            ranking_method: engine.method(),
            total_analyzed: symbols.len(),
            timestamp: Utc::now(),
        }
    }

    /// Record a standing alert. The condition is not evaluated.
    pub fn monitor(&self, symbol: &str, condition: &str, action: &str) -> StandingAlert {
        let alert = StandingAlert {
            ticker: symbol.trim().to_uppercase(),
            condition: condition.to_string(),
            action: action.to_string(),
            status: AlertStatus::Active,
            created: Utc::now(),
        };
        info!(
            ticker = %alert.ticker,
            condition = %alert.condition,
            action = %alert.action,
            "monitor registered"
        );
        alert
    }
}
