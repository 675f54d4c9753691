//! Unit tests for the analysis orchestrator

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use stock_analyzer::config::AnalyzerConfig;
use stock_analyzer::core::{analyze_series, AnalysisError, StockAnalyzer};
use stock_analyzer::indicators::{parse_indicator_requests, requests_for};
use stock_analyzer::models::analysis::{AlertStatus, LookbackPeriod, RankingMethod};
use stock_analyzer::models::indicators::{IndicatorKind, PriceBar, PriceSeries};
use stock_analyzer::services::market_data::{InMemoryMarketDataProvider, RetrievalError};

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PriceBar::new(
                close,
                close + 0.5,
                close - 0.5,
                close,
                1000.0,
                start + Duration::days(i as i64),
            )
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

fn uptrend(count: usize) -> PriceSeries {
    let closes: Vec<f64> = (0..count).map(|i| 100.0 + i as f64).collect();
    series_from_closes(&closes)
}

fn downtrend(count: usize) -> PriceSeries {
    let closes: Vec<f64> = (0..count).map(|i| 200.0 - i as f64).collect();
    series_from_closes(&closes)
}

fn create_analyzer(provider: InMemoryMarketDataProvider) -> StockAnalyzer {
    StockAnalyzer::new(Arc::new(provider), AnalyzerConfig::default())
}

#[tokio::test]
async fn test_analyze_default_indicators() {
    let provider = InMemoryMarketDataProvider::new().with_series("AAPL", uptrend(60));
    let analyzer = create_analyzer(provider);

    let analysis = analyzer.analyze_default("aapl").await.unwrap();

    assert_eq!(analysis.ticker, "AAPL");
    assert_eq!(analysis.current_price, 159.0);
    assert_eq!(analysis.period, LookbackPeriod::OneYear);
    assert_eq!(analysis.indicators.len(), 2);
    assert_eq!(analysis.indicators.rsi().unwrap().value, 100.0);
    assert!(analysis.indicators.macd().is_some());
    assert!(analysis.indicators.bollinger().is_none());
    // Overbought (-2) against a bullish MACD (+1)
    assert_eq!(analysis.signal.score, -1);
    assert_eq!(analysis.signal.price, 159.0);
}

#[tokio::test]
async fn test_unknown_indicator_gets_error_slot() {
    let provider = InMemoryMarketDataProvider::new().with_series("MSFT", uptrend(40));
    let analyzer = create_analyzer(provider);
    let requests = parse_indicator_requests(&["RSI", "Fibonacci", "bollinger"]);

    let analysis = analyzer
        .analyze("MSFT", &requests, LookbackPeriod::SixMonths)
        .await
        .unwrap();

    assert_eq!(analysis.indicators.len(), 3);
    assert!(analysis.indicators.rsi().is_some());
    assert!(analysis.indicators.bollinger().is_some());
    let unknown = analysis.indicators.get("Fibonacci").unwrap();
    assert!(unknown.is_failed());
}

#[tokio::test]
async fn test_short_history_fails_indicator_not_analysis() {
    let series = series_from_closes(&[10.0, 10.5, 10.2, 10.8, 11.0]);
    let analyzer = create_analyzer(InMemoryMarketDataProvider::new().with_series("TINY", series));

    let analysis = analyzer.analyze_default("TINY").await.unwrap();

    assert!(analysis.indicators.get("RSI").unwrap().is_failed());
    assert!(analysis.indicators.macd().is_some());
}

#[tokio::test]
async fn test_analyze_unknown_symbol_is_retrieval_error() {
    let analyzer = create_analyzer(InMemoryMarketDataProvider::new());

    let err = analyzer.analyze_default("ZZZZ").await.unwrap_err();

    let AnalysisError::Retrieval { symbol, source } = err;
    assert_eq!(symbol, "ZZZZ");
    assert!(matches!(source, RetrievalError::NoData(_)));
}

#[tokio::test]
async fn test_compare_isolates_failed_instruments() {
    let provider = InMemoryMarketDataProvider::new()
        .with_series("UP", uptrend(60))
        .with_series("DOWN", downtrend(60));
    let analyzer = create_analyzer(provider);
    let requests = requests_for(&[IndicatorKind::Rsi, IndicatorKind::Macd]);

    let result = analyzer
        .compare(&["DOWN", "MISSING", "UP"], RankingMethod::Momentum, &requests)
        .await;

    assert_eq!(result.total_analyzed, 3);
    assert_eq!(result.ranking_method, RankingMethod::Momentum);
    assert_eq!(result.ranked_stocks.len(), 2);
    assert_eq!(result.ranked_stocks[0].ticker, "UP");
    assert_eq!(result.ranked_stocks[0].rank, 1);
    assert_eq!(result.ranked_stocks[1].ticker, "DOWN");
    assert_eq!(result.ranked_stocks[1].rank, 2);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].ticker, "MISSING");
    assert!(result.ranked_stocks[0].analysis.period == LookbackPeriod::SixMonths);
}

#[tokio::test]
async fn test_compare_ties_follow_input_order() {
    let provider = InMemoryMarketDataProvider::new()
        .with_series("AAA", uptrend(30))
        .with_series("BBB", uptrend(30))
        .with_series("CCC", uptrend(30));
    let analyzer = create_analyzer(provider);
    let requests = requests_for(&[IndicatorKind::Rsi, IndicatorKind::Macd]);

    let result = analyzer
        .compare(&["ccc", "aaa", "bbb"], RankingMethod::Composite, &requests)
        .await;

    let tickers: Vec<&str> = result.ranked_stocks.iter().map(|e| e.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["CCC", "AAA", "BBB"]);
}

#[tokio::test]
async fn test_compare_empty_basket() {
    let analyzer = create_analyzer(InMemoryMarketDataProvider::new());
    let symbols: [&str; 0] = [];

    let result = analyzer.compare(&symbols, RankingMethod::Rsi, &[]).await;

    assert!(result.ranked_stocks.is_empty());
    assert!(result.failures.is_empty());
    assert_eq!(result.total_analyzed, 0);
}

#[test]
fn test_monitor_registers_active_alert() {
    let analyzer = create_analyzer(InMemoryMarketDataProvider::new());

    let alert = analyzer.monitor("tsla", "RSI < 30", "notify");

    assert_eq!(alert.ticker, "TSLA");
    assert_eq!(alert.condition, "RSI < 30");
    assert_eq!(alert.action, "notify");
    assert_eq!(alert.status, AlertStatus::Active);
}

#[test]
fn test_analyze_series_is_deterministic() {
    let closes: Vec<f64> = (0..50).map(|i| 75.0 + (i as f64 * 0.5).sin() * 4.0).collect();
    let series = series_from_closes(&closes);
    let requests = requests_for(&IndicatorKind::ALL);
    let config = AnalyzerConfig::default().indicators;

    let first = analyze_series("ko", &series, &requests, LookbackPeriod::OneYear, &config);
    let second = analyze_series("KO", &series, &requests, LookbackPeriod::OneYear, &config);

    assert_eq!(first.ticker, "KO");
    assert_eq!(first.indicators, second.indicators);
    assert_eq!(first.signal, second.signal);
    assert_eq!(first.current_price, series.last_close());
}
