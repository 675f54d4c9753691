//! Unit tests for the indicator engine

use chrono::{Duration, TimeZone, Utc};
use stock_analyzer::config::IndicatorConfig;
use stock_analyzer::indicators::{compute, minimum_lookback, IndicatorError};
use stock_analyzer::models::indicators::{IndicatorKind, IndicatorResult, PriceBar, PriceSeries};

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

#[test]
fn test_minimum_lookback_defaults() {
    let config = IndicatorConfig::default();
    assert_eq!(minimum_lookback(IndicatorKind::Rsi, &config), 15);
    assert_eq!(minimum_lookback(IndicatorKind::Macd, &config), 2);
    assert_eq!(minimum_lookback(IndicatorKind::Bollinger, &config), 20);
}

#[test]
fn test_compute_dispatches_by_kind() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 0.5).collect();
    let series = series_from_closes(&closes);
    let config = IndicatorConfig::default();

    for kind in IndicatorKind::ALL {
        let result = compute(kind, &series, &config).unwrap();
        assert_eq!(result.kind(), kind);
    }
    assert!(matches!(
        compute(IndicatorKind::Rsi, &series, &config),
        Ok(IndicatorResult::Rsi(_))
    ));
}

#[test]
fn test_compute_short_series_fails_only_long_indicators() {
    let series = series_from_closes(&[10.0, 11.0, 12.0, 11.5, 12.5]);
    let config = IndicatorConfig::default();

    assert_eq!(
        compute(IndicatorKind::Rsi, &series, &config),
        Err(IndicatorError::InsufficientHistory {
            kind: IndicatorKind::Rsi,
            required: 15,
            available: 5,
        })
    );
    assert!(compute(IndicatorKind::Macd, &series, &config).is_ok());
    assert!(compute(IndicatorKind::Bollinger, &series, &config).is_err());
}

#[test]
fn test_compute_does_not_modify_series() {
    let closes: Vec<f64> = (0..30).map(|i| 50.0 + (i as f64).sqrt()).collect();
    let series = series_from_closes(&closes);
    let before = series.clone();
    let config = IndicatorConfig::default();

    let first = compute(IndicatorKind::Macd, &series, &config).unwrap();
    let second = compute(IndicatorKind::Macd, &series, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(series, before);
}
