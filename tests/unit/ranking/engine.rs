//! Unit tests for basket ranking

use chrono::Utc;
use stock_analyzer::models::analysis::{Analysis, LookbackPeriod, RankingMethod};
use stock_analyzer::models::indicators::{
    IndicatorResult, IndicatorSet, MacdIndicator, MacdSignal, RsiIndicator, RsiZone,
};
use stock_analyzer::ranking::scoring::{composite_score, momentum_score};
use stock_analyzer::ranking::{rerank, score, RankingEngine};
use stock_analyzer::signals::SignalGenerator;

fn create_analysis(ticker: &str, rsi: Option<f64>, macd: Option<(MacdSignal, f64)>) -> Analysis {
    let mut indicators = IndicatorSet::new();
    if let Some(value) = rsi {
        indicators = indicators.with_result(IndicatorResult::Rsi(RsiIndicator {
            value,
            signal: RsiZone::Neutral,
            interpretation: String::new(),
            period: 14,
        }));
    }
    if let Some((signal, histogram)) = macd {
        indicators = indicators.with_result(IndicatorResult::Macd(MacdIndicator {
            macd_line: histogram,
            signal_line: 0.0,
            histogram,
            signal,
            interpretation: String::new(),
            period: (12, 26, 9),
        }));
    }
    let signal = SignalGenerator::new().generate(100.0, &indicators);
    Analysis {
        ticker: ticker.to_string(),
        current_price: 100.0,
        indicators,
        signal,
        period: LookbackPeriod::SixMonths,
        timestamp: Utc::now(),
    }
}

#[test]
fn test_momentum_ranking_example() {
    let a = create_analysis("A", Some(80.0), Some((MacdSignal::Sell, -0.2)));
    let b = create_analysis("B", Some(55.0), Some((MacdSignal::Buy, 0.3)));

    let ranked = RankingEngine::new(RankingMethod::Momentum).rank(vec![a, b]);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].ticker, "B");
    assert_eq!(ranked[0].score, 30.0);
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[1].ticker, "A");
    assert_eq!(ranked[1].score, 5.0);
    assert_eq!(ranked[1].rank, 2);
}

#[test]
fn test_ranks_are_contiguous_and_descending() {
    let analyses = vec![
        create_analysis("LOW", Some(30.0), None),
        create_analysis("HIGH", Some(60.0), Some((MacdSignal::Buy, 0.5))),
        create_analysis("MID", Some(52.0), Some((MacdSignal::Bullish, 0.1))),
    ];

    let ranked = RankingEngine::default().rank(analyses);

    let tickers: Vec<&str> = ranked.iter().map(|e| e.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["HIGH", "MID", "LOW"]);
    let ranks: Vec<usize> = ranked.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn test_ties_keep_input_order() {
    let analyses = vec![
        create_analysis("X", Some(50.0), None),
        create_analysis("Y", Some(50.0), None),
        create_analysis("Z", Some(50.0), None),
    ];

    let ranked = RankingEngine::new(RankingMethod::Rsi).rank(analyses);

    let tickers: Vec<&str> = ranked.iter().map(|e| e.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["X", "Y", "Z"]);
}

#[test]
fn test_rsi_method_caps_score() {
    let hot = create_analysis("HOT", Some(85.0), None);
    let warm = create_analysis("WARM", Some(65.0), None);

    assert_eq!(score(&hot, RankingMethod::Rsi), 70.0);
    assert_eq!(score(&warm, RankingMethod::Rsi), 65.0);
}

#[test]
fn test_composite_score() {
    let analysis = create_analysis("C", Some(60.0), Some((MacdSignal::Bullish, 0.5)));
    let value = score(&analysis, RankingMethod::Composite);
    assert!((value - 40.0).abs() < 1e-9);
    assert!((composite_score(50.0, 0.0) - 30.0).abs() < 1e-9);
}

#[test]
fn test_missing_indicators_score_as_neutral() {
    let analysis = create_analysis("N", None, None);
    assert_eq!(score(&analysis, RankingMethod::Rsi), 50.0);
    assert_eq!(score(&analysis, RankingMethod::Momentum), 0.0);
    assert!((score(&analysis, RankingMethod::Composite) - 30.0).abs() < 1e-9);
}

#[test]
fn test_momentum_score_monotonic_in_rsi() {
    for signal in [
        None,
        Some(MacdSignal::Buy),
        Some(MacdSignal::Sell),
        Some(MacdSignal::Bullish),
        Some(MacdSignal::Bearish),
    ] {
        let mut previous = f64::NEG_INFINITY;
        for rsi in (0..=100).map(f64::from) {
            let current = momentum_score(rsi, signal);
            assert!(current > previous);
            previous = current;
        }
    }
}

#[test]
fn test_rerank_reassigns_ranks_without_rescoring() {
    let mut ranked = RankingEngine::new(RankingMethod::Momentum).rank(vec![
        create_analysis("A", Some(60.0), None),
        create_analysis("B", Some(40.0), None),
    ]);
    ranked[1].score = 99.0;

    rerank(&mut ranked);

    assert_eq!(ranked[0].ticker, "B");
    assert_eq!(ranked[0].score, 99.0);
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[1].rank, 2);
}

#[test]
fn test_rank_empty_basket() {
    assert!(RankingEngine::default().rank(Vec::new()).is_empty());
}

#[test]
fn test_engine_reports_method() {
    assert_eq!(RankingEngine::default().method(), RankingMethod::Momentum);
    assert_eq!(
        RankingEngine::new(RankingMethod::Composite).method(),
        RankingMethod::Composite
    );
}
