//! Per-instrument comparison scores

use crate::models::analysis::{Analysis, RankingMethod};
use crate::models::indicators::MacdSignal;
use crate::signals::DEFAULT_RSI;

/// RSI contribution is capped here under [`RankingMethod::Rsi`].
pub const RSI_SCORE_CAP: f64 = 70.0;
pub const COMPOSITE_RSI_WEIGHT: f64 = 0.6;
pub const COMPOSITE_MACD_WEIGHT: f64 = 0.4;
/// Brings the MACD histogram onto a scale comparable with RSI.
pub const COMPOSITE_HISTOGRAM_SCALE: f64 = 20.0;

/// Score one analysis; higher is stronger.
pub fn score(analysis: &Analysis, method: RankingMethod) -> f64 {
    let indicators = &analysis.indicators;
    let rsi = indicators.rsi().map(|r| r.value).unwrap_or(DEFAULT_RSI);

    match method {
        RankingMethod::Rsi => rsi.min(RSI_SCORE_CAP),
        RankingMethod::Momentum => {
            let signal = indicators.macd().map(|m| m.signal);
            momentum_score(rsi, signal)
        }
        RankingMethod::Composite => {
            let histogram = indicators.macd().map(|m| m.histogram).unwrap_or(0.0);
            composite_score(rsi, histogram)
        }
    }
}

/// RSI centred on 50 plus a MACD bonus; roughly within [-75, 75].
pub fn momentum_score(rsi: f64, macd_signal: Option<MacdSignal>) -> f64 {
    (rsi - 50.0) + macd_bonus(macd_signal)
}

pub fn macd_bonus(signal: Option<MacdSignal>) -> f64 {
    match signal {
        Some(MacdSignal::Buy) => 25.0,
        Some(MacdSignal::Sell) => -25.0,
        Some(MacdSignal::Bullish) => 10.0,
        Some(MacdSignal::Bearish) => -10.0,
        None => 0.0,
    }
}

pub fn composite_score(rsi: f64, histogram: f64) -> f64 {
    COMPOSITE_RSI_WEIGHT * rsi + COMPOSITE_MACD_WEIGHT * (histogram * COMPOSITE_HISTOGRAM_SCALE)
}
