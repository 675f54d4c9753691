use crate::models::indicators::{IndicatorSet, MacdSignal, RsiZone};
use crate::models::signal::{Signal, SignalAction, SignalConfidence};

/// RSI assumed when the indicator is missing or failed.
pub const DEFAULT_RSI: f64 = 50.0;

const RSI_EXTREME_POINTS: i32 = 2;
const MACD_CROSS_POINTS: i32 = 3;
const MACD_TREND_POINTS: i32 = 1;

/// Combines RSI and MACD readings into a BUY/SELL/HOLD signal.
///
/// Never fails: missing indicators count as neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalGenerator;

impl SignalGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, current_price: f64, indicators: &IndicatorSet) -> Signal {
        let mut reasoning = Vec::new();
        let mut score = 0;

        let (rsi_value, rsi_zone) = indicators
            .rsi()
            .map(|rsi| (rsi.value, rsi.signal))
            .unwrap_or((DEFAULT_RSI, RsiZone::Neutral));

        match self.analyze_rsi(rsi_zone) {
            RsiAnalysis::Oversold(points) => {
                score += points;
                reasoning.push(format!("RSI {:.1} - oversold, potential rebound", rsi_value));
            }
            RsiAnalysis::Overbought(points) => {
                score -= points;
                reasoning.push(format!("RSI {:.1} - overbought, potential pullback", rsi_value));
            }
            RsiAnalysis::Neutral => {
                reasoning.push(format!("RSI {:.1} - neutral", rsi_value));
            }
        }

        match self.analyze_macd(indicators.macd().map(|macd| macd.signal)) {
            MacdAnalysis::Bullish(points, reason) => {
                score += points;
                reasoning.push(reason.to_string());
            }
            MacdAnalysis::Bearish(points, reason) => {
                score -= points;
                reasoning.push(reason.to_string());
            }
            MacdAnalysis::Neutral => {}
        }

        let (action, confidence) = decide(score);

        Signal {
            action,
            confidence,
            score,
            reasoning,
            price: current_price,
        }
    }

    fn analyze_rsi(&self, zone: RsiZone) -> RsiAnalysis {
        match zone {
            RsiZone::Oversold => RsiAnalysis::Oversold(RSI_EXTREME_POINTS),
            RsiZone::Overbought => RsiAnalysis::Overbought(RSI_EXTREME_POINTS),
            RsiZone::Neutral => RsiAnalysis::Neutral,
        }
    }

    fn analyze_macd(&self, signal: Option<MacdSignal>) -> MacdAnalysis {
        match signal {
            Some(MacdSignal::Buy) => {
                MacdAnalysis::Bullish(MACD_CROSS_POINTS, "MACD bullish crossover")
            }
            Some(MacdSignal::Sell) => {
                MacdAnalysis::Bearish(MACD_CROSS_POINTS, "MACD bearish crossover")
            }
            Some(MacdSignal::Bullish) => {
                MacdAnalysis::Bullish(MACD_TREND_POINTS, "MACD bullish alignment")
            }
            Some(MacdSignal::Bearish) => {
                MacdAnalysis::Bearish(MACD_TREND_POINTS, "MACD bearish alignment")
            }
            None => MacdAnalysis::Neutral,
        }
    }
}

/// First matching band wins.
pub fn decide(score: i32) -> (SignalAction, SignalConfidence) {
    if score >= 3 {
        (SignalAction::Buy, SignalConfidence::High)
    } else if score >= 1 {
        (SignalAction::Buy, SignalConfidence::Moderate)
    } else if score <= -3 {
        (SignalAction::Sell, SignalConfidence::High)
    } else if score <= -1 {
        (SignalAction::Sell, SignalConfidence::Moderate)
    } else {
        (SignalAction::Hold, SignalConfidence::Low)
    }
}

enum RsiAnalysis {
    Oversold(i32),
    Overbought(i32),
    Neutral,
}

enum MacdAnalysis {
    Bullish(i32, &'static str),
    Bearish(i32, &'static str),
    Neutral,
}
