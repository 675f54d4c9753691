//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::config::MacdConfig;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::{IndicatorKind, MacdIndicator, MacdSignal, PriceBar};

/// Two bars: the classification compares the last histogram to the one before it.
pub const MACD_MIN_BARS: usize = 2;

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Every EMA is seeded with the first bar, so all bars contribute.
pub fn calculate_macd(
    bars: &[PriceBar],
    config: &MacdConfig,
) -> Result<MacdIndicator, IndicatorError> {
    if config.fast_period == 0 || config.slow_period == 0 || config.signal_period == 0 {
        return Err(IndicatorError::InvalidParameters {
            kind: IndicatorKind::Macd,
            reason: "periods must be greater than zero".to_string(),
        });
    }
    if bars.len() < MACD_MIN_BARS {
        return Err(IndicatorError::InsufficientHistory {
            kind: IndicatorKind::Macd,
            required: MACD_MIN_BARS,
            available: bars.len(),
        });
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let fast_ema = math::ema_series(&closes, config.fast_period as usize);
    let slow_ema = math::ema_series(&closes, config.slow_period as usize);

    let macd_values: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal_values = math::ema_series(&macd_values, config.signal_period as usize);
    let histogram: Vec<f64> = macd_values
        .iter()
        .zip(&signal_values)
        .map(|(macd, signal)| macd - signal)
        .collect();

    let last = histogram.len() - 1;
    let signal = classify_histogram(histogram[last - 1], histogram[last]);

    Ok(MacdIndicator {
        macd_line: macd_values[last],
        signal_line: signal_values[last],
        histogram: histogram[last],
        signal,
        interpretation: interpret_macd(signal).to_string(),
        period: (config.fast_period, config.slow_period, config.signal_period),
    })
}

/// Sign change of the histogram between the previous and the current bar.
pub fn classify_histogram(previous: f64, current: f64) -> MacdSignal {
    if current > 0.0 && previous <= 0.0 {
        MacdSignal::Buy
    } else if current < 0.0 && previous >= 0.0 {
        MacdSignal::Sell
    } else if current > 0.0 {
        MacdSignal::Bullish
    } else {
        MacdSignal::Bearish
    }
}

fn interpret_macd(signal: MacdSignal) -> &'static str {
    match signal {
        MacdSignal::Buy => "MACD golden cross - bullish signal",
        MacdSignal::Sell => "MACD death cross - bearish signal",
        MacdSignal::Bullish => "MACD above signal line - uptrend",
        MacdSignal::Bearish => "MACD below signal line - downtrend",
    }
}
