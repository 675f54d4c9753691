//! RSI (Relative Strength Index) indicator

use crate::config::RsiConfig;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::{IndicatorKind, PriceBar, RsiIndicator, RsiZone};

/// RSI reported when the window has neither gains nor losses.
pub const FLAT_RSI: f64 = 50.0;

/// Calculate RSI over the trailing `period` price deltas.
///
/// Averages are plain arithmetic means of the window (not Wilder smoothing).
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
pub fn calculate_rsi(
    bars: &[PriceBar],
    config: &RsiConfig,
) -> Result<RsiIndicator, IndicatorError> {
    if config.period == 0 {
        return Err(IndicatorError::InvalidParameters {
            kind: IndicatorKind::Rsi,
            reason: "period must be greater than zero".to_string(),
        });
    }

    let period = config.period as usize;
    let required = period + 1;
    if bars.len() < required {
        return Err(IndicatorError::InsufficientHistory {
            kind: IndicatorKind::Rsi,
            required,
            available: bars.len(),
        });
    }

    let window = &bars[bars.len() - required..];
    let (gain_sum, loss_sum) = window
        .windows(2)
        .map(|pair| pair[1].close - pair[0].close)
        .fold((0.0_f64, 0.0_f64), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses - change)
            }
        });

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;
    let value = rsi_from_averages(avg_gain, avg_loss);
    let signal = classify_rsi(value, config);

    Ok(RsiIndicator {
        value,
        signal,
        interpretation: interpret_rsi(value, signal),
        period: config.period,
    })
}

/// RS is undefined when there are no losses: saturate to 100, or to
/// [`FLAT_RSI`] when there are no gains either.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { FLAT_RSI } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

pub fn classify_rsi(value: f64, config: &RsiConfig) -> RsiZone {
    if value < config.oversold {
        RsiZone::Oversold
    } else if value > config.overbought {
        RsiZone::Overbought
    } else {
        RsiZone::Neutral
    }
}

fn interpret_rsi(value: f64, zone: RsiZone) -> String {
    match zone {
        RsiZone::Oversold => format!("RSI at {:.1} - oversold, possible rebound", value),
        RsiZone::Overbought => format!("RSI at {:.1} - overbought, possible pullback", value),
        RsiZone::Neutral => format!("RSI at {:.1} - neutral zone", value),
    }
}
