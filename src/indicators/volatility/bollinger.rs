//! Bollinger Bands indicator

use crate::common::math;
use crate::config::BollingerConfig;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::{BandPosition, BollingerBandsIndicator, IndicatorKind, PriceBar};

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * sample standard deviation)
/// Lower Band = Middle - (std_dev * sample standard deviation)
pub fn calculate_bollinger_bands(
    bars: &[PriceBar],
    config: &BollingerConfig,
) -> Result<BollingerBandsIndicator, IndicatorError> {
    if config.period < 2 {
        return Err(IndicatorError::InvalidParameters {
            kind: IndicatorKind::Bollinger,
            reason: format!("period must be at least 2, got {}", config.period),
        });
    }
    if !(config.std_dev >= 0.0) {
        return Err(IndicatorError::InvalidParameters {
            kind: IndicatorKind::Bollinger,
            reason: format!("std dev multiplier must be non-negative, got {}", config.std_dev),
        });
    }

    let period = config.period as usize;
    let insufficient = || IndicatorError::InsufficientHistory {
        kind: IndicatorKind::Bollinger,
        required: period,
        available: bars.len(),
    };

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let middle = math::sma(&closes, period).ok_or_else(insufficient)?;
    let std = math::sample_standard_deviation(&closes, period).ok_or_else(insufficient)?;

    let upper = middle + (config.std_dev * std);
    let lower = middle - (config.std_dev * std);
    let current_price = closes.last().copied().unwrap_or(middle);
    let position = band_position(current_price, upper, lower);

    Ok(BollingerBandsIndicator {
        upper_band: upper,
        middle_band: middle,
        lower_band: lower,
        current_price,
        position,
        interpretation: interpret_position(position).to_string(),
        period: config.period,
        std_dev: config.std_dev,
    })
}

/// Touching a band counts as being at it.
pub fn band_position(price: f64, upper: f64, lower: f64) -> BandPosition {
    if price >= upper {
        BandPosition::Upper
    } else if price <= lower {
        BandPosition::Lower
    } else {
        BandPosition::Middle
    }
}

fn interpret_position(position: BandPosition) -> &'static str {
    match position {
        BandPosition::Upper => "Price touching upper band - possibly overbought",
        BandPosition::Lower => "Price touching lower band - possibly oversold",
        BandPosition::Middle => "Price inside the bands - normal volatility",
    }
}
