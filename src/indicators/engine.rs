//! Single entry point over the closed set of indicator kinds.

use tracing::debug;

use crate::config::IndicatorConfig;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{calculate_macd, calculate_rsi, MACD_MIN_BARS};
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::models::indicators::{IndicatorKind, IndicatorResult, PriceSeries};

/// Bars needed before `kind` can be computed with `config`.
pub fn minimum_lookback(kind: IndicatorKind, config: &IndicatorConfig) -> usize {
    match kind {
        IndicatorKind::Rsi => config.rsi.period as usize + 1,
        IndicatorKind::Macd => MACD_MIN_BARS,
        IndicatorKind::Bollinger => config.bollinger.period as usize,
    }
}

/// Compute one indicator over the series tail. Pure: the series is only read.
pub fn compute(
    kind: IndicatorKind,
    series: &PriceSeries,
    config: &IndicatorConfig,
) -> Result<IndicatorResult, IndicatorError> {
    let required = minimum_lookback(kind, config);
    if series.len() < required {
        debug!(
            indicator = %kind,
            required,
            available = series.len(),
            "skipping indicator: insufficient history"
        );
        return Err(IndicatorError::InsufficientHistory {
            kind,
            required,
            available: series.len(),
        });
    }

    let bars = series.bars();
    let result = match kind {
        IndicatorKind::Rsi => IndicatorResult::Rsi(calculate_rsi(bars, &config.rsi)?),
        IndicatorKind::Macd => IndicatorResult::Macd(calculate_macd(bars, &config.macd)?),
        IndicatorKind::Bollinger => {
            IndicatorResult::Bollinger(calculate_bollinger_bands(bars, &config.bollinger)?)
        }
    };
    debug!(indicator = %kind, bars = series.len(), "indicator computed");
    Ok(result)
}
