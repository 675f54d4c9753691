//! Pure per-instrument pipeline: indicators, then signal.

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::IndicatorConfig;
use crate::indicators::{compute, IndicatorError, IndicatorRequest};
use crate::models::analysis::{Analysis, LookbackPeriod};
use crate::models::indicators::{IndicatorOutcome, IndicatorResult, IndicatorSet, PriceSeries};
use crate::signals::SignalGenerator;

/// Build the analysis of one instrument from an already retrieved series.
///
/// Every request gets exactly one slot; a failing indicator is recorded as
/// failed and the remaining ones are still computed.
pub fn analyze_series(
    symbol: &str,
    series: &PriceSeries,
    requests: &[IndicatorRequest],
    period: LookbackPeriod,
    config: &IndicatorConfig,
) -> Analysis {
    let ticker = symbol.trim().to_uppercase();
    let mut indicators = IndicatorSet::new();

    for request in requests {
        let result: Result<IndicatorResult, IndicatorError> = match request {
            IndicatorRequest::Known(kind) => compute(*kind, series, config),
            IndicatorRequest::Unknown(name) => {
                Err(IndicatorError::UnknownIndicatorKind(name.clone()))
            }
        };
        if let Err(ref e) = result {
            warn!(ticker = %ticker, indicator = %request, error = %e, "indicator failed");
        }
        indicators.insert(request.slot_name(), IndicatorOutcome::from(result));
    }

    let current_price = series.last_close();
    let signal = SignalGenerator::new().generate(current_price, &indicators);
    debug!(
        ticker = %ticker,
        action = %signal.action,
        confidence = %signal.confidence,
        score = signal.score,
        "signal generated"
    );

    Analysis {
        ticker,
        current_price,
        indicators,
        signal,
        period,
        timestamp: Utc::now(),
    }
}
