//! Shared data models spanning the engine layers.

pub mod analysis;
pub mod indicators;
pub mod signal;

pub use analysis::{
    AlertStatus, Analysis, BasketResult, InstrumentFailure, LookbackPeriod, ParsePeriodError,
    ParseRankingMethodError, RankedEntry, RankingMethod, StandingAlert,
};
pub use indicators::{
    BandPosition, BollingerBandsIndicator, IndicatorKind, IndicatorOutcome, IndicatorResult,
    IndicatorSet, MacdIndicator, MacdSignal, PriceBar, PriceSeries, RsiIndicator, RsiZone,
    SeriesError,
};
pub use signal::{Signal, SignalAction, SignalConfidence};
