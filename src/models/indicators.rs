use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::indicators::error::IndicatorError;

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl PriceBar {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("price series must contain at least one bar")]
    Empty,
    #[error("bar {index} is not strictly after the previous bar")]
    NotAscending { index: usize },
}

/// Chronologically ascending bars with unique timestamps, never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::Empty);
        }
        if let Some(index) = bars
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(SeriesError::NotAscending { index: index + 1 });
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last_close(&self) -> f64 {
        self.bars.last().map(|b| b.close).unwrap_or_default()
    }
}

/// Closed set of supported indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "MACD")]
    Macd,
    #[serde(rename = "Bollinger")]
    Bollinger,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 3] = [Self::Rsi, Self::Macd, Self::Bollinger];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rsi => "RSI",
            Self::Macd => "MACD",
            Self::Bollinger => "Bollinger",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacdSignal {
    /// Histogram crossed above zero on the latest bar.
    Buy,
    /// Histogram crossed below zero on the latest bar.
    Sell,
    Bullish,
    Bearish,
}

impl MacdSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandPosition {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub signal: RsiZone,
    pub interpretation: String,
    pub period: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd_line: f64,
    pub signal_line: f64,
    pub histogram: f64,
    pub signal: MacdSignal,
    pub interpretation: String,
    pub period: (u32, u32, u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper_band: f64,
    pub middle_band: f64,
    pub lower_band: f64,
    pub current_price: f64,
    pub position: BandPosition,
    pub interpretation: String,
    pub period: u32,
    pub std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum IndicatorResult {
    #[serde(rename = "RSI")]
    Rsi(RsiIndicator),
    #[serde(rename = "MACD")]
    Macd(MacdIndicator),
    #[serde(rename = "Bollinger")]
    Bollinger(BollingerBandsIndicator),
}

impl IndicatorResult {
    pub fn kind(&self) -> IndicatorKind {
        match self {
            Self::Rsi(_) => IndicatorKind::Rsi,
            Self::Macd(_) => IndicatorKind::Macd,
            Self::Bollinger(_) => IndicatorKind::Bollinger,
        }
    }

    pub fn interpretation(&self) -> &str {
        match self {
            Self::Rsi(rsi) => &rsi.interpretation,
            Self::Macd(macd) => &macd.interpretation,
            Self::Bollinger(bands) => &bands.interpretation,
        }
    }
}

/// Per-slot outcome: one bad indicator does not fail the analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorOutcome {
    Computed(IndicatorResult),
    Failed { error: String },
}

impl IndicatorOutcome {
    pub fn result(&self) -> Option<&IndicatorResult> {
        match self {
            Self::Computed(result) => Some(result),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl From<Result<IndicatorResult, IndicatorError>> for IndicatorOutcome {
    fn from(result: Result<IndicatorResult, IndicatorError>) -> Self {
        match result {
            Ok(result) => Self::Computed(result),
            Err(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Indicator slots of one analysis, keyed by the requested indicator name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndicatorSet {
    slots: BTreeMap<String, IndicatorOutcome>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(mut self, name: impl Into<String>, outcome: IndicatorOutcome) -> Self {
        self.insert(name, outcome);
        self
    }

    pub fn with_result(self, result: IndicatorResult) -> Self {
        let name = result.kind().as_str();
        self.with_outcome(name, IndicatorOutcome::Computed(result))
    }

    pub fn insert(&mut self, name: impl Into<String>, outcome: IndicatorOutcome) {
        self.slots.insert(name.into(), outcome);
    }

    pub fn get(&self, name: &str) -> Option<&IndicatorOutcome> {
        self.slots.get(name)
    }

    pub fn result(&self, kind: IndicatorKind) -> Option<&IndicatorResult> {
        self.slots.get(kind.as_str()).and_then(IndicatorOutcome::result)
    }

    pub fn rsi(&self) -> Option<&RsiIndicator> {
        match self.result(IndicatorKind::Rsi) {
            Some(IndicatorResult::Rsi(rsi)) => Some(rsi),
            _ => None,
        }
    }

    pub fn macd(&self) -> Option<&MacdIndicator> {
        match self.result(IndicatorKind::Macd) {
            Some(IndicatorResult::Macd(macd)) => Some(macd),
            _ => None,
        }
    }

    pub fn bollinger(&self) -> Option<&BollingerBandsIndicator> {
        match self.result(IndicatorKind::Bollinger) {
            Some(IndicatorResult::Bollinger(bands)) => Some(bands),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndicatorOutcome)> {
        self.slots.iter().map(|(name, outcome)| (name.as_str(), outcome))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
