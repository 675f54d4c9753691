//! Per-instrument analysis, basket ranking and alert records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::indicators::IndicatorSet;
use crate::models::signal::Signal;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported lookback period '{0}', expected one of 1mo, 3mo, 6mo, 1y, 2y, 5y")]
pub struct ParsePeriodError(pub String);

/// History window requested from the market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookbackPeriod {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl LookbackPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
        }
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookbackPeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1mo" => Ok(Self::OneMonth),
            "3mo" => Ok(Self::ThreeMonths),
            "6mo" => Ok(Self::SixMonths),
            "1y" => Ok(Self::OneYear),
            "2y" => Ok(Self::TwoYears),
            "5y" => Ok(Self::FiveYears),
            other => Err(ParsePeriodError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub ticker: String,
    pub current_price: f64,
    pub indicators: IndicatorSet,
    pub signal: Signal,
    pub period: LookbackPeriod,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ranking method '{0}', expected rsi, momentum or composite")]
pub struct ParseRankingMethodError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMethod {
    Rsi,
    #[default]
    Momentum,
    Composite,
}

impl RankingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rsi => "rsi",
            Self::Momentum => "momentum",
            Self::Composite => "composite",
        }
    }
}

impl fmt::Display for RankingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingMethod {
    type Err = ParseRankingMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rsi" => Ok(Self::Rsi),
            "momentum" => Ok(Self::Momentum),
            "composite" => Ok(Self::Composite),
            _ => Err(ParseRankingMethodError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub ticker: String,
    pub analysis: Analysis,
    pub score: f64,
    /// 1-based, assigned after the whole basket is scored.
    pub rank: usize,
}

/// Instrument skipped during a basket run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentFailure {
    pub ticker: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasketResult {
    pub ranked_stocks: Vec<RankedEntry>,
    pub failures: Vec<InstrumentFailure>,
    pub ranking_method: RankingMethod,
    pub total_analyzed: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
}

/// Standing alert handed to the monitoring collaborator. The condition is
/// recorded verbatim and never evaluated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingAlert {
    pub ticker: String,
    pub condition: String,
    pub action: String,
    pub status: AlertStatus,
    pub created: DateTime<Utc>,
}
