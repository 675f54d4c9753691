//! Analyzer configuration.
//!
//! Indicator periods and thresholds live in one immutable [`AnalyzerConfig`]
//! value that is passed to every entry point. Nothing reads it globally.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{IndicatorKind, LookbackPeriod};

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
    #[error("MACD fast period ({fast}) must be shorter than slow period ({slow})")]
    MacdPeriods { fast: u32, slow: u32 },
    #[error("invalid RSI thresholds: oversold {oversold}, overbought {overbought}")]
    RsiThresholds { oversold: f64, overbought: f64 },
    #[error("Bollinger period must be at least 2, got {0}")]
    BollingerPeriod(u32),
    #[error("Bollinger std dev multiplier must be non-negative, got {0}")]
    BollingerStdDev(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiConfig {
    pub period: u32,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdConfig {
    pub fast_period: u32,
    pub slow_period: u32,
    pub signal_period: u32,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerConfig {
    pub period: u32,
    pub std_dev: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
        }
    }
}

/// Parameters of every indicator kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub rsi: RsiConfig,
    pub macd: MacdConfig,
    pub bollinger: BollingerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDefaults {
    pub indicators: Vec<IndicatorKind>,
    pub analyze_period: LookbackPeriod,
    pub compare_period: LookbackPeriod,
    /// Upper bound on instruments fetched concurrently during a basket run.
    pub max_concurrency: usize,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            indicators: vec![IndicatorKind::Rsi, IndicatorKind::Macd],
            analyze_period: LookbackPeriod::OneYear,
            compare_period: LookbackPeriod::SixMonths,
            max_concurrency: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    pub name: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            name: "yahoo_finance".to_string(),
            base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            timeout_seconds: 10,
            max_retries: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub data_source: DataSourceConfig,
    pub indicators: IndicatorConfig,
    pub analysis: AnalysisDefaults,
}

impl AnalyzerConfig {
    /// Defaults overridden by `ANALYZER_*` / `YAHOO_*` environment variables.
    /// Unparsable values keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        let ind = &mut config.indicators;

        ind.rsi.period = env_or("ANALYZER_RSI_PERIOD", ind.rsi.period);
        ind.rsi.overbought = env_or("ANALYZER_RSI_OVERBOUGHT", ind.rsi.overbought);
        ind.rsi.oversold = env_or("ANALYZER_RSI_OVERSOLD", ind.rsi.oversold);
        ind.macd.fast_period = env_or("ANALYZER_MACD_FAST", ind.macd.fast_period);
        ind.macd.slow_period = env_or("ANALYZER_MACD_SLOW", ind.macd.slow_period);
        ind.macd.signal_period = env_or("ANALYZER_MACD_SIGNAL", ind.macd.signal_period);
        ind.bollinger.period = env_or("ANALYZER_BOLLINGER_PERIOD", ind.bollinger.period);
        ind.bollinger.std_dev = env_or("ANALYZER_BOLLINGER_STD_DEV", ind.bollinger.std_dev);

        config.analysis.max_concurrency =
            env_or("ANALYZER_MAX_CONCURRENCY", config.analysis.max_concurrency);

        if let Ok(url) = env::var("YAHOO_BASE_URL") {
            config.data_source.base_url = url;
        }
        config.data_source.max_retries =
            env_or("YAHOO_MAX_RETRIES", config.data_source.max_retries);

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rsi = &self.indicators.rsi;
        if rsi.period == 0 {
            return Err(ConfigError::ZeroValue("RSI period"));
        }
        if !(0.0..=100.0).contains(&rsi.oversold)
            || !(0.0..=100.0).contains(&rsi.overbought)
            || rsi.oversold >= rsi.overbought
        {
            return Err(ConfigError::RsiThresholds {
                oversold: rsi.oversold,
                overbought: rsi.overbought,
            });
        }

        let macd = &self.indicators.macd;
        if macd.fast_period == 0 {
            return Err(ConfigError::ZeroValue("MACD fast period"));
        }
        if macd.signal_period == 0 {
            return Err(ConfigError::ZeroValue("MACD signal period"));
        }
        if macd.fast_period >= macd.slow_period {
            return Err(ConfigError::MacdPeriods {
                fast: macd.fast_period,
                slow: macd.slow_period,
            });
        }

        let bands = &self.indicators.bollinger;
        if bands.period < 2 {
            return Err(ConfigError::BollingerPeriod(bands.period));
        }
        if !(bands.std_dev >= 0.0) {
            return Err(ConfigError::BollingerStdDev(bands.std_dev));
        }

        if self.analysis.max_concurrency == 0 {
            return Err(ConfigError::ZeroValue("max concurrency"));
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Deployment environment, `sandbox` unless `APP_ENV` says otherwise.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}
