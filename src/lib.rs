//! Technical scoring and ranking of tradable instruments.
//!
//! The pipeline per instrument is: price history → indicators (RSI, MACD,
//! Bollinger Bands) → trading signal → ranking score. Everything after the
//! retrieval step is a pure function of the price series and an explicit
//! [`config::AnalyzerConfig`].

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod ranking;
pub mod report;
pub mod services;
pub mod signals;
