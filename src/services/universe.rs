//! Instrument universe loaded from a JSON listing.
//!
//! Expected shape: `{"stocks": [{"ticker": "2330.TW", "name": "TSMC"}, ...]}`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("failed to read universe file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse universe listing: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseEntry {
    pub ticker: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct UniverseFile {
    stocks: Vec<UniverseEntry>,
}

/// Ordered instrument listing; order is the listing order of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockUniverse {
    entries: Vec<UniverseEntry>,
}

impl StockUniverse {
    pub fn new(entries: Vec<UniverseEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json_str(json: &str) -> Result<Self, UniverseError> {
        let file: UniverseFile = serde_json::from_str(json)?;
        Ok(Self::new(file.stocks))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, UniverseError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| UniverseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn entries(&self) -> &[UniverseEntry] {
        &self.entries
    }

    pub fn tickers(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.ticker.clone()).collect()
    }

    /// First `n` tickers in listing order.
    pub fn top(&self, n: usize) -> Vec<String> {
        self.entries.iter().take(n).map(|e| e.ticker.clone()).collect()
    }

    pub fn name(&self, ticker: &str) -> &str {
        self.entries
            .iter()
            .find(|e| e.ticker.eq_ignore_ascii_case(ticker))
            .map(|e| e.name.as_str())
            .unwrap_or(UNKNOWN_NAME)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
