use std::fmt;
use std::str::FromStr;

use crate::indicators::error::IndicatorError;
use crate::models::indicators::IndicatorKind;

pub fn parse_indicator_kind(name: &str) -> Result<IndicatorKind, IndicatorError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "rsi" => Ok(IndicatorKind::Rsi),
        "macd" => Ok(IndicatorKind::Macd),
        "bollinger" | "bbands" => Ok(IndicatorKind::Bollinger),
        _ => Err(IndicatorError::UnknownIndicatorKind(name.trim().to_string())),
    }
}

impl FromStr for IndicatorKind {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_indicator_kind(s)
    }
}

/// An indicator requested by name. Unknown names are kept so the analysis
/// can report them in their own slot instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorRequest {
    Known(IndicatorKind),
    Unknown(String),
}

impl IndicatorRequest {
    pub fn parse(name: &str) -> Self {
        match parse_indicator_kind(name) {
            Ok(kind) => Self::Known(kind),
            Err(_) => Self::Unknown(name.trim().to_string()),
        }
    }

    /// Key of the analysis slot this request fills.
    pub fn slot_name(&self) -> &str {
        match self {
            Self::Known(kind) => kind.as_str(),
            Self::Unknown(name) => name,
        }
    }
}

impl From<IndicatorKind> for IndicatorRequest {
    fn from(kind: IndicatorKind) -> Self {
        Self::Known(kind)
    }
}

impl fmt::Display for IndicatorRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slot_name())
    }
}

pub fn parse_indicator_requests<S: AsRef<str>>(names: &[S]) -> Vec<IndicatorRequest> {
    names
        .iter()
        .map(|name| IndicatorRequest::parse(name.as_ref()))
        .collect()
}

pub fn requests_for(kinds: &[IndicatorKind]) -> Vec<IndicatorRequest> {
    kinds.iter().copied().map(IndicatorRequest::from).collect()
}
