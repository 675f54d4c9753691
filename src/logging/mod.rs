//! Logging setup for the analyzer binary and embedding applications.
//!
//! Production deployments emit JSON lines on stdout. Anything else gets
//! colored, human-readable output on stderr so it stays apart from reports
//! printed on stdout.

use crate::config::get_environment;
use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` (`json` or `pretty`) overrides the environment default.
    pub fn from_env() -> Self {
        env::var("LOG_FORMAT")
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or_else(|| Self::for_environment(&get_environment()))
    }

    pub fn for_environment(environment: &str) -> Self {
        match environment {
            "production" | "prod" => Self::Json,
            _ => Self::Pretty,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Install the global subscriber, honoring `RUST_LOG`.
pub fn init_logging() {
    init_with_format(LogFormat::from_env());
}

/// A second call keeps the subscriber that is already installed.
pub fn init_with_format(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stdout),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if let Err(e) = installed {
        tracing::debug!(error = %e, "subscriber already installed");
    }
}
