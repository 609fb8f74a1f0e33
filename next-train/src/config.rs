//! Process configuration from environment variables.

use std::path::PathBuf;

use chrono_tz::Tz;
use tracing::warn;

use crate::engine::{EngineConfig, OffsetStrategy};
use crate::feed::FeedConfig;

const DEFAULT_STOPS_PATH: &str = "stops.json";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {variable}: {message}")]
pub struct ConfigError {
    pub variable: &'static str,
    pub message: String,
}

/// Everything the binary needs to build an engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub engine: EngineConfig,
    /// JSON stop snapshot.
    pub stops_path: PathBuf,
    /// Serve feed documents from this directory instead of the network.
    pub mock_feed_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `NEXT_TRAIN_API_KEY` | empty (warns) |
    /// | `NEXT_TRAIN_BASE_URL` | production v2 API |
    /// | `NEXT_TRAIN_TIMEOUT_SECS` | 30 |
    /// | `NEXT_TRAIN_TIMEZONE` | `America/New_York` |
    /// | `NEXT_TRAIN_OFFSET_STRATEGY` | `call-time` |
    /// | `NEXT_TRAIN_STOPS_PATH` | `stops.json` |
    /// | `NEXT_TRAIN_MOCK_FEED_DIR` | unset |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = var("NEXT_TRAIN_API_KEY").unwrap_or_else(|| {
            warn!("NEXT_TRAIN_API_KEY not set, feed requests will be rejected");
            String::new()
        });

        let mut feed = FeedConfig::new(api_key);
        if let Some(url) = var("NEXT_TRAIN_BASE_URL") {
            feed = feed.with_base_url(url);
        }
        if let Some(secs) = var("NEXT_TRAIN_TIMEOUT_SECS") {
            let secs = secs.trim().parse().map_err(|_| ConfigError {
                variable: "NEXT_TRAIN_TIMEOUT_SECS",
                message: format!("{secs:?} is not a whole number of seconds"),
            })?;
            feed = feed.with_timeout(secs);
        }

        let mut engine = EngineConfig::default();
        if let Some(zone) = var("NEXT_TRAIN_TIMEZONE") {
            let tz: Tz = zone.trim().parse().map_err(|_| ConfigError {
                variable: "NEXT_TRAIN_TIMEZONE",
                message: format!("{zone:?} is not an IANA time zone"),
            })?;
            engine = engine.with_timezone(tz);
        }
        if let Some(strategy) = var("NEXT_TRAIN_OFFSET_STRATEGY") {
            let strategy: OffsetStrategy = strategy.parse().map_err(|message| ConfigError {
                variable: "NEXT_TRAIN_OFFSET_STRATEGY",
                message,
            })?;
            engine = engine.with_offset_strategy(strategy);
        }

        Ok(Self {
            feed,
            engine,
            stops_path: var("NEXT_TRAIN_STOPS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STOPS_PATH)),
            mock_feed_dir: var("NEXT_TRAIN_MOCK_FEED_DIR").map(PathBuf::from),
        })
    }
}
