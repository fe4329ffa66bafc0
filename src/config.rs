//! Runtime configuration: the polling cadence table, cache lifetimes, and the
//! submission retry policy.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use serde_with::{DurationMilliSeconds, serde_as};
use tracing::{info, warn};

/// Default location on disk where the embedding app ships the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/live.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "CAGESIDE_LIVE_CONFIG_PATH";

/// Named table of refresh intervals, one per pollable phase.
///
/// The concrete milliseconds live only here; the cadence selector and its
/// tests depend on the relative ordering (scoring window fastest, pre-fight
/// slowest), not on the literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CadenceTable {
    /// Refresh interval while nothing is changing yet.
    pub pre_fight: Duration,
    /// Refresh interval while a round is underway.
    pub round_live: Duration,
    /// Refresh interval during the scoring window between rounds.
    pub round_break: Duration,
    /// Refresh interval for phases this client cannot name.
    pub fallback: Duration,
}

impl Default for CadenceTable {
    fn default() -> Self {
        Self {
            pre_fight: Duration::from_secs(60),
            round_live: Duration::from_secs(15),
            round_break: Duration::from_secs(5),
            fallback: Duration::from_secs(30),
        }
    }
}

/// Backoff policy for retrying a submission after a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts for one logical submission, first try included.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Ceiling for the doubling backoff.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the coordinator.
pub struct LiveConfig {
    /// Phase-to-interval table used by the cadence selector.
    pub cadence: CadenceTable,
    /// How long a cached scorecard stays fresh for passive reads.
    pub scorecard_ttl: Duration,
    /// Refresh interval for the operator live-fight roster.
    pub roster_refresh: Duration,
    /// Retry policy for score submissions.
    pub submit_retry: RetryPolicy,
}

impl LiveConfig {
    /// Load the coordinator configuration from disk, falling back to baked-in
    /// defaults when the file is missing or malformed.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded live scoring config");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse live scoring config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "live scoring config not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read live scoring config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            cadence: CadenceTable::default(),
            scorecard_ttl: Duration::from_secs(10),
            roster_refresh: Duration::from_secs(10),
            submit_retry: RetryPolicy::default(),
        }
    }
}

#[serde_as]
#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file. Every field is optional;
/// omitted fields keep their defaults.
struct RawConfig {
    cadence: Option<RawCadence>,
    #[serde(default)]
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    scorecard_ttl_ms: Option<Duration>,
    #[serde(default)]
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    roster_refresh_ms: Option<Duration>,
    retry: Option<RawRetry>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct RawCadence {
    #[serde(default)]
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pre_fight_ms: Option<Duration>,
    #[serde(default)]
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    round_live_ms: Option<Duration>,
    #[serde(default)]
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    round_break_ms: Option<Duration>,
    #[serde(default)]
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    fallback_ms: Option<Duration>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct RawRetry {
    max_attempts: Option<u32>,
    #[serde(default)]
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    initial_delay_ms: Option<Duration>,
    #[serde(default)]
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    max_delay_ms: Option<Duration>,
}

impl From<RawConfig> for LiveConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = LiveConfig::default();
        let cadence = raw
            .cadence
            .map(|c| {
                let base = CadenceTable::default();
                CadenceTable {
                    pre_fight: c.pre_fight_ms.unwrap_or(base.pre_fight),
                    round_live: c.round_live_ms.unwrap_or(base.round_live),
                    round_break: c.round_break_ms.unwrap_or(base.round_break),
                    fallback: c.fallback_ms.unwrap_or(base.fallback),
                }
            })
            .unwrap_or_default();
        let submit_retry = raw
            .retry
            .map(|r| {
                let base = RetryPolicy::default();
                RetryPolicy {
                    max_attempts: r.max_attempts.unwrap_or(base.max_attempts),
                    initial_delay: r.initial_delay_ms.unwrap_or(base.initial_delay),
                    max_delay: r.max_delay_ms.unwrap_or(base.max_delay),
                }
            })
            .unwrap_or_default();

        Self {
            cadence,
            scorecard_ttl: raw.scorecard_ttl_ms.unwrap_or(defaults.scorecard_ttl),
            roster_refresh: raw.roster_refresh_ms.unwrap_or(defaults.roster_refresh),
            submit_retry,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cadence_orders_scoring_window_first() {
        let table = CadenceTable::default();
        assert!(table.round_break < table.round_live);
        assert!(table.round_live < table.pre_fight);
        assert!(table.fallback > Duration::ZERO);
    }

    #[test]
    fn partial_file_keeps_defaults_for_omitted_fields() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"cadence": {"round_break_ms": 2000}}"#).unwrap();
        let config = LiveConfig::from(raw);

        assert_eq!(config.cadence.round_break, Duration::from_secs(2));
        assert_eq!(
            config.cadence.pre_fight,
            CadenceTable::default().pre_fight
        );
        assert_eq!(config.submit_retry, RetryPolicy::default());
    }

    #[test]
    fn retry_policy_round_trips_from_milliseconds() {
        let raw: RawConfig = serde_json::from_str(
            r#"{"retry": {"max_attempts": 5, "initial_delay_ms": 250, "max_delay_ms": 4000}}"#,
        )
        .unwrap();
        let config = LiveConfig::from(raw);

        assert_eq!(config.submit_retry.max_attempts, 5);
        assert_eq!(config.submit_retry.initial_delay, Duration::from_millis(250));
        assert_eq!(config.submit_retry.max_delay, Duration::from_secs(4));
    }
}
