//! Engine configuration.
//!
//! Defaults match the product's tuned constants; every knob can be
//! overridden through `TENDENCY_*` environment variables.

use chrono::Duration;

/// Tunable parameters of the game engine
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Cash every session starts with
    pub initial_cash: i64,
    /// Number of weekly snapshots per session
    pub max_week: u32,
    /// |percentage change| at or above which a week counts as volatile
    pub volatility_threshold: f64,
    /// Yield at or above which the final result is flagged
    pub yield_threshold: f64,
    /// Sessions idle longer than this are evicted from the store
    pub session_ttl: Duration,
    /// Hard cap on live sessions held in the store
    pub max_sessions: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_cash: 1_000_000,
            max_week: 10,
            volatility_threshold: 10.0,
            yield_threshold: 3.0,
            session_ttl: Duration::hours(6),
            max_sessions: 10_000,
        }
    }
}

impl GameConfig {
    /// Build a config from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            initial_cash: env_parse("TENDENCY_INITIAL_CASH", defaults.initial_cash),
            max_week: env_parse("TENDENCY_MAX_WEEK", defaults.max_week),
            volatility_threshold: env_parse(
                "TENDENCY_VOLATILITY_THRESHOLD",
                defaults.volatility_threshold,
            ),
            yield_threshold: env_parse("TENDENCY_YIELD_THRESHOLD", defaults.yield_threshold),
            session_ttl: Duration::seconds(env_parse(
                "TENDENCY_SESSION_TTL_SECS",
                defaults.session_ttl.num_seconds(),
            )),
            max_sessions: env_parse("TENDENCY_MAX_SESSIONS", defaults.max_sessions),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
