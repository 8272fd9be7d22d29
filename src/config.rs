//! Session tuning parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_POLL_INITIAL_MS: u64 = 2000;
pub const DEFAULT_POLL_MAX_MS: u64 = 16_000;
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 6;
pub const DEFAULT_POLL_JITTER: f64 = 0.2;

/// Backoff schedule for variant polling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollConfig {
    /// Wait before the first fetch, in milliseconds.
    pub initial_delay_ms: u64,
    /// Upper bound for any single wait, in milliseconds.
    pub max_delay_ms: u64,
    /// Fetches before giving up.
    pub max_attempts: u32,
    /// Each wait is scaled by a random factor in `1 ± jitter`.
    pub jitter: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: DEFAULT_POLL_INITIAL_MS,
            max_delay_ms: DEFAULT_POLL_MAX_MS,
            max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
            jitter: DEFAULT_POLL_JITTER,
        }
    }
}

impl PollConfig {
    /// Build from environment variables.
    ///
    /// Optional:
    /// - `VARIANT_POLL_INITIAL_MS`: default 2000
    /// - `VARIANT_POLL_MAX_MS`: default 16000 (raised to the initial delay if lower)
    /// - `VARIANT_POLL_MAX_ATTEMPTS`: default 6
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PollConfig::from_env`], reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let initial_delay_ms = env_parse(&lookup, "VARIANT_POLL_INITIAL_MS", DEFAULT_POLL_INITIAL_MS);
        let max_delay_ms = env_parse(&lookup, "VARIANT_POLL_MAX_MS", DEFAULT_POLL_MAX_MS).max(initial_delay_ms);
        let max_attempts = env_parse(&lookup, "VARIANT_POLL_MAX_ATTEMPTS", DEFAULT_POLL_MAX_ATTEMPTS);
        Self { initial_delay_ms, max_delay_ms, max_attempts, jitter: DEFAULT_POLL_JITTER }
    }

    /// Un-jittered wait before fetch number `attempt` (1-based): the initial
    /// delay doubled per attempt, capped at the maximum.
    #[must_use]
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(32);
        let ms = self.initial_delay_ms.saturating_mul(1_u64 << doublings).min(self.max_delay_ms);
        Duration::from_millis(ms)
    }
}

/// Per-session settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionConfig {
    pub poll: PollConfig,
}

impl SessionConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self { poll: PollConfig::from_env() }
    }
}

fn env_parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    lookup(key).and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
