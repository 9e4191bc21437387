//! Session configuration
//!
//! Defaults match the timings the sync protocol was tuned for. Values can be
//! overridden from the environment (`COEDIT_*`) or deserialized from any
//! serde source.

use crate::error::{CoeditError, Result};
use serde::Deserialize;
use std::env;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Allowed flush interval; longer intervals make remote typing feel laggy
pub const FLUSH_INTERVAL_BOUNDS_MS: RangeInclusive<u64> = 300..=800;

/// Allowed remote-lock timeout
pub const LOCK_TIMEOUT_BOUNDS_MS: RangeInclusive<u64> = 5_000..=7_000;

/// Text installed when the initial load fails
pub const DEFAULT_FALLBACK_TEXT: &str = "# Document Title";

/// Timing and behavior knobs for one edit session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub flush_interval_ms: u64,
    pub typing_idle_ms: u64,
    pub save_interval_ms: u64,
    pub lock_timeout_ms: u64,
    pub log_retention_ms: u64,
    pub presence_timeout_ms: u64,
    pub heartbeat_interval_ms: u64,
    /// Make the local editor read-only while a remote participant types
    pub lock_while_remote_typing: bool,
    pub fallback_text: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            flush_interval_ms: 500,
            typing_idle_ms: 3_000,
            save_interval_ms: 30_000,
            lock_timeout_ms: 6_000,
            log_retention_ms: crate::oplog::DEFAULT_RETENTION_MS,
            presence_timeout_ms: crate::awareness::DEFAULT_TIMEOUT.as_millis() as u64,
            heartbeat_interval_ms: crate::awareness::HEARTBEAT_INTERVAL.as_millis() as u64,
            lock_while_remote_typing: false,
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// Truthy: `1`, `true`, `yes`, `on`. Falsy: `0`, `false`, `no`, `off`, empty.
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_millis(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl SessionConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable variables keep their defaults. The result is
    /// validated before it is returned.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            flush_interval_ms: env_millis("COEDIT_FLUSH_INTERVAL_MS", defaults.flush_interval_ms),
            typing_idle_ms: env_millis("COEDIT_TYPING_IDLE_MS", defaults.typing_idle_ms),
            save_interval_ms: env_millis("COEDIT_SAVE_INTERVAL_MS", defaults.save_interval_ms),
            lock_timeout_ms: env_millis("COEDIT_LOCK_TIMEOUT_MS", defaults.lock_timeout_ms),
            log_retention_ms: env_millis("COEDIT_LOG_RETENTION_MS", defaults.log_retention_ms),
            presence_timeout_ms: env_millis(
                "COEDIT_PRESENCE_TIMEOUT_MS",
                defaults.presence_timeout_ms,
            ),
            heartbeat_interval_ms: env_millis(
                "COEDIT_HEARTBEAT_INTERVAL_MS",
                defaults.heartbeat_interval_ms,
            ),
            lock_while_remote_typing: env::var("COEDIT_LOCK_WHILE_REMOTE_TYPING")
                .ok()
                .and_then(|value| parse_env_flag(&value))
                .unwrap_or(defaults.lock_while_remote_typing),
            fallback_text: env::var("COEDIT_FALLBACK_TEXT").unwrap_or(defaults.fallback_text),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check bounds and reject zero intervals.
    pub fn validate(&self) -> Result<()> {
        if !FLUSH_INTERVAL_BOUNDS_MS.contains(&self.flush_interval_ms) {
            return Err(CoeditError::Config(format!(
                "flush_interval_ms {} outside {:?}",
                self.flush_interval_ms, FLUSH_INTERVAL_BOUNDS_MS
            )));
        }
        if !LOCK_TIMEOUT_BOUNDS_MS.contains(&self.lock_timeout_ms) {
            return Err(CoeditError::Config(format!(
                "lock_timeout_ms {} outside {:?}",
                self.lock_timeout_ms, LOCK_TIMEOUT_BOUNDS_MS
            )));
        }
        let intervals = [
            ("typing_idle_ms", self.typing_idle_ms),
            ("save_interval_ms", self.save_interval_ms),
            ("log_retention_ms", self.log_retention_ms),
            ("presence_timeout_ms", self.presence_timeout_ms),
            ("heartbeat_interval_ms", self.heartbeat_interval_ms),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(CoeditError::Config(format!("{} must be non-zero", name)));
            }
        }
        if self.heartbeat_interval_ms >= self.presence_timeout_ms {
            return Err(CoeditError::Config(
                "heartbeat_interval_ms must be shorter than presence_timeout_ms".to_string(),
            ));
        }
        Ok(())
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }

    pub fn typing_idle(&self) -> Duration {
        Duration::from_millis(self.typing_idle_ms)
    }

    pub fn save_interval(&self) -> Duration {
        Duration::from_millis(self.save_interval_ms)
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    pub fn presence_timeout(&self) -> Duration {
        Duration::from_millis(self.presence_timeout_ms)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }
}
