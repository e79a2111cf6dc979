//! Worker pool configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::WorkError;

/// Number of workers when none is configured.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Largest `max_iterations` or `timeout_ms` a config accepts. TOML integers
/// are signed 64-bit, so anything larger could not be written back out.
pub const MAX_CONFIG_INTEGER: u64 = i64::MAX as u64;

/// Configuration for a [`WorkerPool`](crate::WorkerPool).
///
/// Can be loaded from a TOML file via [`PoolConfig::from_toml_file`] or built
/// programmatically with the `with_*` setters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of concurrent workers.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Inclusive upper bound on the counter; must be positive for a pool.
    #[serde(default)]
    pub max_iterations: u64,

    /// Optional wall-clock limit in milliseconds. Zero disables it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl PoolConfig {
    /// Default concurrency, no timeout, the given counter bound.
    pub fn new(max_iterations: u64) -> Self {
        Self {
            max_iterations,
            ..Self::default()
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// A non-zero timeout shorter than 1 ms is stored as 1 ms.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let mut ms = timeout.as_millis();
        if ms == 0 && !timeout.is_zero() {
            ms = 1;
        }
        let ms = u64::try_from(ms).map_or(MAX_CONFIG_INTEGER, |ms| ms.min(MAX_CONFIG_INTEGER));
        self.timeout_ms = Some(ms);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }

    /// A pooled search needs at least one worker and a finite range to split.
    pub fn validate(&self) -> Result<(), WorkError> {
        if self.concurrency == 0 {
            return Err(WorkError::InvalidConfig("concurrency must be >= 1".into()));
        }
        if self.max_iterations == 0 {
            return Err(WorkError::InvalidConfig(
                "max_iterations must be > 0 for a pooled search".into(),
            ));
        }
        if self.max_iterations > MAX_CONFIG_INTEGER {
            return Err(WorkError::InvalidConfig(format!(
                "max_iterations must be <= {MAX_CONFIG_INTEGER}"
            )));
        }
        if self.timeout_ms.is_some_and(|ms| ms > MAX_CONFIG_INTEGER) {
            return Err(WorkError::InvalidConfig(format!(
                "timeout_ms must be <= {MAX_CONFIG_INTEGER}"
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, WorkError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WorkError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WorkError> {
        toml::from_str(s).map_err(|e| WorkError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WorkError> {
        toml::to_string_pretty(self).map_err(|e| WorkError::Config(e.to_string()))
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            max_iterations: 0,
            timeout_ms: None,
        }
    }
}
