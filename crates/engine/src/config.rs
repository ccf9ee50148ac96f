//! Tuning knobs for per-item lookups.

use std::time::Duration;

/// Controls how the filter engine fans out per-item collaborator calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum in-flight lookups per criterion
    pub lookup_concurrency: usize,

    /// Deadline for a single lookup; a late answer counts as a failure
    pub lookup_timeout: Duration,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            lookup_concurrency: 16,
            lookup_timeout: Duration::from_secs(5),
        }
    }

    /// Configure the in-flight lookup limit (default: 16, minimum: 1)
    pub fn with_lookup_concurrency(mut self, limit: usize) -> Self {
        self.lookup_concurrency = limit.max(1);
        self
    }

    /// Configure the per-lookup deadline (default: 5s)
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_clamps_concurrency() {
        let config = EngineConfig::new()
            .with_lookup_concurrency(0)
            .with_lookup_timeout(Duration::from_millis(250));

        assert_eq!(config.lookup_concurrency, 1);
        assert_eq!(config.lookup_timeout, Duration::from_millis(250));
    }
}
