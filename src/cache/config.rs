//! Cache configuration.
//!
//! Controls how long fetched payloads stay fresh, via `[cache]` in
//! `pagewire.toml`.

use time::Duration;

const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Content cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Freshness window in milliseconds; older entries read as absent.
    pub ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            ttl_ms: settings.ttl_ms.get(),
        }
    }
}

impl CacheConfig {
    /// Freshness window as a signed duration, saturating at `i64::MAX` ms.
    pub fn ttl(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.ttl_ms).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ttl_is_five_minutes() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl_ms, 300_000);
        assert_eq!(config.ttl(), Duration::minutes(5));
    }

    #[test]
    fn oversized_ttl_saturates() {
        let config = CacheConfig { ttl_ms: u64::MAX };
        assert_eq!(config.ttl(), Duration::milliseconds(i64::MAX));
    }
}
