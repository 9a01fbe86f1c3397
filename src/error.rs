use thiserror::Error;

use crate::client::CmsError;
use crate::config::LoadError;
use crate::preferences::PreferenceError;

/// Top-level failure reported by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Cms(#[from] CmsError),
    #[error(transparent)]
    Preferences(#[from] PreferenceError),
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("page resolution failed: {0}")]
    Resolution(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_keep_their_key() {
        let err = AppError::from(LoadError::Invalid {
            key: "cache.ttl_ms",
            reason: "must be greater than zero".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "failed to load configuration: invalid configuration for `cache.ttl_ms`: must be greater than zero"
        );
    }

    #[test]
    fn cms_errors_are_transparent() {
        let err = AppError::from(CmsError::HttpStatus {
            url: "http://cms/en/home.json".to_string(),
            status: 404,
            reason: "Not Found".to_string(),
        });
        assert_eq!(err.to_string(), "CMS API error: 404 Not Found");
    }
}
