use thiserror::Error;

/// Failures of a single CMS fetch.
///
/// Normalization never fails; a payload missing the expected fields passes
/// through unchanged instead of producing an error.
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("invalid CMS URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("`{0}` is not a valid resource name")]
    InvalidResource(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("CMS API error: {status} {reason}")]
    HttpStatus {
        url: String,
        status: u16,
        reason: String,
    },
    #[error("failed to parse CMS payload from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CmsError {
    /// Short label used in structured logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            CmsError::InvalidUrl(_) => "invalid_url",
            CmsError::InvalidResource(_) => "invalid_resource",
            CmsError::Client(_) => "client",
            CmsError::Network { .. } => "network",
            CmsError::HttpStatus { .. } => "http_status",
            CmsError::Parse { .. } => "parse",
        }
    }
}
