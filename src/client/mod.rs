//! CMS client.
//!
//! Fetches JSON documents from `{base_url}/{language}/{resource}`, reduces
//! them with the payload normalizer and keeps the result in the shared
//! [`ContentCache`]. Failures are logged here and handed back to the caller;
//! recovery is the page resolver's job.

mod error;

use std::sync::Arc;

use metrics::counter;
use pagewire_types::{Language, PageId, ResourceName};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, error};

use crate::cache::{CacheKey, ContentCache};
use crate::config::CmsSettings;
use crate::normalize::{NormalizationMode, normalize};

pub use error::CmsError;

/// Per-request switches for [`CmsClient::fetch_resource`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub skip_normalization: bool,
}

impl FetchOptions {
    pub fn raw() -> Self {
        Self {
            skip_normalization: true,
        }
    }

    pub fn mode(self) -> NormalizationMode {
        if self.skip_normalization {
            NormalizationMode::SkipNormalization
        } else {
            NormalizationMode::Normalize
        }
    }
}

#[derive(Clone)]
pub struct CmsClient {
    http: Client,
    base: Url,
    cache: Arc<ContentCache>,
}

impl CmsClient {
    pub fn new(settings: &CmsSettings, cache: Arc<ContentCache>) -> Result<Self, CmsError> {
        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CmsError::Client)?;

        Ok(Self {
            http,
            base: settings.base_url.clone(),
            cache,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("pagewire/", env!("CARGO_PKG_VERSION"))
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    /// `{base}/{language}/{resource}`, with the resource kept as a single
    /// percent-encoded path segment below the language directory.
    pub fn resource_url(&self, resource: &ResourceName, language: Language) -> Result<Url, CmsError> {
        let name = resource.as_str();
        if matches!(name, "" | "." | "..") {
            return Err(CmsError::InvalidResource(name.to_string()));
        }

        let mut target = self.base.clone();
        target
            .path_segments_mut()
            .map_err(|()| CmsError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(language.as_str())
            .push(name);
        Ok(target)
    }

    /// Return the payload for `resource` in `language`, from cache when fresh.
    pub async fn fetch_resource(
        &self,
        resource: &ResourceName,
        language: Language,
        options: FetchOptions,
    ) -> Result<Arc<Value>, CmsError> {
        let mode = options.mode();
        let key = CacheKey::new(resource.clone(), language, mode);

        if let Some(cached) = self.cache.get(&key) {
            debug!(%resource, %language, "serving CMS payload from cache");
            return Ok(cached);
        }

        let raw = self
            .load(resource, language)
            .await
            .inspect_err(|err| {
                counter!("pagewire_fetch_failure_total", "kind" => err.kind()).increment(1);
                error!(
                    %resource,
                    %language,
                    error = %err,
                    kind = err.kind(),
                    "failed to fetch CMS data"
                );
            })?;

        let payload = Arc::new(normalize(raw, mode));
        self.cache.put(key, Arc::clone(&payload));
        Ok(payload)
    }

    pub async fn header(&self, language: Language) -> Result<Arc<Value>, CmsError> {
        self.fetch_resource(&ResourceName::header(), language, FetchOptions::default())
            .await
    }

    pub async fn footer(&self, language: Language) -> Result<Arc<Value>, CmsError> {
        self.fetch_resource(&ResourceName::footer(), language, FetchOptions::default())
            .await
    }

    /// Pages are arrays of sections and are always fetched raw.
    pub async fn page(&self, page_id: &PageId, language: Language) -> Result<Arc<Value>, CmsError> {
        self.fetch_resource(&ResourceName::page(page_id), language, FetchOptions::raw())
            .await
    }

    async fn load(&self, resource: &ResourceName, language: Language) -> Result<Value, CmsError> {
        let url = self.resource_url(resource, language)?;
        let label = url.to_string();

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| CmsError::Network {
                url: label.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::HttpStatus {
                url: label,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| CmsError::Network {
            url: label.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| CmsError::Parse { url: label, source })
    }
}
