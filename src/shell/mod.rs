//! Site chrome: the header and footer rendered around every page.

mod language;

use std::sync::Arc;

use pagewire_types::Language;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::client::{CmsClient, CmsError};
use crate::normalize::unwrap_data;

pub use language::inject_language;

/// Header and footer ready for rendering. Either may be absent, in which case
/// the shell renders without it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShellChrome {
    pub header: Option<Value>,
    pub footer: Option<Value>,
}

#[derive(Clone)]
pub struct ShellLoader {
    client: Arc<CmsClient>,
}

impl ShellLoader {
    pub fn new(client: Arc<CmsClient>) -> Self {
        Self { client }
    }

    /// Load chrome for `language`. Failures are logged and produce empty
    /// chrome rather than an error.
    pub async fn load(&self, language: Language) -> ShellChrome {
        match self.try_load(language).await {
            Ok(chrome) => {
                info!(%language, "Shell chrome loaded");
                chrome
            }
            Err(err) => {
                error!(%language, error = %err, "Failed to load shell data");
                ShellChrome::default()
            }
        }
    }

    async fn try_load(&self, language: Language) -> Result<ShellChrome, CmsError> {
        let header = self.client.header(language).await?;
        let footer = self.client.footer(language).await?;

        Ok(ShellChrome {
            header: Some(inject_language(&header, language)),
            footer: Some(unwrap_data(&footer).clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use pagewire_types::ResourceName;
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::cache::{CacheConfig, CacheKey, ContentCache};
    use crate::config::CmsSettings;
    use crate::normalize::NormalizationMode;

    fn loader_for(server: &MockServer) -> (ShellLoader, Arc<ContentCache>) {
        let cache = Arc::new(ContentCache::new(&CacheConfig::default()));
        let settings = CmsSettings {
            base_url: Url::parse(&server.base_url()).expect("base url"),
            request_timeout: None,
        };
        let client = CmsClient::new(&settings, cache.clone()).expect("client");
        (ShellLoader::new(Arc::new(client)), cache)
    }

    fn header_body() -> serde_json::Value {
        json!({
            "type": "Header",
            "children": [{ "type": "Select", "id": "select-language", "value": "en" }]
        })
    }

    #[tokio::test]
    async fn chrome_carries_language_and_unwrapped_footer() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/dk/header.json");
                then.status(200).json_body(header_body());
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/dk/footer.json");
                then.status(200)
                    .json_body(json!({ "data": { "links": [{ "href": "/about" }] } }));
            })
            .await;

        let (loader, _) = loader_for(&server);
        let chrome = loader.load(Language::Dk).await;

        let header = chrome.header.expect("header");
        assert_eq!(header["children"][0]["value"], json!("dk"));
        assert_eq!(header["children"][0]["defaultValue"], json!("dk"));
        assert_eq!(
            chrome.footer.expect("footer"),
            json!({ "links": [{ "href": "/about" }] })
        );
    }

    #[tokio::test]
    async fn injection_does_not_leak_into_cache() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/de/header.json");
                then.status(200).json_body(header_body());
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/de/footer.json");
                then.status(200).json_body(json!({ "links": [] }));
            })
            .await;

        let (loader, cache) = loader_for(&server);
        let chrome = loader.load(Language::De).await;
        assert_eq!(chrome.header.expect("header")["children"][0]["value"], json!("de"));

        let key = CacheKey::new(ResourceName::header(), Language::De, NormalizationMode::Normalize);
        let cached = cache.get(&key).expect("header cached");
        assert_eq!(*cached, header_body());
        assert!(cached["children"][0].get("defaultValue").is_none());
    }

    #[tokio::test]
    async fn footer_failure_leaves_chrome_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/en/header.json");
                then.status(200).json_body(header_body());
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/en/footer.json");
                then.status(503);
            })
            .await;

        let (loader, _) = loader_for(&server);
        assert_eq!(loader.load(Language::En).await, ShellChrome::default());
    }
}
