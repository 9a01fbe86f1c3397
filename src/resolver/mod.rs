//! Page resolution.
//!
//! Turns a route into page content. Each navigation bumps a generation
//! counter and every state change is applied only if it still belongs to the
//! latest generation, so a slow response for a page the user already left is
//! dropped instead of replacing what is on screen.
//!
//! ```text
//! navigate(path) -> Resolving(id) --ok--> Loaded(id)
//!                        |
//!                      error, id != not-found
//!                        v
//!                 FallingBack(id -> not-found) -> Resolving(not-found) --ok--> Loaded
//!                                                        |
//!                                                      error
//!                                                        v
//!                                                      Error
//! ```

mod route;

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use pagewire_types::{Language, PageId};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::client::{CmsClient, CmsError};

pub use route::{page_id_for_path, section_configs};

/// Shown when neither the requested page nor the fallback page could load.
pub const GENERIC_ERROR_MESSAGE: &str = "We're sorry, the page you're looking for doesn't exist. \
     Additionally, we encountered an error while trying to load the custom error page.";

/// Where page payloads come from.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page_id: &PageId, language: Language)
    -> Result<Arc<Value>, CmsError>;
}

#[async_trait]
impl PageSource for CmsClient {
    async fn fetch_page(
        &self,
        page_id: &PageId,
        language: Language,
    ) -> Result<Arc<Value>, CmsError> {
        self.page(page_id, language).await
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageState {
    #[default]
    Idle,
    Resolving {
        page_id: PageId,
    },
    Loaded {
        page_id: PageId,
        sections: Arc<Value>,
    },
    FallingBack {
        from: PageId,
        to: PageId,
    },
    /// Terminal until the next navigation; never retried automatically.
    Error {
        page_id: PageId,
        reason: String,
    },
}

impl PageState {
    pub fn page_id(&self) -> Option<&PageId> {
        match self {
            PageState::Idle => None,
            PageState::Resolving { page_id }
            | PageState::Loaded { page_id, .. }
            | PageState::Error { page_id, .. } => Some(page_id),
            PageState::FallingBack { to, .. } => Some(to),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, PageState::Loaded { .. } | PageState::Error { .. })
    }

    /// User-facing message for the terminal error state.
    pub fn error_message(&self) -> Option<&'static str> {
        matches!(self, PageState::Error { .. }).then_some(GENERIC_ERROR_MESSAGE)
    }
}

/// Resolver state as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub generation: u64,
    pub path: Option<String>,
    pub language: Language,
    pub state: PageState,
}

/// Result of one call to [`PageResolver::navigate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Settled(PageState),
    /// A later navigation took over; this one's result was discarded.
    Superseded { generation: u64 },
}

pub struct PageResolver {
    source: Arc<dyn PageSource>,
    state: watch::Sender<Snapshot>,
}

impl PageResolver {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self { source, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    pub fn state(&self) -> PageState {
        self.state.borrow().state.clone()
    }

    /// Resolve the page for `path`, abandoning any resolution in flight.
    pub async fn navigate(&self, path: &str, language: Language) -> Resolution {
        let page_id = page_id_for_path(path);
        let generation = self.begin(path, language, page_id.clone());
        info!(path, %page_id, %language, generation, "resolving page");
        self.resolve(generation, page_id, language).await
    }

    /// Resolve the current path again, typically after a language switch.
    ///
    /// Returns `None` when nothing has been navigated to yet.
    pub async fn refresh(&self, language: Language) -> Option<Resolution> {
        let path = self.state.borrow().path.clone()?;
        Some(self.navigate(&path, language).await)
    }

    fn begin(&self, path: &str, language: Language, page_id: PageId) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.path = Some(path.to_string());
            snapshot.language = language;
            snapshot.state = PageState::Resolving { page_id };
            generation = snapshot.generation;
        });
        generation
    }

    async fn resolve(&self, generation: u64, mut page_id: PageId, language: Language) -> Resolution {
        loop {
            let next = match self.source.fetch_page(&page_id, language).await {
                Ok(sections) => PageState::Loaded { page_id, sections },
                Err(err) if !page_id.is_not_found() => {
                    let fallback = PageId::not_found();
                    warn!(%page_id, error = %err, generation, "page failed to load, falling back");

                    let falling_back = PageState::FallingBack {
                        from: page_id,
                        to: fallback.clone(),
                    };
                    if !self.transition(generation, falling_back) {
                        return Resolution::Superseded { generation };
                    }
                    counter!("pagewire_page_fallback_total").increment(1);

                    let retry = PageState::Resolving {
                        page_id: fallback.clone(),
                    };
                    if !self.transition(generation, retry) {
                        return Resolution::Superseded { generation };
                    }
                    page_id = fallback;
                    continue;
                }
                Err(err) => {
                    error!(%page_id, error = %err, generation, "fallback page failed to load");
                    PageState::Error {
                        page_id,
                        reason: err.to_string(),
                    }
                }
            };

            return if self.transition(generation, next.clone()) {
                Resolution::Settled(next)
            } else {
                Resolution::Superseded { generation }
            };
        }
    }

    /// Apply `next` if `generation` is still the latest navigation.
    fn transition(&self, generation: u64, next: PageState) -> bool {
        let applied = self.state.send_if_modified(|snapshot| {
            if snapshot.generation != generation {
                return false;
            }
            snapshot.state = next;
            true
        });
        if !applied {
            debug!(generation, "discarding result of superseded navigation");
        }
        applied
    }
}
