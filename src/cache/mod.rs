//! Content cache.
//!
//! Payloads fetched from the CMS are kept per request identity (resource,
//! language, normalization mode) for a bounded time:
//!
//! ```toml
//! [cache]
//! ttl_ms = 300000
//! ```

mod clock;
mod config;
mod keys;
pub(crate) mod lock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use keys::CacheKey;
pub use store::{CacheEntry, ContentCache};
