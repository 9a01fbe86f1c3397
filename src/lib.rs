//! Content-delivery client for a headless CMS.
//!
//! Payloads are fetched per language, reduced to canonical section
//! configurations, cached with a time-to-live, and resolved into page state
//! with a single fallback to the not-found page.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod preferences;
pub mod resolver;
pub mod shell;
pub mod telemetry;

pub use pagewire_types as types;
