//! Cache key definitions.

use pagewire_types::{Language, ResourceName};

use crate::normalize::NormalizationMode;

/// Identity of one fetch: which document, in which language, reduced or raw.
///
/// Any differing component yields an independent cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub resource: ResourceName,
    pub language: Language,
    pub mode: NormalizationMode,
}

impl CacheKey {
    pub fn new(resource: ResourceName, language: Language, mode: NormalizationMode) -> Self {
        Self {
            resource,
            language,
            mode,
        }
    }
}
