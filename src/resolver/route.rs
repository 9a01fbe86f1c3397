//! Mapping between routes and page identifiers.

use pagewire_types::PageId;
use serde_json::Value;

/// Derive the page to load for a navigation to `path`.
///
/// `/` and the empty path are the home page; a single segment names the page
/// directly. Query strings and fragments are ignored. Deeper paths have no
/// page route of their own and land on the home page as well.
pub fn page_id_for_path(path: &str) -> PageId {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let mut segments = path.split('/').filter(|segment| !segment.is_empty());
    match (segments.next(), segments.next()) {
        (Some(slug), None) => PageId::new(slug),
        _ => PageId::home(),
    }
}

/// Renderer configuration for each section of a loaded page.
///
/// Each section hands its `data` (or `Data`) object to the renderer; a
/// section without one is passed through whole. A non-array payload is
/// treated as a page with a single section.
pub fn section_configs(sections: &Value) -> Vec<&Value> {
    match sections {
        Value::Array(items) => items.iter().map(section_config).collect(),
        single => vec![section_config(single)],
    }
}

fn section_config(section: &Value) -> &Value {
    ["data", "Data"]
        .iter()
        .filter_map(|key| section.get(*key))
        .find(|value| !value.is_null())
        .unwrap_or(section)
}
