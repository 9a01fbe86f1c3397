//! Payload normalization.
//!
//! The CMS serves the same logical content in several shapes: a canonical
//! section configuration, an array of Storybook-style stories, or a single
//! story record. [`normalize`] reduces all of them to the canonical shape the
//! renderer consumes. The transformation is pure and never fails; when the
//! fields it looks for are missing the payload passes through unchanged.

use serde_json::{Map, Value};

/// Title marking the story to prefer inside a story array.
pub const DEFAULT_STORY_TITLE: &str = "Default";

const TITLE_KEYS: [&str; 2] = ["Title", "title"];
const DATA_KEYS: [&str; 2] = ["Data", "data"];
const NESTED_DATA_KEYS: [&str; 2] = ["data", "Data"];

/// Whether a fetch should reduce the payload or keep it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NormalizationMode {
    #[default]
    Normalize,
    /// Multi-section pages must stay arrays of section descriptors.
    SkipNormalization,
}

/// Observed shapes of a backend payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// Any array; treated as a list of story records.
    StoryArray(Vec<Value>),
    /// An object carrying `title` plus `component` or `args`.
    Story(Map<String, Value>),
    /// Everything else is already in renderer shape.
    Canonical(Value),
}

impl RawPayload {
    pub fn classify(raw: Value) -> Self {
        match raw {
            Value::Array(items) => RawPayload::StoryArray(items),
            Value::Object(map) if is_story(&map) => RawPayload::Story(map),
            other => RawPayload::Canonical(other),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            RawPayload::StoryArray(items) => Value::Array(items),
            RawPayload::Story(map) => Value::Object(map),
            RawPayload::Canonical(value) => value,
        }
    }
}

/// Reduce `raw` to the canonical section shape.
///
/// A story array is unwrapped first; whatever it yields is then checked once
/// more for the single-story shape.
pub fn normalize(raw: Value, mode: NormalizationMode) -> Value {
    if mode == NormalizationMode::SkipNormalization {
        return raw;
    }

    let unwrapped = match RawPayload::classify(raw) {
        RawPayload::StoryArray(items) => reduce_story_array(items),
        other => other.into_value(),
    };

    match RawPayload::classify(unwrapped) {
        RawPayload::Story(story) => reduce_story(story),
        other => other.into_value(),
    }
}

/// Return the `data` envelope of `value` when it has one, else `value`.
pub fn unwrap_data(value: &Value) -> &Value {
    field(value, &["data"]).unwrap_or(value)
}

fn reduce_story_array(items: Vec<Value>) -> Value {
    if items.is_empty() {
        return Value::Array(items);
    }

    let index = items.iter().position(is_default_story).unwrap_or(0);
    let Some(story_data) = field(&items[index], &DATA_KEYS) else {
        return Value::Array(items);
    };

    let typed = field(story_data, &["type"]);
    let nested = field(story_data, &NESTED_DATA_KEYS);
    match (typed, nested) {
        (Some(kind), Some(Value::Object(inner))) => {
            let mut merged = inner.clone();
            merged.insert("type".to_string(), kind.clone());
            Value::Object(merged)
        }
        _ => story_data.clone(),
    }
}

fn reduce_story(story: Map<String, Value>) -> Value {
    match story.get("args") {
        Some(args) if is_truthy(args) => args.clone(),
        _ => Value::Object(story),
    }
}

fn is_story(map: &Map<String, Value>) -> bool {
    map.contains_key("title") && (map.contains_key("component") || map.contains_key("args"))
}

fn is_default_story(item: &Value) -> bool {
    TITLE_KEYS
        .iter()
        .any(|key| item.get(key).and_then(Value::as_str) == Some(DEFAULT_STORY_TITLE))
}

/// First of `keys` present on `value` with a truthy value.
fn field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = value.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|candidate| is_truthy(candidate))
}

// Mirrors how the upstream content tooling tests for field presence.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
