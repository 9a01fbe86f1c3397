//! Stamps the active language into the header's language selector.

use pagewire_types::Language;
use serde_json::{Map, Value};

const SELECTOR_ID: &str = "select-language";
const SELECTOR_DATA_ID: &str = "select-lang";

/// Return a copy of `config` whose language selectors show `language`.
///
/// Walks arrays, `children`, `data.children` and `data.items` depth-first.
/// Every selector found gets `value` and `defaultValue` set, on the node and
/// inside its `data` object. `config` itself is left untouched.
pub fn inject_language(config: &Value, language: Language) -> Value {
    match config {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| inject_language(item, language))
                .collect(),
        ),
        Value::Object(node) => Value::Object(rewrite_node(node, language)),
        other => other.clone(),
    }
}

fn rewrite_node(node: &Map<String, Value>, language: Language) -> Map<String, Value> {
    let selector = is_language_selector(node);

    let mut rewritten: Map<String, Value> = node
        .iter()
        .map(|(key, value)| {
            let value = match key.as_str() {
                "children" => inject_language(value, language),
                "data" => rewrite_data(value, language, selector),
                _ => value.clone(),
            };
            (key.clone(), value)
        })
        .collect();

    if selector {
        stamp(&mut rewritten, language);
    }
    rewritten
}

fn rewrite_data(data: &Value, language: Language, selector: bool) -> Value {
    let Value::Object(fields) = data else {
        return data.clone();
    };

    let mut rewritten: Map<String, Value> = fields
        .iter()
        .map(|(key, value)| {
            let value = match key.as_str() {
                "children" | "items" => inject_language(value, language),
                _ => value.clone(),
            };
            (key.clone(), value)
        })
        .collect();

    if selector {
        stamp(&mut rewritten, language);
    }
    Value::Object(rewritten)
}

fn is_language_selector(node: &Map<String, Value>) -> bool {
    let top_level = node.get("id").and_then(Value::as_str) == Some(SELECTOR_ID);
    let nested = node
        .get("data")
        .and_then(|data| data.get("id"))
        .and_then(Value::as_str)
        == Some(SELECTOR_DATA_ID);
    top_level || nested
}

fn stamp(fields: &mut Map<String, Value>, language: Language) {
    let code = Value::String(language.as_str().to_string());
    fields.insert("value".to_string(), code.clone());
    fields.insert("defaultValue".to_string(), code);
}
