//! Lenient field decoders for model-produced JSON.
//!
//! The model is asked for lists of strings but sometimes answers with a single
//! string or a category map such as `{"technical": [...], "soft": [...]}`.
//! These decoders accept those shapes; anything else is kept as raw JSON by the
//! profile types themselves.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null`/missing → `None`; strings as-is; any other value as compact JSON.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

/// Accepts an array, a single string, or an object of arrays (values flattened).
/// `null`/missing → `None`, so callers can tell "absent" from "present but empty".
pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_list))
}

/// Accepts `78`, `78.5`, `"78"` or `"78%"`. Anything unreadable or non-finite → `None`.
pub fn percentage<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let pct = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    };
    Ok(pct.filter(|p: &f64| p.is_finite()))
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn value_to_list(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Null => None,
        Value::Array(items) => Some(items.into_iter().filter_map(value_to_text).collect()),
        Value::Object(map) => Some(
            map.into_iter()
                .flat_map(|(_, v)| value_to_list(v).unwrap_or_default())
                .collect(),
        ),
        other => value_to_text(other).map(|s| vec![s]),
    }
}

/// Renders a percentage without a trailing `.0` for whole numbers.
pub fn format_percentage(pct: f64) -> String {
    if pct.fract() == 0.0 {
        format!("{}", pct as i64)
    } else {
        format!("{pct}")
    }
}
