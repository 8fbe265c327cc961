//! Deserializers for legacy attribute encodings.
//!
//! The data set was imported from a source that stored booleans as Python
//! literals (`"True"`, `"False"`, `"None"`) and numbers as strings.

use std::collections::BTreeMap;

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn text_value(value: Value) -> Result<Option<String>, Value> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(other),
    }
}

/// Accepts a JSON boolean or a legacy boolean string; `null`/`"None"` mean absent.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::String(s)) => match s.trim() {
            "True" | "true" => Ok(Some(true)),
            "False" | "false" => Ok(Some(false)),
            "None" | "" => Ok(None),
            other => Err(D::Error::custom(format!("invalid flag value {:?}", other))),
        },
        Some(other) => Err(D::Error::custom(format!("invalid flag value {}", other))),
    }
}

/// Accepts a string or a number, keeping the raw text.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => text_value(value)
            .map_err(|other| D::Error::custom(format!("expected text, got {}", other))),
    }
}

fn text_entries(values: Vec<Value>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|value| match text_value(value) {
            Ok(text) => text,
            Err(other) => {
                tracing::debug!(%other, "skipping non-text option");
                None
            }
        })
        .collect()
}

/// Accepts a list of text values. Entries that are not strings or numbers are
/// dropped and `null` reads as an empty list.
pub(crate) fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(text_entries(values))
}

/// Like [`text_list`], for every value of a keyed map of lists.
pub(crate) fn text_list_map<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<BTreeMap<String, Option<Vec<Value>>>>::deserialize(deserializer)?
        .unwrap_or_default();
    Ok(entries
        .into_iter()
        .map(|(key, values)| (key, text_entries(values.unwrap_or_default())))
        .collect())
}

/// Treats an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
