//! Search result types.

use std::collections::BTreeMap;

use nodemorph_core::names::{PN_PATH, PN_PRIMARY_TYPE, PN_TITLE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One search hit: flat property name to display value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Hit {
    #[serde(flatten)]
    fields: BTreeMap<String, String>,
}

impl Hit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// `jcr:path` of the hit.
    pub fn path(&self) -> Option<&str> {
        self.get(PN_PATH)
    }

    pub fn title(&self) -> Option<&str> {
        self.get(PN_TITLE)
    }

    pub fn primary_type(&self) -> Option<&str> {
        self.get(PN_PRIMARY_TYPE)
    }

    /// All fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<Map<String, Value>> for Hit {
    /// Flatten a JSON hit: arrays join with `, `, nested objects are
    /// dropped, `null` is dropped.
    fn from(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .filter_map(|(name, value)| flatten(value).map(|v| (name, v)))
            .collect();
        Self { fields }
    }
}

fn flatten(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(s) => Some(s),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(flatten)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

/// Hits of one search, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Number of hits returned.
    #[serde(rename = "results")]
    pub count: usize,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

impl SearchResult {
    pub fn new(hits: Vec<Hit>) -> Self {
        Self {
            count: hits.len(),
            hits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
