//! Property values and `key=value` assignment parsing.
//!
//! Properties are string typed: a property holds either a single string or
//! a list of strings. Operators write assignments one per line as
//! `key=value`, or `key=[a, b]` for a multi-value.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A value that can be stored in a node property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A single string.
    Single(String),
    /// An ordered list of strings.
    Multi(Vec<String>),
}

impl PropertyValue {
    /// Parse operator input: `[a, b]` becomes a multi-value with trimmed
    /// items, anything else a single value.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.len() >= 2 && raw.starts_with('[') && raw.ends_with(']') {
            let inner = &raw[1..raw.len() - 1];
            let items = inner.split(',').map(|s| s.trim().to_string()).collect();
            return PropertyValue::Multi(items);
        }
        PropertyValue::Single(raw.to_string())
    }

    /// Get as string reference if this is a single value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Single(s) => Some(s),
            PropertyValue::Multi(_) => None,
        }
    }

    /// Returns true if this is a multi-value.
    pub fn is_multi(&self) -> bool {
        matches!(self, PropertyValue::Multi(_))
    }

    /// All items, a single value counting as one.
    pub fn items(&self) -> Vec<&str> {
        match self {
            PropertyValue::Single(s) => vec![s.as_str()],
            PropertyValue::Multi(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Returns true if the value (or any item of a multi-value) equals `expected`.
    pub fn matches(&self, expected: &str) -> bool {
        self.items().into_iter().any(|item| item == expected)
    }

    /// Items joined by `, ` for flat display (search hits, CSV cells).
    pub fn joined(&self) -> String {
        self.items().join(", ")
    }

    /// Substitute `find` with `replace`.
    ///
    /// With `partial`, every occurrence inside each item is replaced; without
    /// it, only items exactly equal to `find` are replaced. Returns `None`
    /// when nothing matched.
    pub fn substitute(&self, find: &str, replace: &str, partial: bool) -> Option<PropertyValue> {
        let swap = |item: &str| -> Option<String> {
            if partial {
                if !find.is_empty() && item.contains(find) {
                    return Some(item.replace(find, replace));
                }
                None
            } else if item == find {
                Some(replace.to_string())
            } else {
                None
            }
        };

        match self {
            PropertyValue::Single(s) => swap(s).map(PropertyValue::Single),
            PropertyValue::Multi(items) => {
                let mut changed = false;
                let next = items
                    .iter()
                    .map(|item| match swap(item) {
                        Some(new) => {
                            changed = true;
                            new
                        }
                        None => item.clone(),
                    })
                    .collect();
                changed.then_some(PropertyValue::Multi(next))
            }
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Single(s) => write!(f, "{}", s),
            PropertyValue::Multi(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Single(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Single(s)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(items: Vec<&str>) -> Self {
        PropertyValue::Multi(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(items: Vec<String>) -> Self {
        PropertyValue::Multi(items)
    }
}

/// Type alias for property storage.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Helper macro to create property maps.
#[macro_export]
macro_rules! props {
    () => {
        $crate::Properties::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut map = $crate::Properties::new();
            $(
                map.insert($key.to_string(), $crate::PropertyValue::from($value));
            )+
            map
        }
    };
}

/// One `key=value` assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAssignment {
    pub name: String,
    pub value: PropertyValue,
}

impl PropertyAssignment {
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse a single `key=value` line. Lines without `=` or with an empty
    /// key yield `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (key, value) = line.trim().split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Self {
            name: key.to_string(),
            value: PropertyValue::parse(value),
        })
    }
}

impl fmt::Display for PropertyAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Parse newline-separated `key=value` lines, keeping their order.
pub fn parse_assignments(raw: &str) -> Vec<PropertyAssignment> {
    raw.lines().filter_map(PropertyAssignment::parse_line).collect()
}

/// Render assignments back to the newline-separated form.
pub fn format_assignments(assignments: &[PropertyAssignment]) -> String {
    assignments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a comma or newline separated name list; entries are trimmed and
/// empty entries dropped.
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
