//! Raw search input as an operator enters it.

use serde::{Deserialize, Serialize};

use crate::filter::RESULT_CAP;

/// Search form input. Every field may be blank; `FilterSpec::build` decides
/// which clauses the filled-in fields produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Root path of the search.
    pub path: String,
    /// Node-name pattern, or the property value when matching a property.
    pub query: String,
    /// Treat `query` as a property value instead of a node name.
    pub match_property: bool,
    /// Property compared against `query`.
    pub property_name: String,
    /// Compare by substring instead of equality.
    pub substring_match: bool,
    /// Restrict hits to pages.
    pub page_only: bool,
    /// Comma-separated projection list; blank selects title and type.
    pub properties: String,
    /// Show every hit property, not only the projection.
    pub verbose: bool,
    /// Maximum number of hits.
    pub limit: usize,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            path: String::new(),
            query: String::new(),
            match_property: false,
            property_name: String::new(),
            substring_match: false,
            page_only: false,
            properties: String::new(),
            verbose: false,
            limit: RESULT_CAP,
        }
    }
}

impl SearchCriteria {
    /// Criteria searching by node name below `path`.
    pub fn by_name(path: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: pattern.into(),
            ..Self::default()
        }
    }

    /// Criteria searching by property value below `path`.
    pub fn by_property(
        path: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            query: value.into(),
            match_property: true,
            property_name: property.into(),
            ..Self::default()
        }
    }

    pub fn substring(mut self) -> Self {
        self.substring_match = true;
        self
    }

    pub fn pages_only(mut self) -> Self {
        self.page_only = true;
        self
    }

    pub fn project(mut self, properties: impl Into<String>) -> Self {
        self.properties = properties.into();
        self
    }
}
