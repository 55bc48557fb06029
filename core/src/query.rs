//! Engine-level query predicates.
//!
//! A `NodeQuery` is the set of predicates a tree engine evaluates natively:
//! scope path, node type, node-name glob and one property predicate. Both
//! the search layer and the mutation planner resolve nodes through it.

use serde::{Deserialize, Serialize};

use crate::NodePath;

/// How a property predicate compares values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyOperation {
    /// Exact string equality.
    Equals,
    /// `like` pattern: `%` is any run of characters, `_` exactly one.
    Like,
}

/// Property predicate: `name` compared to `value` with `operation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyPredicate {
    pub name: String,
    pub value: String,
    pub operation: PropertyOperation,
}

impl PropertyPredicate {
    pub fn equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            operation: PropertyOperation::Equals,
        }
    }

    pub fn like(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: pattern.into(),
            operation: PropertyOperation::Like,
        }
    }
}

/// Predicates for one repository query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeQuery {
    /// Only strict descendants of this path match.
    pub path: NodePath,
    /// Required primary type.
    pub node_type: Option<String>,
    /// Node-name glob (`*` wildcard).
    pub node_name: Option<String>,
    /// Property predicate.
    pub property: Option<PropertyPredicate>,
    /// Maximum number of results; `None` is unlimited.
    pub limit: Option<usize>,
}

impl NodeQuery {
    /// Query every node below `path`.
    pub fn under(path: NodePath) -> Self {
        Self {
            path,
            node_type: None,
            node_name: None,
            property: None,
            limit: None,
        }
    }

    pub fn of_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    pub fn named(mut self, glob: impl Into<String>) -> Self {
        self.node_name = Some(glob.into());
        self
    }

    pub fn with_property(mut self, predicate: PropertyPredicate) -> Self {
        self.property = Some(predicate);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Native query-builder parameters for this query, in a stable order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("path".to_string(), self.path.to_string())];

        if let Some(node_type) = &self.node_type {
            params.push(("type".to_string(), node_type.clone()));
        }
        if let Some(node_name) = &self.node_name {
            params.push(("nodename".to_string(), node_name.clone()));
        }
        if let Some(property) = &self.property {
            params.push(("property".to_string(), property.name.clone()));
            params.push(("property.value".to_string(), property.value.clone()));
            if property.operation == PropertyOperation::Like {
                params.push(("property.operation".to_string(), "like".to_string()));
            }
        }

        let limit = self
            .limit
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-1".to_string());
        params.push(("p.limit".to_string(), limit));
        params
    }
}
