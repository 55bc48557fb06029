//! Node structure of the content tree.

use serde::{Deserialize, Serialize};

use crate::names::{NT_PAGE, NT_PAGE_CONTENT, PN_LAST_MODIFIED, PN_PRIMARY_TYPE, PN_TITLE};
use crate::{NodePath, Properties, PropertyValue};

/// A node in the content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Absolute path, unique within the tree.
    pub path: NodePath,
    /// Primary node type.
    pub primary_type: String,
    /// Property values by name.
    pub properties: Properties,
}

impl Node {
    /// Create a node without properties.
    pub fn new(path: NodePath, primary_type: impl Into<String>) -> Self {
        Self {
            path,
            primary_type: primary_type.into(),
            properties: Properties::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(name, value.into());
        self
    }

    /// Node name (last path segment); empty for the root.
    pub fn name(&self) -> &str {
        self.path.name().unwrap_or("")
    }

    /// Optional title (`jcr:title`).
    pub fn title(&self) -> Option<&str> {
        self.get(PN_TITLE).and_then(PropertyValue::as_str)
    }

    /// Last-modified timestamp (`cq:lastModified`) if recorded.
    pub fn last_modified(&self) -> Option<&str> {
        self.get(PN_LAST_MODIFIED).and_then(PropertyValue::as_str)
    }

    /// Get a stored property by name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Get a property by name, treating `jcr:primaryType` as a property too.
    pub fn value(&self, name: &str) -> Option<PropertyValue> {
        if name == PN_PRIMARY_TYPE {
            return Some(PropertyValue::Single(self.primary_type.clone()));
        }
        self.properties.get(name).cloned()
    }

    /// Returns true if the property is set.
    pub fn has(&self, name: &str) -> bool {
        name == PN_PRIMARY_TYPE || self.properties.contains_key(name)
    }

    /// Set a property value. `jcr:primaryType` sets the primary type.
    pub fn set(&mut self, name: impl Into<String>, value: PropertyValue) {
        let name = name.into();
        if name == PN_PRIMARY_TYPE {
            self.primary_type = value.joined();
            return;
        }
        self.properties.insert(name, value);
    }

    /// Remove a property, returning its previous value. The primary type is
    /// never removed.
    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.properties.remove(name)
    }

    /// Returns true if this node is a page.
    pub fn is_page(&self) -> bool {
        self.primary_type == NT_PAGE
    }

    /// Returns true if this node holds page content.
    pub fn is_page_content(&self) -> bool {
        self.primary_type == NT_PAGE_CONTENT
    }
}
