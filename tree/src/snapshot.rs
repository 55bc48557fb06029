//! Nested JSON snapshots of a tree.
//!
//! A snapshot is one JSON object per node. Scalar members are properties,
//! arrays are multi-value properties and object members are child nodes:
//!
//! ```json
//! { "content": { "jcr:primaryType": "cq:Page",
//!                "jcr:content": { "jcr:title": "Home", "tags": ["a", "b"] } } }
//! ```
//!
//! A node without `jcr:primaryType` is `nt:unstructured`.

use std::fs;
use std::path::Path;

use log::info;
use nodemorph_core::names::{NT_UNSTRUCTURED, PN_PRIMARY_TYPE};
use nodemorph_core::{Node, NodePath, PropertyValue, TreeError, TreeResult};
use serde_json::{Map, Value};

use crate::store::TreeStore;

impl TreeStore {
    /// Build a tree from a nested JSON object describing the root's children.
    pub fn from_json(value: &Value) -> TreeResult<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| TreeError::storage("snapshot root must be a JSON object"))?;

        let mut store = TreeStore::new();
        for (name, member) in root {
            if let Value::Object(child) = member {
                let path = NodePath::root().child(name)?;
                read_node(&mut store, path, child)?;
            }
        }
        store.commit_state();
        Ok(store)
    }

    /// Render the committed tree as nested JSON.
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        let root_path = NodePath::root();
        for node in self.committed_children(&root_path) {
            root.insert(node.name().to_string(), self.write_node(node));
        }
        Value::Object(root)
    }

    /// Load a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> TreeResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| TreeError::storage(format!("cannot read {}: {}", path.display(), e)))?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| TreeError::storage(format!("cannot parse {}: {}", path.display(), e)))?;
        let store = Self::from_json(&value)?;
        info!("loaded {} node(s) from {}", store.node_count(), path.display());
        Ok(store)
    }

    /// Write the committed tree to a snapshot file.
    pub fn save(&self, path: impl AsRef<Path>) -> TreeResult<()> {
        let path = path.as_ref();
        let raw = serde_json::to_string_pretty(&self.to_json())
            .map_err(|e| TreeError::storage(e.to_string()))?;
        fs::write(path, raw)
            .map_err(|e| TreeError::storage(format!("cannot write {}: {}", path.display(), e)))?;
        info!("saved snapshot to {}", path.display());
        Ok(())
    }

    fn write_node(&self, node: &Node) -> Value {
        let mut object = Map::new();
        object.insert(PN_PRIMARY_TYPE.to_string(), Value::String(node.primary_type.clone()));
        for (name, value) in node.properties.iter().filter(|(name, _)| *name != PN_PRIMARY_TYPE) {
            let json = match value {
                PropertyValue::Single(s) => Value::String(s.clone()),
                PropertyValue::Multi(items) => {
                    Value::Array(items.iter().cloned().map(Value::String).collect())
                }
            };
            object.insert(name.clone(), json);
        }
        for child in self.committed_children(&node.path) {
            object.insert(child.name().to_string(), self.write_node(child));
        }
        Value::Object(object)
    }
}

fn read_node(store: &mut TreeStore, path: NodePath, object: &Map<String, Value>) -> TreeResult<()> {
    let primary_type = object
        .get(PN_PRIMARY_TYPE)
        .and_then(Value::as_str)
        .unwrap_or(NT_UNSTRUCTURED);
    let mut node = Node::new(path.clone(), primary_type);
    let mut children = Vec::new();

    for (name, member) in object {
        if name == PN_PRIMARY_TYPE {
            continue;
        }
        match member {
            Value::Object(child) => children.push((name, child)),
            Value::Array(items) => {
                let items = items.iter().map(scalar_to_string).collect();
                node.set(name.clone(), PropertyValue::Multi(items));
            }
            Value::Null => {}
            scalar => node.set(name.clone(), PropertyValue::Single(scalar_to_string(scalar))),
        }
    }

    store.place(node)?;
    for (name, child) in children {
        read_node(store, path.child(name)?, child)?;
    }
    Ok(())
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
