//! Indexes for efficient tree lookups.

use nodemorph_core::NodePath;
use std::collections::{BTreeSet, HashMap};

/// Type index: primary type -> ordered set of paths
#[derive(Debug, Default, Clone)]
pub struct TypeIndex {
    index: HashMap<String, BTreeSet<NodePath>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node_type: &str, path: NodePath) {
        self.index.entry(node_type.to_string()).or_default().insert(path);
    }

    pub fn remove(&mut self, node_type: &str, path: &NodePath) {
        if let Some(set) = self.index.get_mut(node_type) {
            set.remove(path);
            if set.is_empty() {
                self.index.remove(node_type);
            }
        }
    }

    /// Paths of the given type, in document order.
    pub fn get(&self, node_type: &str) -> impl Iterator<Item = &NodePath> + '_ {
        self.index.get(node_type).into_iter().flat_map(|set| set.iter())
    }
}
