//! The repository surface the query and mutation layers drive.

use crate::{Node, NodePath, NodeQuery, Properties, PropertyValue, TreeResult};

/// A hierarchical, property-bearing tree store.
///
/// Mutating methods act on a pending change set that becomes durable only
/// on `commit`; `rollback` discards it.
pub trait Repository {
    /// Nodes matching `query`, in document order.
    fn find(&self, query: &NodeQuery) -> TreeResult<Vec<Node>>;

    /// Get a node by path.
    fn get(&self, path: &NodePath) -> Option<&Node>;

    /// Returns true if a node exists at `path`.
    fn exists(&self, path: &NodePath) -> bool {
        self.get(path).is_some()
    }

    /// Set (or overwrite) a property.
    fn set_property(&mut self, path: &NodePath, name: &str, value: PropertyValue) -> TreeResult<()>;

    /// Remove a property, returning the old value if it was set.
    fn remove_property(&mut self, path: &NodePath, name: &str) -> TreeResult<Option<PropertyValue>>;

    /// Create a child node under `parent`.
    fn create_node(
        &mut self,
        parent: &NodePath,
        name: &str,
        primary_type: &str,
        properties: Properties,
    ) -> TreeResult<NodePath>;

    /// Remove the node at `path` and its whole subtree.
    fn remove_node(&mut self, path: &NodePath) -> TreeResult<()>;

    /// Copy the subtree rooted at `source` to `target`. The parent of
    /// `target` must exist and `target` itself must not.
    fn copy_node(&mut self, source: &NodePath, target: &NodePath) -> TreeResult<()>;

    /// Make pending changes durable.
    fn commit(&mut self) -> TreeResult<()>;

    /// Discard pending changes.
    fn rollback(&mut self);
}
