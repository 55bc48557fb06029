//! Core tree storage implementation.

use std::collections::BTreeMap;

use log::debug;
use nodemorph_core::names::PN_PRIMARY_TYPE;
use nodemorph_core::{
    validate_name, Node, NodePath, NodeQuery, Properties, PropertyValue, Repository, TreeError,
    TreeResult,
};

use crate::index::TypeIndex;
use crate::matcher::QueryMatcher;

/// Primary type of the root node.
pub const ROOT_TYPE: &str = "rep:root";

/// One consistent state of the tree.
#[derive(Debug, Clone)]
struct TreeState {
    /// Node storage, ordered by path (document order)
    nodes: BTreeMap<NodePath, Node>,
    /// Type index
    type_index: TypeIndex,
}

impl TreeState {
    fn new() -> Self {
        let root = Node::new(NodePath::root(), ROOT_TYPE);
        let mut state = Self {
            nodes: BTreeMap::new(),
            type_index: TypeIndex::new(),
        };
        state.type_index.insert(ROOT_TYPE, root.path.clone());
        state.nodes.insert(root.path.clone(), root);
        state
    }

    fn insert(&mut self, mut node: Node) {
        if let Some(primary_type) = node.properties.remove(PN_PRIMARY_TYPE) {
            node.primary_type = primary_type.joined();
        }
        self.type_index.insert(&node.primary_type, node.path.clone());
        self.nodes.insert(node.path.clone(), node);
    }

    /// The node at `root` followed by its whole subtree, in document order.
    fn subtree<'a>(&'a self, root: &'a NodePath) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes
            .range(root.clone()..)
            .take_while(move |(path, _)| *path == root || path.is_descendant_of(root))
            .map(|(_, node)| node)
    }
}

/// The in-memory tree store.
///
/// Reads and writes go to a working copy; `commit` publishes it and
/// `rollback` resets it to the last committed state.
#[derive(Debug, Clone)]
pub struct TreeStore {
    committed: TreeState,
    working: TreeState,
    dirty: bool,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeStore {
    /// Create a tree holding only the root node.
    pub fn new() -> Self {
        let state = TreeState::new();
        Self {
            committed: state.clone(),
            working: state,
            dirty: false,
        }
    }

    /// Insert a node whose parent already exists, replacing any node at the
    /// same path. Used to seed trees; the change is committed immediately.
    pub fn insert(&mut self, node: Node) -> TreeResult<()> {
        self.place(node)?;
        self.commit_state();
        Ok(())
    }

    /// Put a node into the working copy without committing.
    pub(crate) fn place(&mut self, node: Node) -> TreeResult<()> {
        let parent = node
            .path
            .parent()
            .ok_or_else(|| TreeError::invalid_path("/", "the root node cannot be replaced"))?;
        if !self.working.nodes.contains_key(&parent) {
            return Err(TreeError::ParentNotFound(parent));
        }

        if let Some(old) = self.working.nodes.get(&node.path) {
            let old_type = old.primary_type.clone();
            self.working.type_index.remove(&old_type, &node.path);
        }
        self.working.insert(node);
        self.dirty = true;
        Ok(())
    }

    /// Number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.working.nodes.len()
    }

    /// Returns true if there are uncommitted changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Direct children of `path`, in document order.
    pub fn children<'a>(&'a self, path: &'a NodePath) -> impl Iterator<Item = &'a Node> + 'a {
        self.working
            .subtree(path)
            .filter(move |node| node.path.depth() == path.depth() + 1)
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.working.nodes.values()
    }

    /// Direct children of `path` in the last committed state.
    pub(crate) fn committed_children<'a>(
        &'a self,
        path: &'a NodePath,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.committed
            .subtree(path)
            .filter(move |node| node.path.depth() == path.depth() + 1)
    }

    pub(crate) fn commit_state(&mut self) {
        self.committed = self.working.clone();
        self.dirty = false;
    }

    fn node_mut(&mut self, path: &NodePath) -> TreeResult<&mut Node> {
        self.working
            .nodes
            .get_mut(path)
            .ok_or_else(|| TreeError::NodeNotFound(path.clone()))
    }
}

impl Repository for TreeStore {
    fn find(&self, query: &NodeQuery) -> TreeResult<Vec<Node>> {
        let matcher = QueryMatcher::compile(query)?;
        let limit = query.limit.unwrap_or(usize::MAX);

        let found: Vec<Node> = match matcher.node_type() {
            Some(node_type) => self
                .working
                .type_index
                .get(node_type)
                .filter_map(|path| self.working.nodes.get(path))
                .filter(|node| matcher.matches(node))
                .take(limit)
                .cloned()
                .collect(),
            None => self
                .working
                .subtree(&query.path)
                .filter(|node| matcher.matches(node))
                .take(limit)
                .cloned()
                .collect(),
        };

        debug!("query under {} matched {} node(s)", query.path, found.len());
        Ok(found)
    }

    fn get(&self, path: &NodePath) -> Option<&Node> {
        self.working.nodes.get(path)
    }

    fn set_property(&mut self, path: &NodePath, name: &str, value: PropertyValue) -> TreeResult<()> {
        if name != PN_PRIMARY_TYPE {
            self.node_mut(path)?.set(name, value);
            self.dirty = true;
            return Ok(());
        }

        let PropertyValue::Single(primary_type) = value else {
            return Err(TreeError::protected(name, "set a multi-value"));
        };
        let node = self.node_mut(path)?;
        let old_type = std::mem::replace(&mut node.primary_type, primary_type.clone());
        self.working.type_index.remove(&old_type, path);
        self.working.type_index.insert(&primary_type, path.clone());
        debug!("{} retyped {} -> {}", path, old_type, primary_type);
        self.dirty = true;
        Ok(())
    }

    fn remove_property(&mut self, path: &NodePath, name: &str) -> TreeResult<Option<PropertyValue>> {
        if name == PN_PRIMARY_TYPE {
            return Err(TreeError::protected(name, "remove"));
        }
        let old = self.node_mut(path)?.remove(name);
        if old.is_some() {
            self.dirty = true;
        }
        Ok(old)
    }

    fn create_node(
        &mut self,
        parent: &NodePath,
        name: &str,
        primary_type: &str,
        properties: Properties,
    ) -> TreeResult<NodePath> {
        validate_name(name)?;
        if !self.working.nodes.contains_key(parent) {
            return Err(TreeError::ParentNotFound(parent.clone()));
        }

        let path = parent.child(name)?;
        if self.working.nodes.contains_key(&path) {
            return Err(TreeError::NodeExists(path));
        }

        let mut node = Node::new(path.clone(), primary_type);
        node.properties = properties;
        self.working.insert(node);
        self.dirty = true;
        Ok(path)
    }

    fn remove_node(&mut self, path: &NodePath) -> TreeResult<()> {
        if path.is_root() {
            return Err(TreeError::invalid_path("/", "the root node cannot be removed"));
        }
        if !self.working.nodes.contains_key(path) {
            return Err(TreeError::NodeNotFound(path.clone()));
        }

        let doomed: Vec<(NodePath, String)> = self
            .working
            .subtree(path)
            .map(|node| (node.path.clone(), node.primary_type.clone()))
            .collect();
        for (doomed_path, node_type) in doomed {
            self.working.type_index.remove(&node_type, &doomed_path);
            self.working.nodes.remove(&doomed_path);
        }
        self.dirty = true;
        Ok(())
    }

    fn copy_node(&mut self, source: &NodePath, target: &NodePath) -> TreeResult<()> {
        if !self.working.nodes.contains_key(source) {
            return Err(TreeError::NodeNotFound(source.clone()));
        }
        if target == source || target.is_descendant_of(source) {
            return Err(TreeError::invalid_path(
                target.to_string(),
                format!("cannot copy {} into itself", source),
            ));
        }
        let parent = target
            .parent()
            .ok_or_else(|| TreeError::invalid_path("/", "cannot copy onto the root"))?;
        if !self.working.nodes.contains_key(&parent) {
            return Err(TreeError::ParentNotFound(parent));
        }
        if self.working.nodes.contains_key(target) {
            return Err(TreeError::NodeExists(target.clone()));
        }

        let copies: Vec<Node> = self
            .working
            .subtree(source)
            .map(|node| {
                let relative = &node.path.segments()[source.depth()..];
                let mut path = target.clone();
                for segment in relative {
                    path = path.child(segment)?;
                }
                let mut copy = node.clone();
                copy.path = path;
                Ok(copy)
            })
            .collect::<TreeResult<_>>()?;

        debug!("copying {} node(s) from {} to {}", copies.len(), source, target);
        for copy in copies {
            self.working.insert(copy);
        }
        self.dirty = true;
        Ok(())
    }

    fn commit(&mut self) -> TreeResult<()> {
        self.commit_state();
        Ok(())
    }

    fn rollback(&mut self) {
        self.working = self.committed.clone();
        self.dirty = false;
    }
}
