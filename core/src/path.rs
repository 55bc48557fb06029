//! Absolute node paths.
//!
//! A path is an ordered sequence of segment names starting at the root.
//! Paths order segment by segment, so a parent always sorts directly before
//! its subtree and a sorted collection of paths is in document order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{TreeError, TreeResult};

/// Absolute path of a node in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// The root path `/`.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse an absolute path. A trailing slash is tolerated.
    pub fn parse(raw: &str) -> TreeResult<Self> {
        let trimmed = raw.trim();
        if !trimmed.starts_with('/') {
            return Err(TreeError::invalid_path(raw, "path must be absolute"));
        }

        let mut segments = Vec::new();
        let body = trimmed.trim_end_matches('/');
        for segment in body.split('/').skip(1) {
            validate_name(segment).map_err(|_| {
                TreeError::invalid_path(raw, format!("invalid segment '{}'", segment))
            })?;
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Path segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Name of the node (last segment); `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Parent path; `None` for the root.
    pub fn parent(&self) -> Option<NodePath> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Path of the child named `name`.
    pub fn child(&self, name: &str) -> TreeResult<NodePath> {
        validate_name(name)?;
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(Self { segments })
    }

    /// Returns true if `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &NodePath) -> bool {
        self.segments.len() > ancestor.segments.len()
            && self.segments[..ancestor.segments.len()] == ancestor.segments[..]
    }

    /// Resolve `relative` against this path.
    ///
    /// - `/abs/path` is taken as is
    /// - every leading `../` steps up one level
    /// - anything else is appended below `self`
    pub fn resolve(&self, relative: &str) -> TreeResult<NodePath> {
        let relative = relative.trim();
        if relative.starts_with('/') {
            return NodePath::parse(relative);
        }

        let mut base = self.clone();
        let mut rest = relative;
        loop {
            if rest == ".." || rest.starts_with("../") {
                base = base.parent().ok_or_else(|| {
                    TreeError::invalid_path(
                        relative,
                        format!("cannot resolve parent path beyond {}", self),
                    )
                })?;
                rest = rest.get(3..).unwrap_or("");
            } else {
                break;
            }
        }

        for segment in rest.split('/').filter(|s| !s.is_empty()) {
            base = base.child(segment)?;
        }
        Ok(base)
    }
}

/// Check that `name` is usable as a single path segment.
pub fn validate_name(name: &str) -> TreeResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(TreeError::invalid_name(name));
    }
    Ok(())
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodePath::parse(s)
    }
}

impl TryFrom<String> for NodePath {
    type Error = TreeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NodePath::parse(&value)
    }
}

impl From<NodePath> for String {
    fn from(path: NodePath) -> Self {
        path.to_string()
    }
}
