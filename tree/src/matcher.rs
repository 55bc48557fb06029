//! Compiled query predicates.

use nodemorph_core::names::NT_BASE;
use nodemorph_core::{Node, NodePath, NodeQuery, PropertyOperation, TreeError, TreeResult};
use regex_lite::Regex;

/// How a property value is compared.
#[derive(Debug)]
enum ValueMatch {
    Exact(String),
    Pattern(Regex),
}

impl ValueMatch {
    fn is_match(&self, candidate: &str) -> bool {
        match self {
            ValueMatch::Exact(expected) => candidate == expected,
            ValueMatch::Pattern(regex) => regex.is_match(candidate),
        }
    }
}

/// A `NodeQuery` compiled for repeated evaluation against nodes.
#[derive(Debug)]
pub struct QueryMatcher {
    scope: NodePath,
    node_type: Option<String>,
    name: Option<Regex>,
    property: Option<(String, ValueMatch)>,
}

impl QueryMatcher {
    /// Compile the predicates of `query`.
    pub fn compile(query: &NodeQuery) -> TreeResult<Self> {
        let name = query
            .node_name
            .as_deref()
            .map(|glob| build_regex(&glob_to_regex(glob)))
            .transpose()?;

        let property = match &query.property {
            Some(predicate) => {
                let value = match predicate.operation {
                    PropertyOperation::Equals => ValueMatch::Exact(predicate.value.clone()),
                    PropertyOperation::Like => {
                        ValueMatch::Pattern(build_regex(&like_to_regex(&predicate.value))?)
                    }
                };
                Some((predicate.name.clone(), value))
            }
            None => None,
        };

        Ok(Self {
            scope: query.path.clone(),
            // nt:base is the supertype of every node
            node_type: query.node_type.clone().filter(|t| t != NT_BASE),
            name,
            property,
        })
    }

    /// The type a candidate must have, if restricted.
    pub fn node_type(&self) -> Option<&str> {
        self.node_type.as_deref()
    }

    /// Evaluate every predicate against `node`.
    pub fn matches(&self, node: &Node) -> bool {
        if !node.path.is_descendant_of(&self.scope) {
            return false;
        }

        if let Some(node_type) = &self.node_type {
            if &node.primary_type != node_type {
                return false;
            }
        }

        if let Some(name) = &self.name {
            if !name.is_match(node.name()) {
                return false;
            }
        }

        if let Some((prop, value_match)) = &self.property {
            let Some(value) = node.value(prop) else {
                return false;
            };
            if !value.items().into_iter().any(|item| value_match.is_match(item)) {
                return false;
            }
        }

        true
    }
}

fn build_regex(pattern: &str) -> TreeResult<Regex> {
    Regex::new(pattern).map_err(|e| TreeError::storage(format!("invalid pattern: {}", e)))
}

/// `*` matches any run of characters; the whole name must match.
fn glob_to_regex(glob: &str) -> String {
    let mut pattern = String::from("(?s)^");
    for c in glob.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            other => pattern.push_str(&regex_lite::escape(&other.to_string())),
        }
    }
    pattern.push('$');
    pattern
}

/// `%` matches any run of characters, `_` exactly one.
fn like_to_regex(like: &str) -> String {
    let mut pattern = String::from("(?s)^");
    for c in like.chars() {
        match c {
            '%' => pattern.push_str(".*"),
            '_' => pattern.push('.'),
            other => pattern.push_str(&regex_lite::escape(&other.to_string())),
        }
    }
    pattern.push('$');
    pattern
}
