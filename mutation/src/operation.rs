//! The mutation operation model.
//!
//! A `MutationOperation` is built per request, either directly or from the
//! update form (`from_form`), and handed to the executor unchanged.

use std::collections::HashMap;
use std::fmt;

use nodemorph_core::names::NT_PAGE;
use nodemorph_core::{
    format_assignments, parse_assignments, parse_name_list, validate_name, Node, NodePath,
    NodeQuery, PropertyAssignment, PropertyPredicate,
};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{MutationError, MutationResult};

/// Which nodes an Add applies to, beyond scope and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchCondition {
    /// Every candidate.
    All,
    /// The property equals the value.
    Property { name: String, value: String },
    /// The node name matches the glob (`*` wildcard).
    NodeName(String),
}

impl MatchCondition {
    /// Check the condition against a node.
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            MatchCondition::All => true,
            MatchCondition::Property { name, value } => {
                node.value(name).is_some_and(|current| current.matches(value))
            }
            MatchCondition::NodeName(glob) => glob_matches(glob, node.name()),
        }
    }
}

fn glob_matches(glob: &str, name: &str) -> bool {
    if !glob.contains('*') {
        return glob == name;
    }
    let pattern = glob
        .split('*')
        .map(regex_lite::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("(?s)^{}$", pattern))
        .map(|re| re.is_match(name))
        .unwrap_or(false)
}

/// What a Copy copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CopyType {
    /// A whole subtree.
    Node,
    /// One property to another property of the same node.
    Property,
    /// One property to `child/prop` below the node.
    PropertyToPath,
}

impl CopyType {
    pub fn parse(raw: &str) -> MutationResult<Self> {
        match raw.trim() {
            "node" => Ok(CopyType::Node),
            "property" => Ok(CopyType::Property),
            "propertyToPath" => Ok(CopyType::PropertyToPath),
            other => Err(MutationError::unknown_copy_type(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyType::Node => "node",
            CopyType::Property => "property",
            CopyType::PropertyToPath => "propertyToPath",
        }
    }
}

/// Variant-specific payload of a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Add {
        condition: MatchCondition,
        properties: Vec<PropertyAssignment>,
    },
    Delete {
        prop_names: Vec<String>,
    },
    Replace {
        prop_name: String,
        find: String,
        replace: String,
        partial_match: bool,
    },
    Copy {
        copy_type: CopyType,
        source: String,
        target: String,
        /// Replace an existing target instead of failing.
        overwrite: bool,
    },
    Create {
        new_node_name: String,
        new_node_type: String,
        /// Every assignment must equal the parent's property.
        parent_condition: Vec<PropertyAssignment>,
        properties: Vec<PropertyAssignment>,
    },
}

impl OperationKind {
    /// Wire name (`operation` form field).
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Add { .. } => "add",
            OperationKind::Delete { .. } => "delete",
            OperationKind::Replace { .. } => "replace",
            OperationKind::Copy { .. } => "copy",
            OperationKind::Create { .. } => "create",
        }
    }

    /// Action label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Add { .. } => "Add",
            OperationKind::Delete { .. } => "Delete",
            OperationKind::Replace { .. } => "Replace",
            OperationKind::Copy { .. } => "Copy",
            OperationKind::Create { .. } => "Create",
        }
    }
}

/// A bulk mutation over the nodes below `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOperation {
    /// Scope path.
    pub path: String,
    /// Only pages are candidates; they are changed through `jcr:content`.
    pub page_only: bool,
    pub dry_run: bool,
    pub kind: OperationKind,
}

impl fmt::Display for MutationOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} under {}", self.kind.name(), self.path)?;
        if self.page_only {
            write!(f, " (pages)")?;
        }
        if self.dry_run {
            write!(f, " [dry run]")?;
        }
        Ok(())
    }
}

fn flag(form: &HashMap<String, String>, key: &str) -> bool {
    form.get(key)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

fn text<'f>(form: &'f HashMap<String, String>, key: &str) -> Option<&'f str> {
    form.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn required<'f>(form: &'f HashMap<String, String>, key: &str) -> MutationResult<&'f str> {
    text(form, key).ok_or_else(|| MutationError::missing_field(key))
}

impl MutationOperation {
    pub fn new(path: impl Into<String>, kind: OperationKind) -> Self {
        Self {
            path: path.into(),
            page_only: false,
            dry_run: false,
            kind,
        }
    }

    pub fn pages_only(mut self) -> Self {
        self.page_only = true;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Decode the update form.
    pub fn from_form(form: &HashMap<String, String>) -> MutationResult<Self> {
        let path = required(form, "path")?.to_string();
        let operation = required(form, "operation")?;

        let kind = match operation {
            "add" => {
                let condition = match text(form, "matchType") {
                    Some("property") => match text(form, "ifProp") {
                        Some(name) => MatchCondition::Property {
                            name: name.to_string(),
                            value: text(form, "ifValue").unwrap_or_default().to_string(),
                        },
                        None => MatchCondition::All,
                    },
                    Some("node") => match text(form, "jcrNodeName") {
                        Some(name) => MatchCondition::NodeName(name.to_string()),
                        None => MatchCondition::All,
                    },
                    _ => MatchCondition::All,
                };
                OperationKind::Add {
                    condition,
                    properties: parse_assignments(text(form, "properties").unwrap_or_default()),
                }
            }
            "delete" => OperationKind::Delete {
                prop_names: parse_name_list(text(form, "propNames").unwrap_or_default()),
            },
            "replace" => OperationKind::Replace {
                prop_name: required(form, "propName")?.to_string(),
                find: required(form, "find")?.to_string(),
                replace: form
                    .get("replace")
                    .ok_or_else(|| MutationError::missing_field("replace"))?
                    .trim()
                    .to_string(),
                partial_match: flag(form, "partialMatch"),
            },
            "copy" => OperationKind::Copy {
                copy_type: CopyType::parse(required(form, "copyType")?)?,
                source: required(form, "source")?.to_string(),
                target: required(form, "target")?.to_string(),
                overwrite: flag(form, "overwrite"),
            },
            "create" => OperationKind::Create {
                new_node_name: required(form, "newNodeName")?.to_string(),
                new_node_type: text(form, "newNodeType")
                    .unwrap_or(nodemorph_core::names::NT_UNSTRUCTURED)
                    .to_string(),
                parent_condition: parse_assignments(
                    text(form, "parentMatchCondition").unwrap_or_default(),
                ),
                properties: parse_assignments(text(form, "newNodeProperties").unwrap_or_default()),
            },
            other => return Err(MutationError::unknown_operation(other)),
        };

        Ok(Self {
            path,
            page_only: flag(form, "pageOnly"),
            dry_run: flag(form, "dryRun"),
            kind,
        })
    }

    /// Encode as update form fields.
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form: Vec<(&str, String)> = vec![
            ("path", self.path.clone()),
            ("operation", self.kind.name().to_string()),
            ("pageOnly", self.page_only.to_string()),
            ("dryRun", self.dry_run.to_string()),
        ];

        match &self.kind {
            OperationKind::Add {
                condition,
                properties,
            } => {
                match condition {
                    MatchCondition::All => {}
                    MatchCondition::Property { name, value } => {
                        form.push(("matchType", "property".to_string()));
                        form.push(("ifProp", name.clone()));
                        form.push(("ifValue", value.clone()));
                    }
                    MatchCondition::NodeName(name) => {
                        form.push(("matchType", "node".to_string()));
                        form.push(("jcrNodeName", name.clone()));
                    }
                }
                form.push(("properties", format_assignments(properties)));
            }
            OperationKind::Delete { prop_names } => {
                form.push(("propNames", prop_names.join(", ")));
            }
            OperationKind::Replace {
                prop_name,
                find,
                replace,
                partial_match,
            } => {
                form.push(("propName", prop_name.clone()));
                form.push(("find", find.clone()));
                form.push(("replace", replace.clone()));
                form.push(("partialMatch", partial_match.to_string()));
            }
            OperationKind::Copy {
                copy_type,
                source,
                target,
                overwrite,
            } => {
                form.push(("copyType", copy_type.as_str().to_string()));
                form.push(("source", source.clone()));
                form.push(("target", target.clone()));
                form.push(("overwrite", overwrite.to_string()));
            }
            OperationKind::Create {
                new_node_name,
                new_node_type,
                parent_condition,
                properties,
            } => {
                form.push(("newNodeName", new_node_name.clone()));
                form.push(("newNodeType", new_node_type.clone()));
                form.push(("parentMatchCondition", format_assignments(parent_condition)));
                form.push(("newNodeProperties", format_assignments(properties)));
            }
        }

        form.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    /// The parsed scope path.
    pub fn scope(&self) -> MutationResult<NodePath> {
        if self.path.trim().is_empty() {
            return Err(MutationError::missing_field("path"));
        }
        NodePath::parse(&self.path).map_err(|e| MutationError::validation(e.to_string()))
    }

    /// Check the operation before touching the repository.
    pub fn validate(&self) -> MutationResult<()> {
        self.scope()?;

        match &self.kind {
            OperationKind::Add { properties, .. } => {
                if properties.is_empty() {
                    return Err(MutationError::missing_field("properties"));
                }
            }
            OperationKind::Delete { prop_names } => {
                if prop_names.is_empty() {
                    return Err(MutationError::missing_field("propNames"));
                }
            }
            OperationKind::Replace {
                prop_name, find, ..
            } => {
                if prop_name.is_empty() {
                    return Err(MutationError::missing_field("propName"));
                }
                if prop_name.contains('/') || prop_name.contains(' ') {
                    return Err(MutationError::validation(format!(
                        "Invalid property name: {} (slashes or spaces not allowed)",
                        prop_name
                    )));
                }
                if find.is_empty() {
                    return Err(MutationError::missing_field("find"));
                }
            }
            OperationKind::Copy {
                copy_type,
                source,
                target,
                ..
            } => {
                if source.trim().is_empty() {
                    return Err(MutationError::missing_field("source"));
                }
                if target.trim().is_empty() {
                    return Err(MutationError::missing_field("target"));
                }
                if *copy_type == CopyType::PropertyToPath {
                    let escapes = target.starts_with('/')
                        || target.split('/').any(|s| matches!(s.trim(), "" | "." | ".."));
                    if escapes {
                        return Err(MutationError::validation(format!(
                            "Invalid target path '{}': must be a child path below the matched node",
                            target
                        )));
                    }
                }
            }
            OperationKind::Create { new_node_name, .. } => {
                validate_name(new_node_name).map_err(|_| {
                    MutationError::validation(format!("Invalid node name: '{}'", new_node_name))
                })?;
            }
        }
        Ok(())
    }

    /// A node Copy whose source is an explicit path runs once against the
    /// scope instead of once per candidate.
    pub fn is_single_copy(&self) -> bool {
        matches!(
            &self.kind,
            OperationKind::Copy { copy_type: CopyType::Node, source, .. } if source.contains('/')
        )
    }

    /// The repository query resolving the candidate nodes.
    ///
    /// Scope and page restriction always apply. An Add condition is pushed
    /// down unless pages are targeted (the page's own properties live on its
    /// content node), and a node Copy by name selects nodes of that name.
    pub fn candidate_query(&self) -> MutationResult<NodeQuery> {
        let mut query = NodeQuery::under(self.scope()?);
        if self.page_only {
            query = query.of_type(NT_PAGE);
        }

        match &self.kind {
            OperationKind::Add { condition, .. } if !self.page_only => match condition {
                MatchCondition::Property { name, value } => {
                    query = query.with_property(PropertyPredicate::equals(name, value));
                }
                MatchCondition::NodeName(glob) => query = query.named(glob.clone()),
                MatchCondition::All => {}
            },
            OperationKind::Copy {
                copy_type: CopyType::Node,
                source,
                ..
            } => query = query.named(source.clone()),
            _ => {}
        }
        Ok(query)
    }
}
