//! Command-line arguments.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};
use nodemorph_query::{SearchCriteria, CSV_FILE_NAME, RESULT_CAP};

#[derive(Debug, Parser)]
#[command(bin_name = "nodemorph")]
#[command(version)]
#[command(about = "Bulk search and mutation of content repository nodes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Only print errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log per-node decisions
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find nodes by name or property value
    Search {
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Add, delete, replace, copy or create across matched nodes
    Update {
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        update: UpdateArgs,
    },
    /// Search and write the hits as CSV
    Export {
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        export: ExportArgs,
    },
}

/// Where commands run.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Local JSON snapshot of the content tree
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with_all = ["url", "config"])]
    pub store: Option<PathBuf>,

    /// Base URL of a remote instance
    #[arg(long, value_hint = ValueHint::Url)]
    pub url: Option<String>,

    /// YAML client configuration
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// User for basic auth, or recorded as last modifier on a local store
    #[arg(long)]
    pub user: Option<String>,

    /// Password for basic auth
    #[arg(long, requires = "user")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Root path of the search
    #[arg(long)]
    pub path: String,

    /// Node-name pattern (`*` wildcard), or the value with --property
    pub query: String,

    /// Match this property's value instead of the node name
    #[arg(long)]
    pub property: Option<String>,

    /// Substring match on the property value
    #[arg(long, requires = "property")]
    pub contains: bool,

    /// Only pages
    #[arg(long)]
    pub pages: bool,

    /// Comma-separated properties to show
    #[arg(long = "props")]
    pub properties: Option<String>,

    /// Maximum number of hits
    #[arg(long, default_value_t = RESULT_CAP)]
    pub limit: usize,

    /// Show every property of each hit
    #[arg(long)]
    pub full: bool,
}

impl SearchArgs {
    pub fn to_criteria(&self) -> SearchCriteria {
        SearchCriteria {
            path: self.path.clone(),
            query: self.query.clone(),
            match_property: self.property.is_some(),
            property_name: self.property.clone().unwrap_or_default(),
            substring_match: self.contains,
            page_only: self.pages,
            properties: self.properties.clone().unwrap_or_default(),
            verbose: self.full,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Output file
    #[arg(short, long, default_value = CSV_FILE_NAME, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
}

/// Update request fields. Each flag maps onto one field of the update form.
#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Scope path
    #[arg(long)]
    pub path: String,

    /// add, delete, replace, copy or create
    pub operation: String,

    /// Add: `property` or `node` condition
    #[arg(long)]
    pub match_type: Option<String>,

    /// Add: property the condition checks
    #[arg(long)]
    pub if_prop: Option<String>,

    /// Add: value the condition expects
    #[arg(long)]
    pub if_value: Option<String>,

    /// Add: node-name condition (`*` wildcard)
    #[arg(long)]
    pub node_name: Option<String>,

    /// Add: `key=value` to set (repeatable)
    #[arg(short = 'p', long = "property")]
    pub properties: Vec<String>,

    /// Delete: comma-separated property names
    #[arg(long)]
    pub prop_names: Option<String>,

    /// Replace: property to rewrite
    #[arg(long)]
    pub prop_name: Option<String>,

    /// Replace: value to find
    #[arg(long)]
    pub find: Option<String>,

    /// Replace: replacement value
    #[arg(long)]
    pub replace: Option<String>,

    /// Replace: substring instead of whole-value match
    #[arg(long)]
    pub partial_match: bool,

    /// Copy: node, property or propertyToPath
    #[arg(long)]
    pub copy_type: Option<String>,

    /// Copy: source node or property
    #[arg(long)]
    pub source: Option<String>,

    /// Copy: target node, property or child path
    #[arg(long)]
    pub target: Option<String>,

    /// Copy: replace an existing target
    #[arg(long)]
    pub overwrite: bool,

    /// Create: name of the new child
    #[arg(long)]
    pub new_node_name: Option<String>,

    /// Create: primary type of the new child
    #[arg(long)]
    pub new_node_type: Option<String>,

    /// Create: `key=value` the parent must carry (repeatable)
    #[arg(long = "parent-match")]
    pub parent_match: Vec<String>,

    /// Create: `key=value` set on the new child (repeatable)
    #[arg(long = "node-property")]
    pub node_properties: Vec<String>,

    /// Only pages
    #[arg(long)]
    pub pages: bool,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl UpdateArgs {
    /// The update form these flags describe.
    pub fn to_form(&self) -> HashMap<String, String> {
        let mut form = HashMap::new();
        let mut put = |key: &str, value: Option<&String>| {
            if let Some(value) = value {
                form.insert(key.to_string(), value.clone());
            }
        };

        put("path", Some(&self.path));
        put("operation", Some(&self.operation.to_ascii_lowercase()));
        put("matchType", self.match_type.as_ref());
        put("ifProp", self.if_prop.as_ref());
        put("ifValue", self.if_value.as_ref());
        put("jcrNodeName", self.node_name.as_ref());
        put("propNames", self.prop_names.as_ref());
        put("propName", self.prop_name.as_ref());
        put("find", self.find.as_ref());
        put("replace", self.replace.as_ref());
        put("copyType", self.copy_type.as_ref());
        put("source", self.source.as_ref());
        put("target", self.target.as_ref());
        put("newNodeName", self.new_node_name.as_ref());
        put("newNodeType", self.new_node_type.as_ref());

        let lines = [
            ("properties", &self.properties),
            ("parentMatchCondition", &self.parent_match),
            ("newNodeProperties", &self.node_properties),
        ];
        for (key, values) in lines {
            if !values.is_empty() {
                form.insert(key.to_string(), values.join("\n"));
            }
        }

        let flags = [
            ("partialMatch", self.partial_match),
            ("overwrite", self.overwrite),
            ("pageOnly", self.pages),
            ("dryRun", self.dry_run),
        ];
        for (key, set) in flags {
            form.insert(key.to_string(), set.to_string());
        }
        form
    }
}
