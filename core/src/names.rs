//! Well-known property names and node types of the content tree.
//!
//! These constants keep the search, mutation and export layers in agreement
//! on the names the repository uses.

/// Pseudo-property carrying a hit's absolute path.
pub const PN_PATH: &str = "jcr:path";

/// Pseudo-property carrying a hit's node name.
pub const PN_NAME: &str = "name";

/// Primary node type.
pub const PN_PRIMARY_TYPE: &str = "jcr:primaryType";

/// Human readable title.
pub const PN_TITLE: &str = "jcr:title";

/// Timestamp of the last modification of page content.
pub const PN_LAST_MODIFIED: &str = "cq:lastModified";

/// User id of the last modification of page content.
pub const PN_LAST_MODIFIED_BY: &str = "cq:lastModifiedBy";

/// Name of the content child under a page.
pub const NN_CONTENT: &str = "jcr:content";

/// Page node type.
pub const NT_PAGE: &str = "cq:Page";

/// Page content node type.
pub const NT_PAGE_CONTENT: &str = "cq:PageContent";

/// Base type every node satisfies.
pub const NT_BASE: &str = "nt:base";

/// Default type for created nodes.
pub const NT_UNSTRUCTURED: &str = "nt:unstructured";
