//! Mutation operation implementations.
//!
//! Each operation (Add, Delete, Replace, Copy, Create) is implemented in its
//! own module. Operations decide the outcome for one node and return it as
//! an `ActionResult`; an `Err` is turned into a `Failed` action by the
//! executor. Under dry-run no operation calls a mutating repository method.

mod add;
mod copy;
mod create;
mod delete;
mod replace;

pub use add::execute_add;
pub use copy::{execute_copy_node, execute_copy_property, execute_copy_single, execute_copy_to_path};
pub use create::{execute_create, parent_matches};
pub use delete::execute_delete;
pub use replace::execute_replace;

use nodemorph_core::names::{PN_LAST_MODIFIED, PN_LAST_MODIFIED_BY};
use nodemorph_core::{NodePath, PropertyValue, Repository};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::{MutationError, MutationResult};

/// Per-execution state shared by the operations.
pub struct OpContext {
    pub dry_run: bool,
    /// Action label for every result.
    pub label: &'static str,
    user_id: String,
    timestamp: String,
}

impl OpContext {
    pub fn new(label: &'static str, dry_run: bool, user_id: impl Into<String>) -> MutationResult<Self> {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| MutationError::timestamp(e.to_string()))?;
        Ok(Self {
            dry_run,
            label,
            user_id: user_id.into(),
            timestamp,
        })
    }

    /// Record the modification on page content nodes.
    pub fn touch<R: Repository + ?Sized>(&self, repo: &mut R, path: &NodePath) -> MutationResult<()> {
        let is_page_content = repo.get(path).is_some_and(|node| node.is_page_content());
        if is_page_content {
            repo.set_property(path, PN_LAST_MODIFIED, PropertyValue::from(self.timestamp.as_str()))?;
            repo.set_property(path, PN_LAST_MODIFIED_BY, PropertyValue::from(self.user_id.as_str()))?;
        }
        Ok(())
    }
}
