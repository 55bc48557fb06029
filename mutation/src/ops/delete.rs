//! Delete operation - removes listed properties.

use nodemorph_core::names::PN_PRIMARY_TYPE;
use nodemorph_core::{Node, Repository, TreeError};

use super::OpContext;
use crate::error::MutationResult;
use crate::result::ActionResult;

/// Remove each listed property that `target` carries. A node carrying none
/// of them is skipped; listing `jcr:primaryType` fails the node.
pub fn execute_delete<R: Repository + ?Sized>(
    repo: &mut R,
    ctx: &OpContext,
    target: &Node,
    prop_names: &[String],
) -> MutationResult<ActionResult> {
    let present: Vec<&str> = prop_names
        .iter()
        .map(String::as_str)
        .filter(|name| target.has(name))
        .collect();

    let path = target.path.to_string();
    if present.contains(&PN_PRIMARY_TYPE) {
        let reason = TreeError::protected(PN_PRIMARY_TYPE, "remove");
        return Ok(ActionResult::failed(path, ctx.label, reason.to_string()));
    }
    if present.is_empty() {
        return Ok(ActionResult::skipped(path, ctx.label, "No listed properties present"));
    }

    if ctx.dry_run {
        return Ok(ActionResult::success(
            path,
            ctx.label,
            format!("Would delete {}", present.join(", ")),
        ));
    }

    for name in &present {
        repo.remove_property(&target.path, name)?;
    }
    ctx.touch(repo, &target.path)?;

    Ok(ActionResult::success(
        path,
        ctx.label,
        format!("Deleted {}", present.join(", ")),
    ))
}
