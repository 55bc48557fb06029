//! Add operation - sets properties on matched nodes.

use nodemorph_core::{Node, PropertyAssignment, Repository};

use super::OpContext;
use crate::error::MutationResult;
use crate::result::ActionResult;

/// Set every assignment on `target`, overwriting existing values.
pub fn execute_add<R: Repository + ?Sized>(
    repo: &mut R,
    ctx: &OpContext,
    target: &Node,
    properties: &[PropertyAssignment],
) -> MutationResult<ActionResult> {
    let summary = properties
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    if ctx.dry_run {
        return Ok(ActionResult::success(
            target.path.to_string(),
            ctx.label,
            format!("Would set {}", summary),
        ));
    }

    for assignment in properties {
        repo.set_property(&target.path, &assignment.name, assignment.value.clone())?;
    }
    ctx.touch(repo, &target.path)?;

    Ok(ActionResult::success(
        target.path.to_string(),
        ctx.label,
        format!("Set {}", summary),
    ))
}
