//! Create operation - adds a child node under matched parents.

use nodemorph_core::{Node, Properties, PropertyAssignment, PropertyValue, Repository};

use super::OpContext;
use crate::error::MutationResult;
use crate::result::ActionResult;

/// Returns true if every condition assignment equals the parent's property.
/// An empty condition matches every parent.
pub fn parent_matches(condition: &[PropertyAssignment], parent: &Node) -> bool {
    condition.iter().all(|assignment| {
        let Some(current) = parent.value(&assignment.name) else {
            return false;
        };
        match &assignment.value {
            PropertyValue::Single(expected) => current.matches(expected),
            multi => &current == multi,
        }
    })
}

/// Create `name` of type `node_type` under `parent` with the initial
/// properties. An existing child of that name is skipped.
pub fn execute_create<R: Repository + ?Sized>(
    repo: &mut R,
    ctx: &OpContext,
    parent: &Node,
    name: &str,
    node_type: &str,
    properties: &[PropertyAssignment],
) -> MutationResult<ActionResult> {
    let child = parent.path.child(name)?;
    if repo.exists(&child) {
        return Ok(ActionResult::skipped(
            child.to_string(),
            ctx.label,
            "Node already exists",
        ));
    }

    if ctx.dry_run {
        return Ok(ActionResult::success(
            child.to_string(),
            ctx.label,
            format!("Would create {}", node_type),
        ));
    }

    let initial: Properties = properties
        .iter()
        .map(|a| (a.name.clone(), a.value.clone()))
        .collect();
    let created = repo.create_node(&parent.path, name, node_type, initial)?;
    Ok(ActionResult::success(
        created.to_string(),
        ctx.label,
        format!("Created node of type {}", node_type),
    ))
}
