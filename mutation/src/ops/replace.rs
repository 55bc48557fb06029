//! Replace operation - rewrites a property value.

use nodemorph_core::{Node, Repository};

use super::OpContext;
use crate::error::MutationResult;
use crate::result::ActionResult;

/// Replace `find` with `replace` in `prop_name`.
///
/// With `partial_match` every occurrence inside the value is replaced;
/// otherwise the value must equal `find`. A node without the property, or
/// whose value does not match, is skipped.
pub fn execute_replace<R: Repository + ?Sized>(
    repo: &mut R,
    ctx: &OpContext,
    target: &Node,
    prop_name: &str,
    find: &str,
    replace: &str,
    partial_match: bool,
) -> MutationResult<ActionResult> {
    let path = target.path.to_string();
    let Some(current) = target.value(prop_name) else {
        return Ok(ActionResult::skipped(path, ctx.label, format!("{} not set", prop_name)));
    };

    let Some(next) = current.substitute(find, replace, partial_match) else {
        let reason = if partial_match { "does not contain" } else { "does not match" };
        return Ok(ActionResult::skipped(
            path,
            ctx.label,
            format!("{} {} '{}'", prop_name, reason, find),
        ));
    };

    let change = format!("{}: {} → {}", prop_name, current, next);
    if ctx.dry_run {
        return Ok(ActionResult::success(path, ctx.label, format!("Would replace {}", change)));
    }

    repo.set_property(&target.path, prop_name, next)?;
    ctx.touch(repo, &target.path)?;
    Ok(ActionResult::success(path, ctx.label, format!("Replaced {}", change)))
}
