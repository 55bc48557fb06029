//! Copy operation - copies subtrees and property values.

use nodemorph_core::names::NT_UNSTRUCTURED;
use nodemorph_core::{Node, NodePath, Properties, Repository};

use super::OpContext;
use crate::error::MutationResult;
use crate::result::ActionResult;

/// Copy one explicitly named subtree. `source` and `target` resolve against
/// the scope path; the action is reported at the scope.
pub fn execute_copy_single<R: Repository + ?Sized>(
    repo: &mut R,
    ctx: &OpContext,
    scope: &NodePath,
    source: &str,
    target: &str,
    overwrite: bool,
) -> MutationResult<ActionResult> {
    let source_path = scope.resolve(source)?;
    let target_path = scope.resolve(target)?;
    copy_subtree(repo, ctx, scope, &source_path, &target_path, overwrite)
}

/// Copy the matched node itself to `target`, resolved against its parent.
pub fn execute_copy_node<R: Repository + ?Sized>(
    repo: &mut R,
    ctx: &OpContext,
    base: &Node,
    target: &str,
    overwrite: bool,
) -> MutationResult<ActionResult> {
    let parent = base.path.parent().unwrap_or_else(NodePath::root);
    let target_path = parent.resolve(target)?;
    copy_subtree(repo, ctx, &base.path, &base.path, &target_path, overwrite)
}

fn copy_subtree<R: Repository + ?Sized>(
    repo: &mut R,
    ctx: &OpContext,
    report_at: &NodePath,
    source: &NodePath,
    target: &NodePath,
    overwrite: bool,
) -> MutationResult<ActionResult> {
    let path = report_at.to_string();
    if !repo.exists(source) {
        return Ok(ActionResult::failed(
            path,
            ctx.label,
            format!("Source node not found: {}", source),
        ));
    }

    let parent = target.parent().unwrap_or_else(NodePath::root);
    if target.is_root() || !repo.exists(&parent) {
        return Ok(ActionResult::failed(
            path,
            ctx.label,
            format!("Target parent does not exist: {}", parent),
        ));
    }
    if target == source || target.is_descendant_of(source) || source.is_descendant_of(target) {
        return Ok(ActionResult::failed(
            path,
            ctx.label,
            format!("Cannot copy {} onto {}", source, target),
        ));
    }

    let exists = repo.exists(target);
    if exists && !overwrite {
        return Ok(ActionResult::failed(
            path,
            ctx.label,
            format!("Target already exists: {}", target),
        ));
    }

    if ctx.dry_run {
        return Ok(ActionResult::success(
            path,
            ctx.label,
            format!("Would copy node {} to {}", source, target),
        ));
    }

    if exists {
        repo.remove_node(target)?;
    }
    repo.copy_node(source, target)?;
    Ok(ActionResult::success(
        path,
        ctx.label,
        format!("Copied node {} to {}", source, target),
    ))
}

/// Copy property `source` of `node` to its property `target`.
pub fn execute_copy_property<R: Repository + ?Sized>(
    repo: &mut R,
    ctx: &OpContext,
    node: &Node,
    source: &str,
    target: &str,
    overwrite: bool,
) -> MutationResult<ActionResult> {
    let path = node.path.to_string();
    let Some(value) = node.value(source) else {
        return Ok(ActionResult::failed(
            path,
            ctx.label,
            format!("Source property not found: {}", source),
        ));
    };
    if node.has(target) && !overwrite {
        return Ok(ActionResult::failed(
            path,
            ctx.label,
            format!("Target property already exists: {}", target),
        ));
    }

    let change = format!("property {}={} to {}", source, value, target);
    if ctx.dry_run {
        return Ok(ActionResult::success(path, ctx.label, format!("Would copy {}", change)));
    }

    repo.set_property(&node.path, target, value)?;
    ctx.touch(repo, &node.path)?;
    Ok(ActionResult::success(path, ctx.label, format!("Copied {}", change)))
}

/// Copy property `source` of `base` to `child/path/prop` below it, creating
/// missing intermediate nodes as `nt:unstructured`.
pub fn execute_copy_to_path<R: Repository + ?Sized>(
    repo: &mut R,
    ctx: &OpContext,
    base: &Node,
    source: &str,
    target: &str,
    overwrite: bool,
) -> MutationResult<ActionResult> {
    let path = base.path.to_string();
    let Some(value) = base.value(source) else {
        return Ok(ActionResult::failed(
            path,
            ctx.label,
            format!("Source property not found: {}", source),
        ));
    };

    let (holder, prop) = match target.rsplit_once('/') {
        Some((dir, prop)) => (below(&base.path, dir)?, prop.trim()),
        None => (base.path.clone(), target.trim()),
    };
    if prop.is_empty() {
        return Ok(ActionResult::failed(
            path,
            ctx.label,
            format!("Invalid target property: {}", target),
        ));
    }

    let holder_exists = repo.exists(&holder);
    let taken = repo.get(&holder).is_some_and(|n| n.has(prop));
    if taken && !overwrite {
        return Ok(ActionResult::failed(
            path,
            ctx.label,
            format!("Target property already exists: {}/{}", holder, prop),
        ));
    }

    let change = format!("property {}={} to {}", source, value, target);
    if ctx.dry_run {
        let note = if holder_exists {
            String::new()
        } else {
            format!(" (creating {})", holder)
        };
        return Ok(ActionResult::success(
            path,
            ctx.label,
            format!("Would copy {}{}", change, note),
        ));
    }

    ensure_node(repo, &holder)?;
    repo.set_property(&holder, prop, value)?;
    ctx.touch(repo, &holder)?;
    Ok(ActionResult::success(path, ctx.label, format!("Copied {}", change)))
}

/// `dir` taken strictly below `base`; `..` and absolute paths are rejected.
fn below(base: &NodePath, dir: &str) -> MutationResult<NodePath> {
    let mut path = base.clone();
    for segment in dir.split('/') {
        path = path.child(segment.trim())?;
    }
    Ok(path)
}

/// Create `path` and any missing ancestors.
fn ensure_node<R: Repository + ?Sized>(repo: &mut R, path: &NodePath) -> MutationResult<()> {
    let mut missing = Vec::new();
    let mut cursor = path.clone();
    while !repo.exists(&cursor) {
        let Some(parent) = cursor.parent() else {
            break;
        };
        missing.push(cursor);
        cursor = parent;
    }

    for node_path in missing.into_iter().rev() {
        if let (Some(parent), Some(name)) = (node_path.parent(), node_path.name()) {
            repo.create_node(&parent, name, NT_UNSTRUCTURED, Properties::new())?;
        }
    }
    Ok(())
}
