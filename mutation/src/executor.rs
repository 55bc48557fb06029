//! Mutation executor - coordinates mutation operations.
//!
//! The executor resolves candidates and delegates each node to the
//! operation modules in `ops/`:
//! - `ops/add.rs` - Add (set properties)
//! - `ops/delete.rs` - Delete (remove properties)
//! - `ops/replace.rs` - Replace (rewrite a property value)
//! - `ops/copy.rs` - Copy (subtrees and property values)
//! - `ops/create.rs` - Create (child nodes)

use std::collections::BTreeSet;

use log::{debug, error, info, warn};
use nodemorph_core::names::NN_CONTENT;
use nodemorph_core::{Node, NodePath, Repository};

use crate::error::{MutationError, MutationResult};
use crate::operation::{CopyType, MutationOperation, OperationKind};
use crate::ops::{self, OpContext};
use crate::result::{ActionResult, UpdateReport};
use crate::settings::MutationSettings;

/// Mutation executor.
pub struct MutationExecutor<'r, R: Repository + ?Sized> {
    repository: &'r mut R,
    settings: MutationSettings,
}

impl<'r, R: Repository + ?Sized> MutationExecutor<'r, R> {
    /// Create a new executor with default settings.
    pub fn new(repository: &'r mut R) -> Self {
        Self::with_settings(repository, MutationSettings::default())
    }

    pub fn with_settings(repository: &'r mut R, settings: MutationSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Execute a mutation and report every matched node.
    ///
    /// Candidates are resolved fresh from the repository. Per-node problems
    /// become `Failed` actions and never stop the batch. A live execution
    /// commits when at least one action succeeded.
    pub fn execute(&mut self, op: &MutationOperation) -> MutationResult<UpdateReport> {
        op.validate()?;
        let ctx = OpContext::new(op.kind.label(), op.dry_run, &self.settings.user_id)?;
        info!("Executing {}", op);

        let actions = if op.is_single_copy() {
            self.execute_single_copy(op, &ctx)?
        } else {
            let candidates = self.repository.find(&op.candidate_query()?)?;
            info!("{} candidate node(s) under {}", candidates.len(), op.path);
            self.execute_candidates(op, &ctx, &candidates)
        };

        let report = UpdateReport::aggregate(actions);
        self.finish(op, &report)?;
        info!(
            "{} {} node(s){}",
            op.kind.label(),
            report.total,
            if op.dry_run { " (dry run)" } else { "" }
        );
        Ok(report)
    }

    fn execute_single_copy(
        &mut self,
        op: &MutationOperation,
        ctx: &OpContext,
    ) -> MutationResult<Vec<ActionResult>> {
        let scope = op.scope()?;
        let OperationKind::Copy {
            source,
            target,
            overwrite,
            ..
        } = &op.kind
        else {
            return Ok(Vec::new());
        };

        let result =
            ops::execute_copy_single(&mut *self.repository, ctx, &scope, source, target, *overwrite);
        Ok(vec![settle(&scope, ctx, result)])
    }

    fn execute_candidates(
        &mut self,
        op: &MutationOperation,
        ctx: &OpContext,
        candidates: &[Node],
    ) -> Vec<ActionResult> {
        let mut actions = Vec::new();
        let mut seen = BTreeSet::new();

        for candidate in candidates {
            let target = if acts_on_candidate(&op.kind) {
                Some(candidate.clone())
            } else {
                self.modifiable_target(candidate, op.page_only)
            };

            if !condition_holds(&op.kind, candidate, target.as_ref()) {
                debug!("{} does not match, excluded", candidate.path);
                continue;
            }

            let Some(target) = target else {
                warn!("{} has no modifiable target node", candidate.path);
                actions.push(ActionResult::failed(
                    candidate.path.to_string(),
                    ctx.label,
                    "No modifiable target node",
                ));
                continue;
            };
            if !seen.insert(target.path.clone()) {
                debug!("{} already handled", target.path);
                continue;
            }

            let result = self.apply_to_target(op, ctx, &target);
            actions.push(settle(&target.path, ctx, result));
        }

        actions
    }

    fn apply_to_target(
        &mut self,
        op: &MutationOperation,
        ctx: &OpContext,
        target: &Node,
    ) -> MutationResult<ActionResult> {
        let repo = &mut *self.repository;
        match &op.kind {
            OperationKind::Add { properties, .. } => ops::execute_add(repo, ctx, target, properties),
            OperationKind::Delete { prop_names } => ops::execute_delete(repo, ctx, target, prop_names),
            OperationKind::Replace {
                prop_name,
                find,
                replace,
                partial_match,
            } => ops::execute_replace(repo, ctx, target, prop_name, find, replace, *partial_match),
            OperationKind::Copy {
                copy_type: CopyType::Property,
                source,
                target: to,
                overwrite,
            } => ops::execute_copy_property(repo, ctx, target, source, to, *overwrite),
            OperationKind::Copy {
                copy_type: CopyType::PropertyToPath,
                source,
                target: to,
                overwrite,
            } => ops::execute_copy_to_path(repo, ctx, target, source, to, *overwrite),
            OperationKind::Copy {
                copy_type: CopyType::Node,
                target: to,
                overwrite,
                ..
            } => ops::execute_copy_node(repo, ctx, target, to, *overwrite),
            OperationKind::Create {
                new_node_name,
                new_node_type,
                properties,
                ..
            } => ops::execute_create(repo, ctx, target, new_node_name, new_node_type, properties),
        }
    }

    /// The node whose properties a candidate's mutation changes: a page is
    /// changed through its `jcr:content` child.
    fn modifiable_target(&self, candidate: &Node, page_only: bool) -> Option<Node> {
        let mut target = if page_only {
            self.content_of(&candidate.path)?
        } else {
            candidate.clone()
        };
        if target.is_page() {
            target = self.content_of(&target.path)?;
        }
        Some(target)
    }

    fn content_of(&self, page: &NodePath) -> Option<Node> {
        let content = page.child(NN_CONTENT).ok()?;
        self.repository.get(&content).cloned()
    }

    fn finish(&mut self, op: &MutationOperation, report: &UpdateReport) -> MutationResult<()> {
        if op.dry_run {
            return Ok(());
        }
        if report.total == 0 {
            self.repository.rollback();
            return Ok(());
        }
        self.repository.commit().map_err(|e| {
            error!("Failed to commit changes under {}: {}", op.path, e);
            self.repository.rollback();
            MutationError::commit(e.to_string())
        })
    }
}

/// Create and node Copy work on the candidate itself, never on page content.
fn acts_on_candidate(kind: &OperationKind) -> bool {
    matches!(
        kind,
        OperationKind::Create { .. }
            | OperationKind::Copy {
                copy_type: CopyType::Node,
                ..
            }
    )
}

/// The operation-specific match condition. An Add condition may hold on the
/// candidate or on its page content.
fn condition_holds(kind: &OperationKind, candidate: &Node, target: Option<&Node>) -> bool {
    match kind {
        OperationKind::Add { condition, .. } => {
            condition.matches(candidate) || target.is_some_and(|t| condition.matches(t))
        }
        OperationKind::Create {
            parent_condition, ..
        } => ops::parent_matches(parent_condition, candidate),
        _ => true,
    }
}

/// Turn a per-node error into a `Failed` action.
fn settle(
    path: &NodePath,
    ctx: &OpContext,
    result: MutationResult<ActionResult>,
) -> ActionResult {
    match result {
        Ok(action) => {
            debug!("{} {:?}: {:?}", action.path, action.status, action.message);
            action
        }
        Err(e) => {
            warn!("{} failed on {}: {}", ctx.label, path, e);
            ActionResult::failed(path.to_string(), ctx.label, e.to_string())
        }
    }
}
