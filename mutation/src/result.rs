//! Mutation result types and aggregation.

use serde::{Deserialize, Serialize};

/// Outcome of one per-node attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionStatus {
    /// Applied, or would apply under dry-run.
    #[serde(alias = "Done", alias = "Pending")]
    Success,
    /// Matched but left unchanged.
    Skipped,
    Failed,
}

/// One node touched by a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub path: String,
    /// Operation label, e.g. `Add`.
    pub action: String,
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResult {
    pub fn new(
        path: impl Into<String>,
        action: impl Into<String>,
        status: ActionStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            action: action.into(),
            status,
            message: Some(message.into()),
        }
    }

    pub fn success(path: impl Into<String>, action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, action, ActionStatus::Success, message)
    }

    pub fn skipped(path: impl Into<String>, action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, action, ActionStatus::Skipped, message)
    }

    pub fn failed(path: impl Into<String>, action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, action, ActionStatus::Failed, message)
    }

    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Success
    }
}

/// Summary of one mutation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReport {
    /// Number of `Success` actions.
    pub total: usize,
    #[serde(default)]
    pub actions: Vec<ActionResult>,
}

impl UpdateReport {
    /// Count the successful actions, keeping the given order.
    pub fn aggregate(actions: Vec<ActionResult>) -> Self {
        let total = actions.iter().filter(|a| a.is_success()).count();
        Self { total, actions }
    }

    pub fn has_failures(&self) -> bool {
        self.actions.iter().any(|a| a.status == ActionStatus::Failed)
    }

    /// Message of the first failed action, falling back to its label.
    pub fn first_failure_message(&self) -> Option<&str> {
        self.actions
            .iter()
            .find(|a| a.status == ActionStatus::Failed)
            .map(|a| a.message.as_deref().unwrap_or(&a.action))
    }

    /// Number of actions with the given status.
    pub fn count(&self, status: ActionStatus) -> usize {
        self.actions.iter().filter(|a| a.status == status).count()
    }
}
