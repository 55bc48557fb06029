//! Mutation-time settings.

use serde::{Deserialize, Serialize};

/// Settings applied to every mutation an executor runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MutationSettings {
    /// Recorded as `cq:lastModifiedBy` on changed page content.
    pub user_id: String,
}

impl Default for MutationSettings {
    fn default() -> Self {
        Self {
            user_id: "admin".to_string(),
        }
    }
}

impl MutationSettings {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
