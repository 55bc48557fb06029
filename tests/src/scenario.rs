//! Scenario definition and builder.

use nodemorph_mutation::MutationOperation;
use nodemorph_query::SearchCriteria;
use nodemorph_tree::TreeStore;
use serde_json::Value;

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::ScenarioResult;
use crate::fixtures::content_tree;
use crate::runner::Runner;

/// What a step runs.
#[derive(Debug, Clone)]
pub enum Action {
    Update(MutationOperation),
    Search(SearchCriteria),
}

/// A step in a scenario with its assertion.
#[derive(Debug)]
pub struct Step {
    /// Step name (for reporting).
    pub name: String,
    pub action: Action,
    /// Assertion to verify the result.
    pub assertion: Assertion,
}

/// A sequence of steps run against one tree.
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    /// Starting tree as a nested JSON snapshot.
    tree: Value,
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new scenario over the fixture content tree.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tree: content_tree(),
            steps: Vec::new(),
        }
    }

    /// Start from a different tree.
    pub fn tree(mut self, tree: Value) -> Self {
        self.tree = tree;
        self
    }

    /// Add a mutation step.
    pub fn update<F>(self, name: impl Into<String>, op: MutationOperation, f: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        self.step(name, Action::Update(op), f)
    }

    /// Add a search step.
    pub fn search<F>(self, name: impl Into<String>, criteria: SearchCriteria, f: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        self.step(name, Action::Search(criteria), f)
    }

    fn step<F>(mut self, name: impl Into<String>, action: Action, f: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        self.steps.push(Step {
            name: name.into(),
            action,
            assertion: f(AssertionBuilder::new()).build(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn initial_tree(&self) -> &Value {
        &self.tree
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order and return the final tree.
    pub fn run(&self) -> ScenarioResult<TreeStore> {
        Runner::new(self).run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodemorph_mutation::OperationKind;

    #[test]
    fn test_builder_collects_steps() {
        let scenario = Scenario::new("builder")
            .search("find", SearchCriteria::by_name("/content", "a*"), |a| a.hits(5))
            .update(
                "delete",
                MutationOperation::new(
                    "/content/legacy",
                    OperationKind::Delete {
                        prop_names: vec!["oldProp".to_string()],
                    },
                ),
                |a| a.total(2),
            );

        assert_eq!(scenario.name(), "builder");
        assert_eq!(scenario.steps().len(), 2);
        assert_eq!(scenario.steps()[1].assertion.total, Some(2));
    }
}
