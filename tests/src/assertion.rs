//! Assertion types and builders for verifying step results.

use nodemorph_mutation::{ActionStatus, UpdateReport};
use nodemorph_query::{to_csv, Projection, SearchResult};

use crate::error::{ScenarioError, ScenarioResult};

/// What one step produced.
#[derive(Debug)]
pub enum Outcome {
    Update(UpdateReport),
    Search {
        result: SearchResult,
        projection: Projection,
    },
}

/// `(path, status)` for every action, in report order.
pub fn outline(report: &UpdateReport) -> Vec<(String, ActionStatus)> {
    report
        .actions
        .iter()
        .map(|a| (a.path.clone(), a.status))
        .collect()
}

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    // Update assertions
    pub total: Option<usize>,
    pub actions: Option<usize>,
    pub skipped: Option<usize>,
    pub failed: Option<usize>,
    pub label: Option<String>,
    pub statuses: Vec<(String, ActionStatus)>,
    pub messages: Vec<(String, String)>,

    // Search assertions
    pub hits: Option<usize>,
    pub hit_paths: Option<Vec<String>>,
    pub csv_rows: Option<usize>,

    // Error assertions
    pub error: Option<String>,
    pub error_pattern: Option<String>,

    // Custom assertion function
    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&Outcome) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("total", &self.total)
            .field("actions", &self.actions)
            .field("skipped", &self.skipped)
            .field("failed", &self.failed)
            .field("label", &self.label)
            .field("statuses", &self.statuses)
            .field("hits", &self.hits)
            .field("hit_paths", &self.hit_paths)
            .field("csv_rows", &self.csv_rows)
            .field("error", &self.error)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a result.
    pub fn verify(&self, step: &str, result: &Result<Outcome, String>) -> ScenarioResult<()> {
        if let Some(ref expected_error) = self.error {
            return match result {
                Err(msg) if msg.contains(expected_error) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected_error, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', but step succeeded", expected_error),
                )),
            };
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            return match result {
                Err(msg) if re.is_match(msg) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', got: {}", pattern, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', but step succeeded", pattern),
                )),
            };
        }

        let outcome = result
            .as_ref()
            .map_err(|msg| ScenarioError::assertion_failed(step, format!("step failed: {}", msg)))?;

        if let Some(ref custom) = self.custom {
            if !custom(outcome) {
                return Err(ScenarioError::assertion_failed(step, "custom assertion failed"));
            }
        }

        match outcome {
            Outcome::Update(report) => self.verify_update(step, report),
            Outcome::Search { result, projection } => self.verify_search(step, result, projection),
        }
    }

    fn verify_update(&self, step: &str, report: &UpdateReport) -> ScenarioResult<()> {
        let fail = |message: String| Err(ScenarioError::assertion_failed(step, message));

        if let Some(expected) = self.total {
            if report.total != expected {
                return fail(format!("expected total {}, got {}", expected, report.total));
            }
        }

        if let Some(expected) = self.actions {
            if report.actions.len() != expected {
                return fail(format!(
                    "expected {} action(s), got {}: {:?}",
                    expected,
                    report.actions.len(),
                    outline(report)
                ));
            }
        }

        let counts = [
            (self.skipped, ActionStatus::Skipped),
            (self.failed, ActionStatus::Failed),
        ];
        for (expected, status) in counts {
            if let Some(expected) = expected {
                let actual = report.count(status);
                if actual != expected {
                    return fail(format!("expected {} {:?}, got {}", expected, status, actual));
                }
            }
        }

        if let Some(ref label) = self.label {
            if let Some(other) = report.actions.iter().find(|a| &a.action != label) {
                return fail(format!("expected every label '{}', got '{}'", label, other.action));
            }
        }

        for (path, status) in &self.statuses {
            match report.actions.iter().find(|a| &a.path == path) {
                Some(action) if action.status == *status => {}
                Some(action) => {
                    return fail(format!(
                        "expected {} to be {:?}, got {:?} ({})",
                        path,
                        status,
                        action.status,
                        action.message.as_deref().unwrap_or("")
                    ))
                }
                None => return fail(format!("no action reported for {}", path)),
            }
        }

        for (path, fragment) in &self.messages {
            let message = report
                .actions
                .iter()
                .find(|a| &a.path == path)
                .and_then(|a| a.message.as_deref());
            match message {
                Some(message) if message.contains(fragment.as_str()) => {}
                other => {
                    return fail(format!(
                        "expected message for {} containing '{}', got {:?}",
                        path, fragment, other
                    ))
                }
            }
        }

        Ok(())
    }

    fn verify_search(
        &self,
        step: &str,
        result: &SearchResult,
        projection: &Projection,
    ) -> ScenarioResult<()> {
        let fail = |message: String| Err(ScenarioError::assertion_failed(step, message));

        if let Some(expected) = self.hits {
            if result.count != expected || result.hits.len() != expected {
                return fail(format!(
                    "expected {} hit(s), got {} (count {})",
                    expected,
                    result.hits.len(),
                    result.count
                ));
            }
        }

        if let Some(ref expected) = self.hit_paths {
            let actual: Vec<&str> = result.hits.iter().filter_map(|h| h.path()).collect();
            if actual != expected.iter().map(String::as_str).collect::<Vec<_>>() {
                return fail(format!("expected hits {:?}, got {:?}", expected, actual));
            }
        }

        if let Some(expected) = self.csv_rows {
            let rows = to_csv(&result.hits, projection).map_or(0, |csv| csv.lines().count());
            if rows != expected {
                return fail(format!("expected {} CSV row(s), got {}", expected, rows));
            }
        }

        Ok(())
    }
}

/// Builder for fluent assertion construction.
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    /// Create a new assertion builder.
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    /// Build the assertion.
    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Update assertions ==========

    /// Assert the report's affected count.
    pub fn total(mut self, n: usize) -> Self {
        self.assertion.total = Some(n);
        self
    }

    /// Assert the number of reported actions, whatever their status.
    pub fn actions(mut self, n: usize) -> Self {
        self.assertion.actions = Some(n);
        self
    }

    pub fn skipped(mut self, n: usize) -> Self {
        self.assertion.skipped = Some(n);
        self
    }

    pub fn failed(mut self, n: usize) -> Self {
        self.assertion.failed = Some(n);
        self
    }

    /// Assert that every action carries this label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.assertion.label = Some(label.into());
        self
    }

    /// Assert the status of the action reported at `path`.
    pub fn status(mut self, path: impl Into<String>, status: ActionStatus) -> Self {
        self.assertion.statuses.push((path.into(), status));
        self
    }

    /// Assert that the action at `path` has a message containing `fragment`.
    pub fn message(mut self, path: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.assertion.messages.push((path.into(), fragment.into()));
        self
    }

    // ========== Search assertions ==========

    pub fn hits(mut self, n: usize) -> Self {
        self.assertion.hits = Some(n);
        self
    }

    /// Assert the hit paths, in order.
    pub fn hit_paths(mut self, paths: &[&str]) -> Self {
        self.assertion.hit_paths = Some(paths.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Assert the line count of the CSV export; 0 means no file.
    pub fn csv_rows(mut self, n: usize) -> Self {
        self.assertion.csv_rows = Some(n);
        self
    }

    // ========== Error assertions ==========

    /// Assert that the step fails with an error containing the given string.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    /// Assert that the step fails with an error matching the given regex.
    pub fn error_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.error_pattern = Some(pattern.into());
        self
    }

    // ========== Advanced ==========

    /// Custom assertion function.
    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Outcome) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodemorph_mutation::ActionResult;

    fn report() -> Result<Outcome, String> {
        Ok(Outcome::Update(UpdateReport::aggregate(vec![
            ActionResult::success("/a", "Delete", "Deleted oldProp"),
            ActionResult::skipped("/b", "Delete", "No listed properties present"),
        ])))
    }

    #[test]
    fn test_matching_assertion_passes() {
        let assertion = AssertionBuilder::new()
            .total(1)
            .actions(2)
            .skipped(1)
            .failed(0)
            .label("Delete")
            .status("/b", ActionStatus::Skipped)
            .message("/a", "oldProp")
            .build();

        assert!(assertion.verify("delete", &report()).is_ok());
    }

    #[test]
    fn test_wrong_total_fails() {
        let assertion = AssertionBuilder::new().total(2).build();
        let err = assertion.verify("delete", &report()).unwrap_err();
        assert!(err.to_string().contains("expected total 2, got 1"));
    }

    #[test]
    fn test_expected_error() {
        let assertion = AssertionBuilder::new().error_matches("^Missing field").build();
        let result: Result<Outcome, String> = Err("Missing field: path".to_string());
        assert!(assertion.verify("invalid", &result).is_ok());
        assert!(assertion.verify("invalid", &report()).is_err());
    }
}
