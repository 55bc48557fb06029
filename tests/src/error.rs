//! Error types for the scenario framework.

use thiserror::Error;

/// Result type for scenario runs.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The fixture tree could not be loaded.
    #[error("failed to load fixture tree for scenario '{scenario}': {message}")]
    Fixture { scenario: String, message: String },

    /// Assertion failed.
    #[error("assertion failed for step '{step}': {message}")]
    AssertionFailed { step: String, message: String },
}

impl ScenarioError {
    pub fn fixture(scenario: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fixture {
            scenario: scenario.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}
