//! Client configuration.

use std::path::Path;

use nodemorph_query::RESULT_CAP;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Connection settings for a remote instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Basic-auth user; no auth header is sent when absent.
    pub user: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
    pub search_endpoint: String,
    pub update_endpoint: String,
    /// Upper bound on hits requested per search.
    pub result_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4502".to_string(),
            user: None,
            password: None,
            timeout_secs: 60,
            search_endpoint: "/bin/querybuilder.json".to_string(),
            update_endpoint: "/bin/nodemorph/update".to_string(),
            result_limit: RESULT_CAP,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    pub fn from_yaml(content: &str) -> ClientResult<Self> {
        serde_yaml::from_str(content).map_err(|e| ClientError::config(e.to_string()))
    }

    /// Load a YAML configuration file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Absolute URL of an endpoint path.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
