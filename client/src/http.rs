//! Blocking HTTP adapter for the query and mutation endpoints.

use std::time::Duration;

use log::{debug, info};
use nodemorph_mutation::{MutationOperation, UpdateReport};
use nodemorph_query::{FilterSpec, QueryError, QueryResult, SearchBackend, SearchResult};
use reqwest::blocking::{Client, RequestBuilder, Response};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// HTTP client for one remote instance. Every call is a single attempt.
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::config(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit a mutation request and decode the report.
    ///
    /// The request is validated locally first. A non-2xx response becomes a
    /// `Transport` error carrying the response body, or the status text when
    /// the body is empty.
    pub fn update(&self, op: &MutationOperation) -> ClientResult<UpdateReport> {
        op.validate()?;
        let url = self.config.endpoint_url(&self.config.update_endpoint);
        info!("{} -> {}", op, url);

        let response = self
            .authorize(self.client.post(&url))
            .form(&op.to_form())
            .send()
            .map_err(|e| ClientError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(ClientError::transport(message));
        }

        let report: UpdateReport = response
            .json()
            .map_err(|e| ClientError::decode(e.to_string()))?;
        debug!("update report: total={} actions={}", report.total, report.actions.len());
        Ok(report)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.user {
            Some(user) => request.basic_auth(user, self.config.password.as_deref()),
            None => request,
        }
    }

    fn capped(&self, spec: &FilterSpec) -> FilterSpec {
        let mut spec = spec.clone();
        spec.limit = spec.limit.min(self.config.result_limit);
        spec
    }
}

impl SearchBackend for HttpClient {
    fn search(&self, spec: &FilterSpec) -> QueryResult<SearchResult> {
        let params = self.capped(spec).to_params()?;
        let url = self.config.endpoint_url(&self.config.search_endpoint);
        debug!("GET {} {:?}", url, params);

        let response: Response = self
            .authorize(self.client.get(&url))
            .query(&params)
            .send()
            .map_err(|e| QueryError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::transport(status.to_string()));
        }

        response.json().map_err(|e| QueryError::decode(e.to_string()))
    }
}
