//! Search execution.

use log::{debug, info};

use crate::criteria::SearchCriteria;
use crate::error::{QueryError, QueryResult};
use crate::filter::FilterSpec;
use crate::result::SearchResult;

/// Something that can run a `FilterSpec`: a local repository or a remote
/// query endpoint. One attempt per call; implementations never retry.
pub trait SearchBackend {
    fn search(&self, spec: &FilterSpec) -> QueryResult<SearchResult>;
}

/// Search executor.
pub struct SearchExecutor<'b, B: SearchBackend + ?Sized> {
    backend: &'b B,
}

impl<'b, B: SearchBackend + ?Sized> SearchExecutor<'b, B> {
    /// Create a new executor.
    pub fn new(backend: &'b B) -> Self {
        Self { backend }
    }

    /// Validate operator criteria, build the filter and run it.
    pub fn search(&self, criteria: &SearchCriteria) -> QueryResult<SearchResult> {
        if criteria.path.trim().is_empty() || criteria.query.trim().is_empty() {
            return Err(QueryError::validation("Please enter a valid path and query"));
        }
        self.execute(&FilterSpec::build(criteria))
    }

    /// Run a prepared filter.
    pub fn execute(&self, spec: &FilterSpec) -> QueryResult<SearchResult> {
        spec.validate()?;
        debug!("searching {} ({:?})", spec.path, spec.clause);

        let result = self.backend.search(spec)?;
        info!(
            "Found {} result{} under {}",
            result.count,
            if result.count == 1 { "" } else { "s" },
            spec.path
        );
        Ok(result)
    }
}
