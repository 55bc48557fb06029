//! Search backend over an in-process repository.

use nodemorph_core::names::{PN_NAME, PN_PATH, PN_PRIMARY_TYPE, PN_TITLE};
use nodemorph_core::{Node, Repository};

use crate::error::QueryResult;
use crate::executor::SearchBackend;
use crate::filter::FilterSpec;
use crate::result::{Hit, SearchResult};

/// Runs filters directly against a `Repository`.
pub struct LocalBackend<'r, R: Repository + ?Sized> {
    repository: &'r R,
}

impl<'r, R: Repository + ?Sized> LocalBackend<'r, R> {
    pub fn new(repository: &'r R) -> Self {
        Self { repository }
    }
}

impl<R: Repository + ?Sized> SearchBackend for LocalBackend<'_, R> {
    fn search(&self, spec: &FilterSpec) -> QueryResult<SearchResult> {
        let query = spec.to_node_query()?;
        let names = spec.projection.names();
        let hits = self
            .repository
            .find(&query)?
            .iter()
            .map(|node| to_hit(node, &names))
            .collect();
        Ok(SearchResult::new(hits))
    }
}

fn to_hit(node: &Node, projection: &[&str]) -> Hit {
    let mut hit = Hit::new()
        .with(PN_PATH, node.path.to_string())
        .with(PN_NAME, node.name())
        .with(PN_PRIMARY_TYPE, node.primary_type.clone());
    if let Some(title) = node.title() {
        hit.insert(PN_TITLE, title);
    }
    for name in projection {
        if let Some(value) = node.value(name) {
            hit.insert(*name, value.joined());
        }
    }
    hit
}
