//! Filter specification builder.
//!
//! `FilterSpec::build` normalises operator criteria into an engine-agnostic
//! descriptor. It never fails: blank fields just leave their clause out.
//! Checks that need to reject input live in `validate`.

use nodemorph_core::names::{NT_PAGE, PN_PRIMARY_TYPE, PN_TITLE};
use nodemorph_core::{NodePath, NodeQuery, PropertyPredicate};
use serde::{Deserialize, Serialize};

use crate::criteria::SearchCriteria;
use crate::error::{QueryError, QueryResult};

/// Hard cap on the number of hits of one search.
pub const RESULT_CAP: usize = 1000;

/// How a property clause compares values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOperator {
    Equals,
    Contains,
}

/// `name <operator> value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyClause {
    pub name: String,
    pub value: String,
    pub operator: MatchOperator,
}

/// The single match clause of a search. A node-name pattern and a property
/// clause never apply together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchClause {
    /// Node-name glob; `*` is the wildcard.
    NodeName(String),
    Property(PropertyClause),
}

/// Properties returned for each hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Projection {
    /// Title and primary type.
    Default,
    /// Operator-chosen property names, in the order given.
    Custom(Vec<String>),
}

impl Projection {
    /// Parse a comma-separated list; an empty list selects the default.
    pub fn parse(raw: &str) -> Self {
        let names: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            Projection::Default
        } else {
            Projection::Custom(names)
        }
    }

    /// Property names to fetch.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Projection::Default => vec![PN_TITLE, PN_PRIMARY_TYPE],
            Projection::Custom(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Column headers for display and export, without the leading `Path`.
    pub fn headers(&self) -> Vec<&str> {
        match self {
            Projection::Default => vec!["Title", "Type"],
            Projection::Custom(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// A normalised, immutable search description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Root path of the search (trimmed operator input).
    pub path: String,
    pub clause: Option<MatchClause>,
    /// Restrict hits to `cq:Page` nodes.
    pub page_only: bool,
    pub limit: usize,
    pub projection: Projection,
}

impl FilterSpec {
    /// Build a filter from operator criteria.
    pub fn build(criteria: &SearchCriteria) -> Self {
        let query = criteria.query.trim();
        let property_name = criteria.property_name.trim();

        let clause = if query.is_empty() {
            None
        } else if criteria.match_property && !property_name.is_empty() {
            let operator = if criteria.substring_match {
                MatchOperator::Contains
            } else {
                MatchOperator::Equals
            };
            Some(MatchClause::Property(PropertyClause {
                name: property_name.to_string(),
                value: query.to_string(),
                operator,
            }))
        } else {
            Some(MatchClause::NodeName(query.to_string()))
        };

        let limit = match criteria.limit {
            0 => RESULT_CAP,
            n => n.min(RESULT_CAP),
        };

        Self {
            path: criteria.path.trim().to_string(),
            clause,
            page_only: criteria.page_only,
            limit,
            projection: Projection::parse(&criteria.properties),
        }
    }

    /// Reject a filter that no backend can run.
    pub fn validate(&self) -> QueryResult<()> {
        if self.path.is_empty() {
            return Err(QueryError::validation("path must not be empty"));
        }
        self.scope().map(|_| ())
    }

    /// The parsed search root.
    pub fn scope(&self) -> QueryResult<NodePath> {
        NodePath::parse(&self.path).map_err(|e| QueryError::validation(e.to_string()))
    }

    /// The repository query this filter evaluates to.
    pub fn to_node_query(&self) -> QueryResult<NodeQuery> {
        let mut query = NodeQuery::under(self.scope()?).limit(self.limit);
        if self.page_only {
            query = query.of_type(NT_PAGE);
        }
        match &self.clause {
            Some(MatchClause::NodeName(glob)) => query = query.named(glob.clone()),
            Some(MatchClause::Property(clause)) => {
                let predicate = match clause.operator {
                    MatchOperator::Equals => PropertyPredicate::equals(&clause.name, &clause.value),
                    MatchOperator::Contains => {
                        PropertyPredicate::like(&clause.name, format!("%{}%", clause.value))
                    }
                };
                query = query.with_property(predicate);
            }
            None => {}
        }
        Ok(query)
    }

    /// Native query-builder parameters: the engine predicates plus full hit
    /// detail, flat node depth and one `N_property` per projected name.
    pub fn to_params(&self) -> QueryResult<Vec<(String, String)>> {
        let mut params = self.to_node_query()?.to_params();
        params.push(("p.hits".to_string(), "full".to_string()));
        params.push(("p.nodedepth".to_string(), "0".to_string()));
        for (index, name) in self.projection.names().into_iter().enumerate() {
            params.push((format!("{}_property", index + 1), name.to_string()));
        }
        Ok(params)
    }
}
