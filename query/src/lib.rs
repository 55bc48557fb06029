//! NodeMorph Query
//!
//! Turn operator search criteria into a filter specification, run it
//! against a search backend and present the hits.
//!
//! # Module Structure
//!
//! - `criteria` - Raw operator search input
//! - `filter` - FilterSpec builder, validation and native parameters
//! - `executor` - SearchBackend trait and the SearchExecutor
//! - `local` - Backend evaluating a FilterSpec against a Repository
//! - `result` - Hit and SearchResult types
//! - `export` - CSV rendering of a hit list

mod criteria;
mod error;
mod executor;
mod export;
mod filter;
mod local;
mod result;

pub use criteria::SearchCriteria;
pub use error::{QueryError, QueryResult};
pub use executor::{SearchBackend, SearchExecutor};
pub use export::{row_cells, to_csv, CSV_FILE_NAME};
pub use filter::{FilterSpec, MatchClause, MatchOperator, Projection, PropertyClause, RESULT_CAP};
pub use local::LocalBackend;
pub use result::{Hit, SearchResult};
