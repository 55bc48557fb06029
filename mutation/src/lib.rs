//! NodeMorph Mutation
//!
//! Execute bulk write operations (Add/Delete/Replace/Copy/Create) over the
//! nodes below a scope path.
//!
//! Responsibilities:
//! - Decode and validate mutation requests
//! - Resolve candidate nodes fresh at execution time
//! - Apply (or simulate, under dry-run) the operation per node
//! - Classify and aggregate per-node outcomes
//!
//! # Module Structure
//!
//! - `operation` - MutationOperation model and form encoding
//! - `executor` - Main MutationExecutor that coordinates operations
//! - `ops/` - Individual operation implementations (add, delete, replace, copy, create)
//! - `settings` - Mutation-time settings
//! - `error` - Error types for whole-request failures
//! - `result` - ActionResult and UpdateReport

mod error;
mod executor;
mod operation;
mod ops;
mod result;
mod settings;

pub use error::{MutationError, MutationResult};
pub use executor::MutationExecutor;
pub use operation::{CopyType, MatchCondition, MutationOperation, OperationKind};
pub use result::{ActionResult, ActionStatus, UpdateReport};
pub use settings::MutationSettings;
