//! NodeMorph Core Types
//!
//! This crate provides the foundational types used throughout NodeMorph:
//! - Paths (NodePath) and nodes (Node) of the hierarchical content tree
//! - Property values and `key=value` assignment parsing
//! - The engine-level query predicate set (NodeQuery)
//! - The Repository trait every tree store implements
//! - Common error types

mod error;
pub mod names;
mod node;
mod path;
mod query;
mod repository;
mod value;

pub use error::*;
pub use node::*;
pub use path::*;
pub use query::*;
pub use repository::*;
pub use value::*;
