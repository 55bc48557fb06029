//! NodeMorph Tree Storage
//!
//! This crate provides an in-memory content tree with indexed access:
//! - Node storage keyed by path, iterated in document order
//! - Type index: find nodes by primary type
//! - Query matching: nodename globs and `like` property patterns
//! - A working copy with commit/rollback
//! - JSON snapshots in the nested tree form

mod index;
mod matcher;
mod snapshot;
mod store;

pub use matcher::QueryMatcher;
pub use store::*;
