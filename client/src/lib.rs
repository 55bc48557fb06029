//! NodeMorph Client
//!
//! Talks to a remote instance over HTTP: the query endpoint for searches
//! and the mutation endpoint for updates.
//!
//! # Module Structure
//!
//! - `config` - ClientConfig and YAML loading
//! - `http` - Blocking HttpClient (search GET, update POST)
//! - `error` - Error types

mod config;
mod error;
mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
