//! NodeMorph command line.
//!
//! A thin view layer over the query and mutation crates. Commands run
//! against a local JSON snapshot (`--store`) or a remote instance
//! (`--url` / `--config`).
//!
//! # Module Structure
//!
//! - `args` - clap argument definitions
//! - `target` - Local store or remote client selection
//! - `commands` - search, update and export
//! - `format` - Text rendering of hits and reports
//! - `logger` - env_logger setup

mod args;
mod commands;
mod format;
pub mod logger;
mod target;

pub use args::{Cli, Command, ExportArgs, SearchArgs, TargetArgs, UpdateArgs};
pub use commands::run;
pub use target::Target;
