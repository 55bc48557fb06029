//! NodeMorph - bulk search and mutation of content nodes.
//!
//! This is the entry point for the `nodemorph` binary.

use std::process::ExitCode;

use clap::Parser;
use nodemorph_cli::{logger, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.quiet);

    match nodemorph_cli::run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
