//! Logging setup for the command line.

use std::io::Write;

/// Initialise `env_logger` from the verbosity flags. `RUST_LOG`, when set,
/// replaces the derived filter entirely.
pub fn init_logger(verbose: bool, quiet: bool) {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
        return;
    }

    let default_level = if quiet {
        log::LevelFilter::Error
    } else if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level).format(|buf, record| {
        if record.level() <= log::Level::Warn {
            writeln!(buf, "{}: {}", record.level(), record.args())
        } else {
            writeln!(buf, "{}", record.args())
        }
    });

    if verbose {
        // Per-node decisions from our crates; HTTP internals stay quiet.
        builder.filter_module("nodemorph", log::LevelFilter::Debug);
        builder.filter_module("reqwest", log::LevelFilter::Info);
        builder.filter_module("hyper", log::LevelFilter::Info);
        builder.filter_module("rustls", log::LevelFilter::Info);
    }

    builder.init();
}
