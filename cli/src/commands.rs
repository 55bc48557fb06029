//! Command dispatch.

use std::fs;

use anyhow::{Context, Result};
use log::info;
use nodemorph_mutation::MutationOperation;
use nodemorph_query::{to_csv, FilterSpec};

use crate::args::{Cli, Command, ExportArgs, SearchArgs, UpdateArgs};
use crate::format::{failure_line, format_hits, format_report};
use crate::target::Target;

/// Run one parsed command line. Returns `false` when an update reported a
/// failed action.
pub fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::Search { target, search } => run_search(&Target::open(&target)?, &search),
        Command::Update { target, update } => run_update(&mut Target::open(&target)?, &update),
        Command::Export { target, export } => run_export(&Target::open(&target)?, &export),
    }
}

fn run_search(target: &Target, args: &SearchArgs) -> Result<bool> {
    let criteria = args.to_criteria();
    let result = target.search(&criteria)?;
    let spec = FilterSpec::build(&criteria);
    println!("{}", format_hits(&result, &spec.projection, criteria.verbose));
    Ok(true)
}

fn run_update(target: &mut Target, args: &UpdateArgs) -> Result<bool> {
    let op = MutationOperation::from_form(&args.to_form())?;
    let report = target.update(&op)?;

    print!("{}", format_report(&report));
    match failure_line(&report) {
        Some(line) => {
            eprintln!("{}", line);
            Ok(false)
        }
        None => Ok(true),
    }
}

fn run_export(target: &Target, args: &ExportArgs) -> Result<bool> {
    let criteria = args.search.to_criteria();
    let result = target.search(&criteria)?;
    let spec = FilterSpec::build(&criteria);

    match to_csv(&result.hits, &spec.projection) {
        Some(csv) => {
            fs::write(&args.output, csv)
                .with_context(|| format!("Failed to write {}", args.output.display()))?;
            info!("Wrote {} hit(s) to {}", result.count, args.output.display());
            println!("Exported {} hit(s) to {}", result.count, args.output.display());
        }
        None => println!("No results to export"),
    }
    Ok(true)
}
