//! staffel CLI - tariff lookups from the command line
//!
//! Commands:
//!   quote   - Resolve the tariff for a postcode and weight
//!   tiers   - List the tier columns of a table
//!   check   - Report problems in a table
//!   demo    - Run the built-in sample quotes
//!   schema  - Print JSON schemas of the output types

mod cli;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    cli::util::init_tracing(args.log_level.as_deref());

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
