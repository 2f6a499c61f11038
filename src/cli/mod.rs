//! CLI command definitions and dispatch
//!
//! - `quote`: resolve a single tariff
//! - `table`: table inspection (tiers, check)
//! - `demo`: sample scenarios
//! - `schema`: JSON schemas
//! - `util`: shared helpers

pub mod demo;
pub mod quote;
pub mod schema;
pub mod table;
pub mod util;

use clap::{Args, Parser, Subcommand};
use staffel::{Result, StaffelConfig, TierMethod, WeightUnit};
use std::path::PathBuf;

/// Tiered transport tariffs: cost per delivery by postcode and weight tier.
#[derive(Parser, Debug)]
#[command(name = "staffel", version, about)]
pub struct Cli {
    /// Config file (default: ./staffel.yaml when present)
    #[arg(short, long, global = true, env = "STAFFEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides RUST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the tariff for a postcode and weight
    Quote(QuoteArgs),
    /// List the tier columns detected in a table
    Tiers {
        /// Tariff table (.xlsx, .xls, .ods, .csv, ...)
        file: PathBuf,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Report problems in a table
    Check {
        /// Tariff table (.xlsx, .xls, .ods, .csv, ...)
        file: PathBuf,
        /// JSON output
        #[arg(long)]
        json: bool,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Run the sample quotes (10115 • 12,5 t and 50667 • 8,2 t)
    Demo {
        /// Tariff table (.xlsx, .xls, .ods, .csv, ...)
        file: PathBuf,
        /// Tier selection method
        #[arg(short, long, value_parser = parse_method)]
        method: Option<TierMethod>,
    },
    /// Print the JSON schema of an output type
    Schema {
        /// quote, query, config, check or tiers
        #[arg(default_value = "list")]
        name: String,
    },
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Tariff table (.xlsx, .xls, .ods, .csv, ...)
    pub file: PathBuf,

    /// Postcode; the first two digits select the row
    #[arg(short, long)]
    pub postcode: String,

    /// Shipment weight, decimal comma allowed
    #[arg(short, long)]
    pub weight: String,

    /// Weight unit: kg or ton
    #[arg(short, long, value_parser = parse_unit)]
    pub unit: Option<WeightUnit>,

    /// Tier selection: ceil, floor, nearest or interp
    #[arg(short, long, value_parser = parse_method)]
    pub method: Option<TierMethod>,

    /// Number of deliveries (at least 1)
    #[arg(short, long, allow_hyphen_values = true)]
    pub deliveries: Option<String>,

    /// Surcharge per delivery in euro
    #[arg(short, long, allow_hyphen_values = true)]
    pub surcharge: Option<String>,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

fn parse_unit(s: &str) -> std::result::Result<WeightUnit, String> {
    s.parse().map_err(|e: staffel::Error| e.to_string())
}

fn parse_method(s: &str) -> std::result::Result<TierMethod, String> {
    s.parse().map_err(|e: staffel::Error| e.to_string())
}

/// Run a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = StaffelConfig::discover(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Command::Quote(args) => quote::cmd_quote(&config, &args),
        Command::Tiers { file, json } => table::cmd_tiers(&config, &file, json),
        Command::Check { file, json, strict } => table::cmd_check(&config, &file, json, strict),
        Command::Demo { file, method } => demo::cmd_demo(&config, &file, method),
        Command::Schema { name } => schema::cmd_schema(&name),
    }
}
