//! CLI utility helpers

use staffel::{Result, StaffelConfig, TariffTable};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber
///
/// An explicit level wins over `RUST_LOG`; without either only warnings and
/// errors are shown.
pub fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load a tariff table with the configured options
pub fn load_table(config: &StaffelConfig, path: &Path) -> Result<TariffTable> {
    TariffTable::from_path(path, &config.load_options())
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
