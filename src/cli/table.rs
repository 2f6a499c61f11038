//! Table inspection commands: tiers, check

use super::util::{load_table, print_json};
use staffel::*;
use std::path::Path;

pub fn cmd_tiers(config: &StaffelConfig, file: &Path, json: bool) -> Result<()> {
    let table = load_table(config, file)?;
    let tiers = table.tiers();

    if json {
        print_json(tiers)?;
    } else {
        print!("{}", tiers.to_report());
    }

    if tiers.is_empty() {
        return Err(Error::NoTierColumns);
    }
    Ok(())
}

pub fn cmd_check(config: &StaffelConfig, file: &Path, json: bool, strict: bool) -> Result<()> {
    let table = load_table(config, file)?;
    let report = check_table(&table, &config.postcode_column);

    if json {
        print_json(&report)?;
    } else {
        print!("{}", report.to_report());
    }

    if report.passed(strict) {
        Ok(())
    } else {
        Err("Table check failed".into())
    }
}
