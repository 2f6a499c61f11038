//! `staffel demo` - the two sample quotes of the calculator form

use super::util::load_table;
use staffel::*;
use std::path::Path;

/// (postcode, weight in tons)
const SCENARIOS: [(&str, &str); 2] = [("10115", "12.5"), ("50667", "8.2")];

pub fn cmd_demo(config: &StaffelConfig, file: &Path, method: Option<TierMethod>) -> Result<()> {
    let table = load_table(config, file)?;
    let overrides = QueryOverrides {
        unit: Some(WeightUnit::Ton),
        method,
        deliveries: Some(DEFAULT_DELIVERIES),
        surcharge: Some(DEFAULT_SURCHARGE),
    };

    let mut failures = 0;
    for (postcode, weight) in SCENARIOS {
        println!("Test: {} • {} t", postcode, weight.replace('.', ","));
        match resolve(&table, &config.query(postcode, weight, &overrides)) {
            Ok(quote) => print!("{}", quote.to_report()),
            Err(e) => {
                failures += 1;
                println!("  {}", e);
            }
        }
        println!();
    }

    if failures > 0 {
        return Err(format!("{} of {} sample quotes failed", failures, SCENARIOS.len()).into());
    }
    Ok(())
}
