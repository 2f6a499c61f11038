//! `staffel quote`

use super::util::{load_table, print_json};
use super::QuoteArgs;
use staffel::*;

pub fn cmd_quote(config: &StaffelConfig, args: &QuoteArgs) -> Result<()> {
    let table = load_table(config, &args.file)?;

    let overrides = QueryOverrides {
        unit: args.unit,
        method: args.method,
        deliveries: args.deliveries.as_deref().map(parse_amount),
        surcharge: args.surcharge.as_deref().map(parse_amount),
    };
    let query = config.query(&args.postcode, &args.weight, &overrides);

    let quote = resolve(&table, &query)?.with_table_hash(table.hash());

    if args.json {
        print_json(&quote)?;
    } else {
        print!("{}", quote.to_report());
    }
    Ok(())
}
