//! `staffel schema`

use staffel::*;

pub fn cmd_schema(name: &str) -> Result<()> {
    match name {
        "list" => {
            println!("Available schemas: quote, query, config, check, tiers");
            Ok(())
        }
        "quote" => print_schema::<Quote>(),
        "query" => print_schema::<Query>(),
        "config" => print_schema::<StaffelConfig>(),
        "check" => print_schema::<TableReport>(),
        "tiers" => print_schema::<TierSet>(),
        _ => Err(format!("Unknown schema: {}", name).into()),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
