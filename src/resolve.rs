//! Tariff resolution: query in, quote out
//!
//! [`resolve`] is a pure function of a loaded [`TariffTable`] and a [`Query`].
//! It runs these steps and stops at the first failure:
//!
//! 1. weight → tons (`InvalidWeight`)
//! 2. postcode → two-digit prefix (`InvalidPostcode`)
//! 3. prefix → table row (`NoMatchingRow`)
//! 4. tier columns must exist (`NoTierColumns`)
//! 5. clamp tons into the tier range and select a tier per [`TierMethod`]
//! 6. read the tariff cell(s) (`InvalidTariffCell`)
//! 7. total = tariff + deliveries × surcharge

use crate::error::Result;
use crate::postcode::Prefix;
use crate::table::{TariffRow, TariffTable};
use crate::tier::{Selection, TierMethod};
use crate::weight::{self, WeightUnit};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Surcharge per delivery when none (or nonsense) is given, in euro
pub const DEFAULT_SURCHARGE: f64 = 35.0;

/// Delivery count when none (or nonsense) is given
pub const DEFAULT_DELIVERIES: f64 = 1.0;

/// A tariff request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Query {
    /// Postcode as entered; only its first two digits are used
    pub postcode: String,
    /// Weight as entered, decimal comma allowed
    pub weight: String,
    #[serde(default)]
    pub unit: WeightUnit,
    /// Number of deliveries, clamped to at least 1
    #[serde(default = "default_deliveries")]
    pub deliveries: f64,
    /// Surcharge per delivery in euro, clamped to at least 0
    #[serde(default = "default_surcharge")]
    pub surcharge: f64,
    #[serde(default)]
    pub method: TierMethod,
}

fn default_deliveries() -> f64 {
    DEFAULT_DELIVERIES
}

fn default_surcharge() -> f64 {
    DEFAULT_SURCHARGE
}

impl Query {
    pub fn new(postcode: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            postcode: postcode.into(),
            weight: weight.into(),
            unit: WeightUnit::default(),
            deliveries: DEFAULT_DELIVERIES,
            surcharge: DEFAULT_SURCHARGE,
            method: TierMethod::default(),
        }
    }

    pub fn unit(mut self, unit: WeightUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn method(mut self, method: TierMethod) -> Self {
        self.method = method;
        self
    }

    pub fn deliveries(mut self, deliveries: f64) -> Self {
        self.deliveries = deliveries;
        self
    }

    pub fn surcharge(mut self, surcharge: f64) -> Self {
        self.surcharge = surcharge;
        self
    }

    /// Delivery count actually charged
    pub fn effective_deliveries(&self) -> f64 {
        if self.deliveries.is_finite() {
            self.deliveries.max(1.0)
        } else {
            DEFAULT_DELIVERIES
        }
    }

    /// Surcharge per delivery actually charged
    pub fn effective_surcharge(&self) -> f64 {
        if self.surcharge.is_finite() {
            self.surcharge.max(0.0)
        } else {
            DEFAULT_SURCHARGE
        }
    }
}

/// Parse a delivery count or surcharge typed by a user
///
/// Empty text counts as 0, text that is not a number as NaN; both are then
/// handled by the clamping and default rules of [`Query`].
pub fn parse_amount(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.replacen(',', ".", 1).parse().unwrap_or(f64::NAN)
}

/// A resolved tariff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Quote {
    pub prefix: Prefix,
    /// Requested weight in tons, before clamping
    pub weight_tons: f64,
    pub method: TierMethod,
    /// Tier used, e.g. `13 ton` or `12–14 (interp)`
    pub tier: String,
    pub selection: Selection,
    /// Fixed tariff per delivery for the tier
    pub tariff: f64,
    pub deliveries: f64,
    pub surcharge_per_delivery: f64,
    pub surcharge_total: f64,
    pub total: f64,
    /// Hash of the table the quote was computed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_hash: Option<String>,
}

impl Quote {
    pub fn with_table_hash(mut self, hash: String) -> Self {
        self.table_hash = Some(hash);
        self
    }
}

/// Resolve a query against a table
pub fn resolve(table: &TariffTable, query: &Query) -> Result<Quote> {
    let weight_tons = weight::to_tons(&query.weight, query.unit)?;
    let prefix = Prefix::extract(&query.postcode)?;
    tracing::debug!(%prefix, weight_tons, "query normalized");

    let row = table.find_row(&prefix)?;
    let selection = table.tiers().select(weight_tons, query.method)?;
    let tariff = tariff_for(table, row, &selection)?;

    let deliveries = query.effective_deliveries();
    let surcharge_per_delivery = query.effective_surcharge();
    let surcharge_total = deliveries * surcharge_per_delivery;
    let total = tariff + surcharge_total;
    tracing::debug!(tariff, surcharge_total, total, "quote computed");

    Ok(Quote {
        prefix,
        weight_tons,
        method: query.method,
        tier: selection.label(),
        selection,
        tariff,
        deliveries,
        surcharge_per_delivery,
        surcharge_total,
        total,
        table_hash: None,
    })
}

fn tariff_for(table: &TariffTable, row: &TariffRow, selection: &Selection) -> Result<f64> {
    match selection {
        Selection::Single { tier } => table.rate(row, tier),
        Selection::Interpolated { lower, upper, .. } => {
            let rate_lower = table.rate(row, lower)?;
            let rate_upper = table.rate(row, upper)?;
            Ok(rate_lower + selection.fraction() * (rate_upper - rate_lower))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::table::LoadOptions;

    fn table() -> TariffTable {
        TariffTable::from_delimited(
            "Postcode;1 ton;5 ton;10 ton;13 ton\n\
             10115;100;150;200;260\n\
             50667;90;140;190;abc\n",
            &LoadOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_ceil_quote() {
        let quote = resolve(&table(), &Query::new("10115", "12.5").unit(WeightUnit::Ton)).unwrap();
        assert_eq!(quote.prefix.as_str(), "10");
        assert_eq!(quote.weight_tons, 12.5);
        assert_eq!(quote.tier, "13 ton");
        assert_eq!(quote.tariff, 260.0);
        assert_eq!(quote.surcharge_total, 35.0);
        assert_eq!(quote.total, 295.0);
    }

    #[test]
    fn test_kg_is_default_unit() {
        let quote = resolve(&table(), &Query::new("10115", "4200")).unwrap();
        assert_eq!(quote.weight_tons, 4.2);
        assert_eq!(quote.tier, "5 ton");
    }

    #[test]
    fn test_interp_quote() {
        let query = Query::new("10115", "7,5")
            .unit(WeightUnit::Ton)
            .method(TierMethod::Interp);
        let quote = resolve(&table(), &query).unwrap();
        assert_eq!(quote.tier, "5–10 (interp)");
        assert_eq!(quote.tariff, 175.0);
    }

    #[test]
    fn test_surcharge_and_deliveries_rules() {
        let base = Query::new("10115", "1").unit(WeightUnit::Ton);

        let quote = resolve(&table(), &base.clone().deliveries(3.0).surcharge(10.0)).unwrap();
        assert_eq!(quote.total, 100.0 + 30.0);

        let quote = resolve(&table(), &base.clone().deliveries(0.0).surcharge(-5.0)).unwrap();
        assert_eq!(quote.deliveries, 1.0);
        assert_eq!(quote.surcharge_per_delivery, 0.0);
        assert_eq!(quote.total, 100.0);

        let quote = resolve(&table(), &base.deliveries(f64::NAN).surcharge(f64::NAN)).unwrap();
        assert_eq!(quote.deliveries, 1.0);
        assert_eq!(quote.surcharge_per_delivery, 35.0);
    }

    #[test]
    fn test_failures_in_step_order() {
        let t = table();
        assert!(matches!(
            resolve(&t, &Query::new("a", "0")),
            Err(Error::InvalidWeight)
        ));
        assert!(matches!(
            resolve(&t, &Query::new("a", "5")),
            Err(Error::InvalidPostcode)
        ));
        assert!(matches!(
            resolve(&t, &Query::new("80331", "5")),
            Err(Error::NoMatchingRow { .. })
        ));
        assert!(matches!(
            resolve(&t, &Query::new("50667", "20").unit(WeightUnit::Ton)),
            Err(Error::InvalidTariffCell { column }) if column == "13 ton"
        ));
    }

    #[test]
    fn test_no_tier_columns() {
        let t = TariffTable::from_delimited("Postcode,Price\n10115,12\n", &LoadOptions::default())
            .unwrap();
        assert!(matches!(
            resolve(&t, &Query::new("10115", "5")),
            Err(Error::NoTierColumns)
        ));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount(" 2 "), 2.0);
        assert_eq!(parse_amount("12,5"), 12.5);
        assert!(parse_amount("two").is_nan());
    }
}
