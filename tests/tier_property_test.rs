//! Property-based tests for tier selection
//!
//! Uses proptest to generate random tier layouts and weights

use proptest::prelude::*;
use staffel::{
    resolve, LoadOptions, Query, Selection, TariffTable, TierMethod, TierSet, WeightUnit,
};

/// Distinct ascending tonnages, 1..=999
fn any_tonnages() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(1u32..=999, 1..8).prop_map(|s| s.into_iter().collect())
}

fn tier_set(tonnages: &[u32]) -> TierSet {
    let headers: Vec<String> = tonnages.iter().map(|t| format!("{} ton", t)).collect();
    TierSet::from_headers(&headers)
}

fn single_tons(selection: &Selection) -> u32 {
    match selection {
        Selection::Single { tier } => tier.tons,
        Selection::Interpolated { .. } => unreachable!("single-tier method"),
    }
}

proptest! {
    #[test]
    fn below_minimum_resolves_to_minimum(tonnages in any_tonnages(), frac in 0.001f64..1.0) {
        let set = tier_set(&tonnages);
        let min = tonnages[0];
        let t = min as f64 * frac;
        for method in [TierMethod::Ceil, TierMethod::Floor, TierMethod::Nearest] {
            prop_assert_eq!(single_tons(&set.select(t, method).unwrap()), min);
        }
    }

    #[test]
    fn above_maximum_resolves_to_maximum(tonnages in any_tonnages(), extra in 0.001f64..500.0) {
        let set = tier_set(&tonnages);
        let max = *tonnages.last().unwrap();
        let t = max as f64 + extra;
        for method in [TierMethod::Ceil, TierMethod::Floor, TierMethod::Nearest] {
            prop_assert_eq!(single_tons(&set.select(t, method).unwrap()), max);
        }
        match set.select(t, TierMethod::Interp).unwrap() {
            Selection::Interpolated { lower, upper, .. } => {
                prop_assert_eq!(lower.tons, max);
                prop_assert_eq!(upper.tons, max);
            }
            Selection::Single { .. } => prop_assert!(false, "interp must interpolate"),
        }
    }

    #[test]
    fn floor_le_tons_le_ceil(tonnages in any_tonnages(), pick in 0.0f64..1.0) {
        let set = tier_set(&tonnages);
        let min = tonnages[0] as f64;
        let max = *tonnages.last().unwrap() as f64;
        let t = min + (max - min) * pick;

        let floor = single_tons(&set.select(t, TierMethod::Floor).unwrap()) as f64;
        let ceil = single_tons(&set.select(t, TierMethod::Ceil).unwrap()) as f64;
        prop_assert!(floor <= t, "floor {} > {}", floor, t);
        prop_assert!(t <= ceil, "ceil {} < {}", ceil, t);

        let nearest = single_tons(&set.select(t, TierMethod::Nearest).unwrap());
        prop_assert!(nearest as f64 == floor || nearest as f64 == ceil);
    }

    #[test]
    fn interp_on_boundary_returns_tier_rate(
        tonnages in any_tonnages(),
        index in any::<prop::sample::Index>(),
    ) {
        let headers: Vec<String> = tonnages.iter().map(|t| format!("{}t", t)).collect();
        let rates: Vec<String> = tonnages.iter().map(|t| format!("{},25", t * 7 + 3)).collect();
        let csv = format!("Postcode;{}\n12345;{}\n", headers.join(";"), rates.join(";"));
        let table = TariffTable::from_delimited(&csv, &LoadOptions::default()).unwrap();

        let i = index.index(tonnages.len());
        let query = Query::new("12", tonnages[i].to_string())
            .unit(WeightUnit::Ton)
            .method(TierMethod::Interp);
        let quote = resolve(&table, &query).unwrap();
        prop_assert_eq!(quote.tariff, (tonnages[i] * 7 + 3) as f64 + 0.25);
    }

    #[test]
    fn total_is_tariff_plus_surcharges(
        deliveries in -5.0f64..20.0,
        surcharge in -50.0f64..200.0,
        weight in 1u32..30,
    ) {
        let table = TariffTable::from_delimited(
            "Postcode,1 ton,10 ton,20 ton\n10115,100,200,300\n",
            &LoadOptions::default(),
        )
        .unwrap();
        let query = Query::new("10115", weight.to_string())
            .unit(WeightUnit::Ton)
            .deliveries(deliveries)
            .surcharge(surcharge);
        let quote = resolve(&table, &query).unwrap();
        prop_assert_eq!(
            quote.total,
            quote.tariff + deliveries.max(1.0) * surcharge.max(0.0)
        );
    }
}
