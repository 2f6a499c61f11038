//! Weight input and decimal parsing
//!
//! Weights and tariff cells arrive as free text from a form or a spreadsheet.
//! Both go through [`parse_decimal`], which accepts a decimal comma and reads
//! the leading number of the text, so `"12,5 t"` parses as `12.5`.

use crate::error::{Error, Result};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("static regex")
});

/// Parse the leading decimal number of `text`
///
/// Only the first comma is treated as a decimal separator. Returns `None`
/// when the text does not start with a number or the value is not finite.
///
/// # Examples
/// ```
/// use staffel::weight::parse_decimal;
/// assert_eq!(parse_decimal("12,5"), Some(12.5));
/// assert_eq!(parse_decimal(" 8.2 t"), Some(8.2));
/// assert_eq!(parse_decimal("abc"), None);
/// ```
pub fn parse_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replacen(',', ".", 1);
    let m = LEADING_NUMBER.find(&normalized)?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Unit of the weight entered by the user
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    #[serde(alias = "t", alias = "tonne")]
    Ton,
}

impl WeightUnit {
    /// Convert a value in this unit to tons
    pub fn to_tons(self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value / 1000.0,
            WeightUnit::Ton => value,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Ton => write!(f, "ton"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "t" | "ton" | "tons" | "tonne" => Ok(WeightUnit::Ton),
            other => Err(Error::Other(format!(
                "Unknown weight unit: {}. Use 'kg' or 'ton'.",
                other
            ))),
        }
    }
}

/// Parse a weight and normalize it to tons
///
/// Fails with [`Error::InvalidWeight`] unless the value is a number > 0.
pub fn to_tons(text: &str, unit: WeightUnit) -> Result<f64> {
    match parse_decimal(text) {
        Some(v) if v > 0.0 => Ok(unit.to_tons(v)),
        _ => Err(Error::InvalidWeight),
    }
}
