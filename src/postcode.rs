//! Postcode prefixes: the geographic join key
//!
//! Both the query postcode and the table's postcode column are reduced to
//! their digits; the first two digits form the prefix.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-digit postcode prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Prefix(String);

impl Prefix {
    /// Extract the prefix from a postcode, ignoring every non-digit
    ///
    /// # Examples
    /// ```
    /// use staffel::postcode::Prefix;
    /// assert_eq!(Prefix::extract("10115").unwrap().as_str(), "10");
    /// assert_eq!(Prefix::extract("D-50667").unwrap().as_str(), "50");
    /// assert!(Prefix::extract("a").is_err());
    /// ```
    pub fn extract(postcode: &str) -> Result<Self> {
        Self::from_cell(postcode).ok_or(Error::InvalidPostcode)
    }

    /// Lenient variant used on table cells, which may hold anything
    pub fn from_cell(raw: &str) -> Option<Self> {
        let digits: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(2)
            .collect();
        (digits.len() == 2).then_some(Prefix(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a raw postcode cell belongs to this prefix
    pub fn matches(&self, cell: &str) -> bool {
        Self::from_cell(cell).as_ref() == Some(self)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
