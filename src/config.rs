//! staffel configuration
//!
//! An optional `staffel.yaml` supplies the postcode column name and the
//! defaults for a quote. Command-line flags override it, and it overrides the
//! built-in defaults.
//!
//! ```yaml
//! version: 1
//! postcode_column: Postcode
//! defaults:
//!   unit: ton
//!   method: ceil
//!   deliveries: 1
//!   surcharge: 35
//! ```

use crate::error::{Error, Result};
use crate::resolve::{Query, DEFAULT_DELIVERIES, DEFAULT_SURCHARGE};
use crate::table::{LoadOptions, DEFAULT_POSTCODE_COLUMN};
use crate::tier::TierMethod;
use crate::weight::WeightUnit;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE: &str = "staffel.yaml";

/// Root configuration (`staffel.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StaffelConfig {
    /// Schema version for migrations
    pub version: u32,

    /// Header of the postcode column in tariff tables
    #[serde(default = "default_postcode_column")]
    pub postcode_column: String,

    /// Defaults applied to every quote
    #[serde(default)]
    pub defaults: QueryDefaults,
}

fn default_postcode_column() -> String {
    DEFAULT_POSTCODE_COLUMN.to_string()
}

/// Quote defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueryDefaults {
    #[serde(default)]
    pub unit: WeightUnit,

    #[serde(default)]
    pub method: TierMethod,

    #[serde(default = "default_deliveries")]
    pub deliveries: f64,

    /// Surcharge per delivery in euro
    #[serde(default = "default_surcharge")]
    pub surcharge: f64,
}

fn default_deliveries() -> f64 {
    DEFAULT_DELIVERIES
}

fn default_surcharge() -> f64 {
    DEFAULT_SURCHARGE
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            unit: WeightUnit::default(),
            method: TierMethod::default(),
            deliveries: DEFAULT_DELIVERIES,
            surcharge: DEFAULT_SURCHARGE,
        }
    }
}

impl Default for StaffelConfig {
    fn default() -> Self {
        Self {
            version: 1,
            postcode_column: default_postcode_column(),
            defaults: QueryDefaults::default(),
        }
    }
}

/// Per-invocation overrides, typically from command-line flags
#[derive(Debug, Clone, Default)]
pub struct QueryOverrides {
    pub unit: Option<WeightUnit>,
    pub method: Option<TierMethod>,
    pub deliveries: Option<f64>,
    pub surcharge: Option<f64>,
}

impl StaffelConfig {
    /// Parse a config from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: StaffelConfig = serde_norway::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        if config.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported config version: {}",
                config.version
            )));
        }
        if config.postcode_column.trim().is_empty() {
            return Err(Error::Config("postcode_column must not be empty".into()));
        }

        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load `staffel.yaml` from a directory, if present
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let file = dir.join(CONFIG_FILE);
        if !file.exists() {
            return Ok(None);
        }
        Self::load(&file).map(Some)
    }

    /// Resolve the effective config: an explicit path must exist, otherwise
    /// `staffel.yaml` in `dir` is used when present
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Ok(Self::load_from_dir(dir)?.unwrap_or_default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            postcode_column: self.postcode_column.clone(),
        }
    }

    /// Build a query from the defaults merged with `overrides`
    pub fn query(&self, postcode: &str, weight: &str, overrides: &QueryOverrides) -> Query {
        Query::new(postcode, weight)
            .unit(overrides.unit.unwrap_or(self.defaults.unit))
            .method(overrides.method.unwrap_or(self.defaults.method))
            .deliveries(overrides.deliveries.unwrap_or(self.defaults.deliveries))
            .surcharge(overrides.surcharge.unwrap_or(self.defaults.surcharge))
    }
}
