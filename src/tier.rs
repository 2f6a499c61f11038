//! Weight tiers ("staffels")
//!
//! Tier columns are discovered once from the table headers. A header names a
//! tier when it contains an integer tonnage of one to three digits followed by
//! a ton suffix: `1 ton`, `12t`, `24 Tonnes`, `Staffel 5 ton`.
//!
//! The resulting [`TierSet`] is sorted ascending by tonnage and is what the
//! selection methods operate on:
//!
//! | Method | Picks |
//! |--------|-------|
//! | `ceil` | smallest tier ≥ tons, else the largest |
//! | `floor` | largest tier ≤ tons, else the smallest |
//! | `nearest` | closest tier, ties go to the lower one |
//! | `interp` | the two bounding tiers, blended linearly |
//!
//! Requested tons are always clamped into `[min tier, max tier]` first.

use crate::error::{Error, Result};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static TIER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)(\d{1,3})\s*(?:tonne|ton|t)s?(?:$|\b)").expect("static regex")
});

/// A tonnage threshold and the column that holds its tariff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Tier {
    /// Threshold in tons
    pub tons: u32,
    /// Header of the source column
    pub column: String,
    /// Position of the column in the table
    pub index: usize,
}

impl Tier {
    /// Parse a header into a tier, if it names one
    pub fn from_header(header: &str, index: usize) -> Option<Self> {
        let caps = TIER_HEADER.captures(header)?;
        let tons = caps.get(1)?.as_str().parse().ok()?;
        Some(Tier {
            tons,
            column: header.to_string(),
            index,
        })
    }
}

/// How requested tons map onto the available tiers
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TierMethod {
    #[default]
    Ceil,
    Floor,
    Nearest,
    Interp,
}

impl TierMethod {
    pub const ALL: [TierMethod; 4] = [
        TierMethod::Ceil,
        TierMethod::Floor,
        TierMethod::Nearest,
        TierMethod::Interp,
    ];
}

impl fmt::Display for TierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierMethod::Ceil => write!(f, "ceil"),
            TierMethod::Floor => write!(f, "floor"),
            TierMethod::Nearest => write!(f, "nearest"),
            TierMethod::Interp => write!(f, "interp"),
        }
    }
}

impl FromStr for TierMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ceil" | "up" => Ok(TierMethod::Ceil),
            "floor" | "down" => Ok(TierMethod::Floor),
            "nearest" => Ok(TierMethod::Nearest),
            "interp" | "interpolate" | "linear" => Ok(TierMethod::Interp),
            other => Err(Error::Other(format!(
                "Unknown tier method: {}. Use ceil, floor, nearest or interp.",
                other
            ))),
        }
    }
}

/// Outcome of tier selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Selection {
    /// A single tier's tariff applies
    Single { tier: Tier },
    /// Blend of two tiers at `tons`
    Interpolated { lower: Tier, upper: Tier, tons: f64 },
}

impl Selection {
    /// Label shown as "tier used"
    pub fn label(&self) -> String {
        match self {
            Selection::Single { tier } => tier.column.clone(),
            Selection::Interpolated { lower, upper, .. } => {
                format!("{}–{} (interp)", lower.tons, upper.tons)
            }
        }
    }

    /// Weight of the upper tier's rate in the blend
    ///
    /// Zero when both bounds are the same tier.
    pub fn fraction(&self) -> f64 {
        match self {
            Selection::Single { .. } => 0.0,
            Selection::Interpolated { lower, upper, tons } => {
                if upper.tons == lower.tons {
                    0.0
                } else {
                    (tons - lower.tons as f64) / (upper.tons - lower.tons) as f64
                }
            }
        }
    }
}

/// Tier columns of a table, ascending by tonnage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TierSet {
    tiers: Vec<Tier>,
    /// Headers that repeated an already-seen tonnage
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    duplicates: Vec<Tier>,
}

impl TierSet {
    /// Discover tiers from table headers
    ///
    /// When two headers carry the same tonnage, the one further left wins.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut tiers: Vec<Tier> = Vec::new();
        let mut duplicates = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            let Some(tier) = Tier::from_header(header.as_ref(), index) else {
                continue;
            };
            if tiers.iter().any(|t| t.tons == tier.tons) {
                tracing::warn!(
                    column = %tier.column,
                    tons = tier.tons,
                    "duplicate tier tonnage, column ignored"
                );
                duplicates.push(tier);
            } else {
                tiers.push(tier);
            }
        }

        tiers.sort_by_key(|t| t.tons);
        TierSet { tiers, duplicates }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn duplicates(&self) -> &[Tier] {
        &self.duplicates
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn min(&self) -> Option<&Tier> {
        self.tiers.first()
    }

    pub fn max(&self) -> Option<&Tier> {
        self.tiers.last()
    }

    /// Clamp tons into the tier range
    pub fn clamp(&self, tons: f64) -> Result<f64> {
        let (min, max) = self.bounds()?;
        Ok(tons.max(min.tons as f64).min(max.tons as f64))
    }

    /// Select the tier(s) for `tons` using `method`
    pub fn select(&self, tons: f64, method: TierMethod) -> Result<Selection> {
        let (min, max) = self.bounds()?;
        let t = self.clamp(tons)?;

        let selection = match method {
            TierMethod::Ceil => Selection::Single {
                tier: self.ceil(t).unwrap_or(max).clone(),
            },
            TierMethod::Floor => Selection::Single {
                tier: self.floor(t).unwrap_or(min).clone(),
            },
            TierMethod::Nearest => Selection::Single {
                tier: self.nearest(t).unwrap_or(min).clone(),
            },
            TierMethod::Interp => Selection::Interpolated {
                lower: self.floor(t).unwrap_or(min).clone(),
                upper: self.ceil(t).unwrap_or(max).clone(),
                tons: t,
            },
        };

        tracing::debug!(tons, clamped = t, %method, tier = %selection.label(), "tier selected");
        Ok(selection)
    }

    fn bounds(&self) -> Result<(&Tier, &Tier)> {
        match (self.min(), self.max()) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(Error::NoTierColumns),
        }
    }

    fn ceil(&self, t: f64) -> Option<&Tier> {
        self.tiers.iter().find(|tier| tier.tons as f64 >= t)
    }

    fn floor(&self, t: f64) -> Option<&Tier> {
        self.tiers.iter().rev().find(|tier| tier.tons as f64 <= t)
    }

    fn nearest(&self, t: f64) -> Option<&Tier> {
        let mut best: Option<(&Tier, f64)> = None;
        for tier in &self.tiers {
            let distance = (tier.tons as f64 - t).abs();
            // Strict comparison keeps the lower tier on ties
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((tier, distance));
            }
        }
        best.map(|(tier, _)| tier)
    }
}
