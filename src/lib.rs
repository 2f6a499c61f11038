// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # staffel: tiered transport tariffs
//!
//! Look up the cost of a delivery from a spreadsheet of tariffs
//! ("staffeltarief"): one row per two-digit postcode region, one column per
//! weight tier, each cell a fixed amount per delivery.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use staffel::{resolve, LoadOptions, Query, TariffTable, TierMethod, WeightUnit};
//!
//! let table = TariffTable::from_path("tarieven.xlsx".as_ref(), &LoadOptions::default())?;
//!
//! let query = Query::new("10115", "12,5")
//!     .unit(WeightUnit::Ton)
//!     .method(TierMethod::Ceil);
//! let quote = resolve(&table, &query)?;
//!
//! println!("{}", quote.to_report());
//! ```
//!
//! ## Table Format
//!
//! ```text
//! Postcode | 1 ton  | 2 ton  | ... | 24 ton
//! 10115    | 120,00 | 135,50 | ... | 610,00
//! 50667    |  98,00 | 110,00 | ... | 540,00
//! ```
//!
//! The weight only decides which tier applies; the total is
//! `tier tariff + deliveries × surcharge` (surcharge defaults to € 35).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │  FILE (.xlsx / .ods / .csv)                                  │
//! │       │                                                      │
//! │       └──► TariffTable::from_path ──► TariffTable + TierSet  │
//! │                                           │                  │
//! │  Query ───────────────────────────────────┤                  │
//! │                                           ▼                  │
//! │                               resolve(table, query) ──► Quote│
//! │                                                              │
//! │  check_table(table) ──► TableReport                          │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod format;
pub mod postcode;
pub mod resolve;
pub mod table;
pub mod tier;
pub mod weight;

// Re-exports
pub use check::{check_table, IssueSeverity, TableIssue, TableReport};
pub use config::{QueryDefaults, QueryOverrides, StaffelConfig};
pub use error::{Error, Result};
pub use format::format_eur;
pub use postcode::Prefix;
pub use resolve::{parse_amount, resolve, Query, Quote, DEFAULT_DELIVERIES, DEFAULT_SURCHARGE};
pub use table::{LoadOptions, SourceFormat, TariffRow, TariffTable};
pub use tier::{Selection, Tier, TierMethod, TierSet};
pub use weight::{parse_decimal, WeightUnit};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
