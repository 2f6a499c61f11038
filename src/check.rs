//! Table health checks
//!
//! A loaded table can still be unusable in parts: rows that can never match,
//! duplicate prefixes that shadow later rows, tier cells that will fail a
//! quote. `check_table` lists these up front instead of at quote time.

use crate::postcode::Prefix;
use crate::table::TariffTable;
use crate::weight::parse_decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Severity level for table issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A problem found in a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TableIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub message: String,
    /// 1-based data row, when the issue is tied to one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

impl TableIssue {
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            severity: IssueSeverity::Error,
            code: code.to_string(),
            message: message.to_string(),
            row: None,
        }
    }

    pub fn warning(code: &str, message: &str) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            code: code.to_string(),
            message: message.to_string(),
            row: None,
        }
    }

    fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }
}

/// Result of checking a table
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TableReport {
    pub rows: usize,
    pub tiers: usize,
    pub hash: String,
    pub issues: Vec<TableIssue>,
}

impl TableReport {
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .count()
    }

    /// Whether the check passes; strict mode fails on warnings too
    pub fn passed(&self, strict: bool) -> bool {
        if strict {
            self.issues.is_empty()
        } else {
            !self.has_errors()
        }
    }
}

/// Check a table for problems that would make quotes fail
pub fn check_table(table: &TariffTable, postcode_column: &str) -> TableReport {
    let mut issues = Vec::new();
    let tiers = table.tiers();

    if table.postcode_index().is_none() {
        issues.push(TableIssue::error(
            "T001",
            &format!("Postcode column \"{}\" not found", postcode_column),
        ));
    }

    if tiers.is_empty() {
        issues.push(TableIssue::error(
            "T002",
            "No tier columns found (expected headers like \"1 ton\", \"2 ton\", ...)",
        ));
    }

    for dup in tiers.duplicates() {
        issues.push(TableIssue::warning(
            "T003",
            &format!(
                "Column \"{}\" repeats the {} ton tier and is ignored",
                dup.column, dup.tons
            ),
        ));
    }

    if table.postcode_index().is_some() {
        let mut first_seen: HashMap<Prefix, usize> = HashMap::new();
        for (i, row) in table.rows().iter().enumerate() {
            let line = i + 1;
            let cell = table.postcode_of(row);
            match Prefix::from_cell(cell) {
                None => issues.push(
                    TableIssue::warning(
                        "T004",
                        &format!("Postcode \"{}\" has fewer than 2 digits", cell.trim()),
                    )
                    .at_row(line),
                ),
                Some(prefix) => {
                    if let Some(first) = first_seen.get(&prefix) {
                        issues.push(
                            TableIssue::warning(
                                "T005",
                                &format!(
                                    "Prefix {} already defined in row {}; this row is never used",
                                    prefix, first
                                ),
                            )
                            .at_row(line),
                        );
                    } else {
                        first_seen.insert(prefix, line);
                    }
                }
            }
        }
    }

    for (i, row) in table.rows().iter().enumerate() {
        for tier in tiers.tiers() {
            if parse_decimal(row.get(tier.index)).is_none() {
                issues.push(
                    TableIssue::warning(
                        "T006",
                        &format!(
                            "Invalid tariff \"{}\" in column \"{}\"",
                            row.get(tier.index),
                            tier.column
                        ),
                    )
                    .at_row(i + 1),
                );
            }
        }
    }

    TableReport {
        rows: table.rows().len(),
        tiers: tiers.len(),
        hash: table.hash(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::LoadOptions;

    fn load(text: &str) -> TariffTable {
        TariffTable::from_delimited(text, &LoadOptions::default()).unwrap()
    }

    fn codes(report: &TableReport) -> Vec<&str> {
        report.issues.iter().map(|i| i.code.as_str()).collect()
    }

    #[test]
    fn test_clean_table() {
        let report = check_table(&load("Postcode,1 ton,2 ton\n10,1,2\n20,3,4\n"), "Postcode");
        assert!(report.issues.is_empty());
        assert!(report.passed(true));
        assert_eq!(report.rows, 2);
        assert_eq!(report.tiers, 2);
    }

    #[test]
    fn test_missing_columns() {
        let report = check_table(&load("Zip,Price\n10,1\n"), "Postcode");
        assert_eq!(codes(&report), vec!["T001", "T002"]);
        assert!(report.has_errors());
        assert!(!report.passed(false));
    }

    #[test]
    fn test_row_level_warnings() {
        let report = check_table(
            &load("Postcode,1 ton,1t\n10115,5,5\n10999,6,6\nX,7,7\n20,,8\n"),
            "Postcode",
        );
        assert_eq!(codes(&report), vec!["T003", "T005", "T004", "T006"]);
        let dup = &report.issues[1];
        assert_eq!(dup.row, Some(2));
        assert!(dup.message.contains("row 1"));
        assert_eq!(report.issues[3].row, Some(4));
        assert!(report.passed(false));
        assert!(!report.passed(true));
        assert_eq!(report.warning_count(), 4);
        assert_eq!(report.error_count(), 0);
    }
}
