//! Output formatting
//!
//! Amounts are shown the way a Dutch invoice shows them: `€ 1.234,56`.
//! The text report mirrors the result panel of the calculator form.

use crate::check::{IssueSeverity, TableReport};
use crate::resolve::Quote;
use crate::tier::TierSet;

/// Format an amount in euro, nl-NL style
///
/// # Examples
/// ```
/// use staffel::format::format_eur;
/// assert_eq!(format_eur(1234.5), "€ 1.234,50");
/// assert_eq!(format_eur(35.0), "€ 35,00");
/// ```
pub fn format_eur(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!(
        "€ {}{},{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Insert `.` between groups of three digits
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

impl Quote {
    /// Human-readable result panel
    pub fn to_report(&self) -> String {
        let rows = [
            ("Prefix", self.prefix.to_string()),
            ("Weight (t)", format!("{:.2}", self.weight_tons)),
            ("Tier used", self.tier.clone()),
            ("Tier tariff", format_eur(self.tariff)),
            ("Surcharges", format_eur(self.surcharge_total)),
        ];

        let mut out = String::new();
        for (label, value) in &rows {
            out.push_str(&format!("{:<22}{:>20}\n", label, value));
        }
        out.push_str(&format!("{}\n", "─".repeat(42)));
        out.push_str(&format!(
            "{:<22}{:>20}\n",
            "Total per delivery",
            format_eur(self.total)
        ));
        out
    }
}

impl TierSet {
    /// One line per tier, ascending
    pub fn to_report(&self) -> String {
        if self.is_empty() {
            return "No tier columns found\n".to_string();
        }
        let mut out = format!("{} tier(s):\n", self.len());
        for tier in self.tiers() {
            out.push_str(&format!("  {:>3} t  ← \"{}\"\n", tier.tons, tier.column));
        }
        for dup in self.duplicates() {
            out.push_str(&format!("  ignored duplicate \"{}\"\n", dup.column));
        }
        out
    }
}

impl TableReport {
    pub fn to_report(&self) -> String {
        let mut out = format!(
            "Table: {} row(s), {} tier(s), {}\n",
            self.rows, self.tiers, self.hash
        );

        for issue in &self.issues {
            let (mark, level) = match issue.severity {
                IssueSeverity::Error => ("✗", "ERROR"),
                IssueSeverity::Warning => ("⚠", "WARN"),
            };
            out.push_str(&format!(
                "{} [{}] {}: {}\n",
                mark, issue.code, level, issue.message
            ));
        }

        if self.issues.is_empty() {
            out.push_str("✓ Table is valid\n");
        } else {
            out.push_str(&format!(
                "\n{} error(s), {} warning(s)\n",
                self.error_count(),
                self.warning_count()
            ));
        }
        out
    }
}
