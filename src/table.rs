//! Tariff tables: loading and lookup
//!
//! A tariff table is the first sheet of a spreadsheet (or a delimited text
//! file) with a header row. One column holds the postcode, every column whose
//! header names a tonnage holds the fixed per-delivery tariff for that tier.
//!
//! ```text
//! Postcode ; 1 ton  ; 2 ton  ; 5 ton  ; ...
//! 10115    ; 120,00 ; 135,50 ; 190,00 ; ...
//! 50667    ;  98,00 ; 110,00 ; 150,00 ; ...
//! ```
//!
//! Tiers are parsed from the headers once, when the table is built, and the
//! table is immutable afterwards.

use crate::error::{Error, Result};
use crate::postcode::Prefix;
use crate::tier::{Tier, TierSet};
use crate::weight::parse_decimal;
use calamine::{open_workbook_auto, Reader};
use std::path::Path;

/// Default header of the postcode column
pub const DEFAULT_POSTCODE_COLUMN: &str = "Postcode";

/// Options that affect how a table is interpreted
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Header of the postcode column
    pub postcode_column: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            postcode_column: DEFAULT_POSTCODE_COLUMN.to_string(),
        }
    }
}

/// Input format, decided by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Delimited,
    Workbook,
}

impl SourceFormat {
    pub fn detect(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => SourceFormat::Workbook,
            _ => SourceFormat::Delimited,
        }
    }
}

/// One data row; cells line up with the table headers
#[derive(Debug, Clone, PartialEq)]
pub struct TariffRow {
    cells: Vec<String>,
}

impl TariffRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell at a column index, `""` when absent
    pub fn get(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

/// A loaded tariff table
#[derive(Debug, Clone)]
pub struct TariffTable {
    headers: Vec<String>,
    rows: Vec<TariffRow>,
    postcode_index: Option<usize>,
    tiers: TierSet,
}

impl TariffTable {
    /// Build a table from headers and rows
    ///
    /// Blank rows are dropped; short rows are padded with empty cells. Fails
    /// with [`Error::NoRows`] when nothing is left.
    pub fn new(headers: Vec<String>, rows: Vec<TariffRow>, options: &LoadOptions) -> Result<Self> {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(Error::EmptyFile);
        }

        let width = headers.len();
        let rows: Vec<TariffRow> = rows
            .into_iter()
            .filter(|r| !r.is_blank())
            .map(|mut r| {
                if r.cells.len() < width {
                    r.cells.resize(width, String::new());
                }
                r
            })
            .collect();
        if rows.is_empty() {
            return Err(Error::NoRows);
        }

        let postcode_index = headers.iter().position(|h| *h == options.postcode_column);
        if postcode_index.is_none() {
            tracing::warn!(column = %options.postcode_column, "postcode column not found");
        }

        let tiers = TierSet::from_headers(&headers);
        tracing::info!(
            rows = rows.len(),
            columns = width,
            tiers = tiers.len(),
            "tariff table loaded"
        );

        Ok(Self {
            headers,
            rows,
            postcode_index,
            tiers,
        })
    }

    /// Load a table from a file, choosing the reader by extension
    pub fn from_path(path: &Path, options: &LoadOptions) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading tariff table");
        match SourceFormat::detect(path) {
            SourceFormat::Workbook => Self::from_workbook(path, options),
            SourceFormat::Delimited => {
                let bytes = std::fs::read(path)
                    .map_err(|e| Error::Unreadable(format!("{}: {}", path.display(), e)))?;
                Self::from_delimited(&String::from_utf8_lossy(&bytes), options)
            }
        }
    }

    /// Parse delimited text (CSV, semicolon-separated or TSV)
    pub fn from_delimited(text: &str, options: &LoadOptions) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        if text.trim().is_empty() {
            return Err(Error::EmptyFile);
        }

        let delimiter = detect_delimiter(text);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(TariffRow::new(record.iter().map(str::to_string).collect()));
        }

        Self::new(headers, rows, options)
    }

    /// Read the first sheet of a workbook
    pub fn from_workbook(path: &Path, options: &LoadOptions) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| Error::Unreadable(format!("{}: {}", path.display(), e)))?;
        let range = workbook.worksheet_range_at(0).ok_or(Error::EmptyFile)??;

        let mut lines = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
        let headers = lines.next().ok_or(Error::EmptyFile)?;
        let rows = lines.map(TariffRow::new).collect();

        Self::new(headers, rows, options)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[TariffRow] {
        &self.rows
    }

    pub fn tiers(&self) -> &TierSet {
        &self.tiers
    }

    pub fn postcode_index(&self) -> Option<usize> {
        self.postcode_index
    }

    /// Postcode cell of a row, `""` when the table has no postcode column
    pub fn postcode_of<'a>(&self, row: &'a TariffRow) -> &'a str {
        self.postcode_index.map(|i| row.get(i)).unwrap_or("")
    }

    /// First row whose postcode starts with `prefix`
    pub fn find_row(&self, prefix: &Prefix) -> Result<&TariffRow> {
        self.rows
            .iter()
            .find(|row| prefix.matches(self.postcode_of(row)))
            .ok_or_else(|| Error::NoMatchingRow {
                prefix: prefix.to_string(),
            })
    }

    /// Tariff of `row` in the column of `tier`
    pub fn rate(&self, row: &TariffRow, tier: &Tier) -> Result<f64> {
        parse_decimal(row.get(tier.index)).ok_or_else(|| Error::InvalidTariffCell {
            column: tier.column.clone(),
        })
    }

    /// Content hash, for correlating quotes with their source table
    pub fn hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(self.headers.join("\u{1f}").as_bytes());
        for row in &self.rows {
            hasher.update(b"\x1e");
            hasher.update(row.cells.join("\u{1f}").as_bytes());
        }
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }
}

/// Pick the delimiter occurring most often in the header line
///
/// Ties prefer `;`, then tab, then `,`: exports with decimal commas use
/// semicolons.
fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    [(b';', 2), (b'\t', 1), (b',', 0)]
        .into_iter()
        .map(|(d, rank)| (header.matches(d as char).count(), rank, d))
        .filter(|(count, _, _)| *count > 0)
        .max()
        .map(|(_, _, d)| d)
        .unwrap_or(b',')
}
