//! Bulk location import from spreadsheet-like CSV data.
//!
//! The source sheets were maintained by hand, so the importer tolerates
//! both observed shapes: a header row with known column names, or bare
//! positional columns (code first, zone second) with the occasional stray
//! repeated header row in the middle of the data.

use std::fmt;
use std::io::Read;

use csv::StringRecord;

use crate::error::StoreError;
use crate::store::InventoryStore;

/// Column names recognized as the location code in a header row.
const CODE_ALIASES: &[&str] = &["id scaffale", "id"];

/// Column names recognized as the zone in a header row.
const ZONE_ALIASES: &[&str] = &["zona"];

/// Code-column values that mark a stray repeated header row in positional
/// data.
const HEADER_LITERALS: &[&str] = &["id", "id scaffale", "ubicazione", "scaffale"];

/// Aggregate outcome of a bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    /// Rows upserted into the location store.
    pub imported: usize,
    /// Rows dropped: blank or `nan` fields, stray header rows.
    pub skipped: usize,
}

/// Import failure. Reported as a single aggregate outcome: rows upserted
/// before the failure stay in the store.
#[derive(Debug)]
pub enum ImportError {
    /// The input could not be parsed as CSV.
    Csv(csv::Error),
    /// A store write failed mid-import.
    Store(StoreError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Csv(e) => write!(f, "CSV error: {e}"),
            ImportError::Store(e) => write!(f, "Store error: {e}"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Csv(e) => Some(e),
            ImportError::Store(e) => Some(e),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Csv(err)
    }
}

impl From<StoreError> for ImportError {
    fn from(err: StoreError) -> Self {
        ImportError::Store(err)
    }
}

/// Import `(code, zone)` pairs from CSV data, upserting by code.
///
/// Column detection: when the first row carries a known code alias
/// (`ID SCAFFALE` or `ID`, case-insensitive) it is treated as a header and
/// columns are mapped by name, the zone falling back to the other column
/// when its alias is missing. Otherwise the data is read positionally
/// (column 0 = code, column 1 = zone).
///
/// Per row, the code is trimmed and uppercased and the zone trimmed; rows
/// where either field is empty or the literal `nan` are skipped, as are
/// stray repeated header rows.
pub fn import_locations<S, R>(store: &mut S, input: R) -> Result<ImportReport, ImportError>
where
    S: InventoryStore,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let rows: Vec<StringRecord> = reader.records().collect::<Result<_, _>>()?;

    let mut report = ImportReport::default();
    let Some(first) = rows.first() else {
        return Ok(report);
    };

    let header: Vec<String> = first.iter().map(|c| c.trim().to_lowercase()).collect();
    let code_idx = header
        .iter()
        .position(|h| CODE_ALIASES.contains(&h.as_str()));
    let (start, code_idx, zone_idx) = match code_idx {
        Some(code_idx) => {
            let zone_idx = header
                .iter()
                .position(|h| ZONE_ALIASES.contains(&h.as_str()))
                .unwrap_or(if code_idx == 0 { 1 } else { 0 });
            (1, code_idx, zone_idx)
        }
        None => (0, 0, 1),
    };

    for row in &rows[start..] {
        let code = row.get(code_idx).unwrap_or("").trim();
        if HEADER_LITERALS.contains(&code.to_lowercase().as_str()) {
            report.skipped += 1;
            continue;
        }
        let zone = row.get(zone_idx).unwrap_or("").trim();
        if is_blank(code) || is_blank(zone) {
            report.skipped += 1;
            continue;
        }
        store.upsert_location(&code.to_uppercase(), zone)?;
        report.imported += 1;
    }

    log::info!(
        "imported {} location(s), skipped {} row(s)",
        report.imported,
        report.skipped
    );
    Ok(report)
}

/// A field that carries no data: empty after trimming, or the literal
/// `nan` a spreadsheet exporter writes for missing cells.
fn is_blank(field: &str) -> bool {
    field.is_empty() || field.eq_ignore_ascii_case("nan")
}
