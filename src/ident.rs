//! Sequential box identifiers and QR payload selection.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{BoxRecord, Location};

static DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit run pattern"));

/// Derive the next sequential identifier for `prefix`.
///
/// Scans the existing identifiers that start with `prefix`, extracts every
/// digit run after the prefix and keeps the last run of each, then returns
/// `prefix` followed by the maximum suffix plus one, zero-padded to at
/// least 3 digits. With no matching identifier (or none carrying digits)
/// the sequence starts at `prefix` + `001`.
///
/// # Example
///
/// ```
/// use magazzino::ident::next_box_id;
///
/// let ids = ["SCAT_001", "SCAT_007", "SCAT_A3"];
/// assert_eq!(next_box_id(ids, "SCAT_"), "SCAT_008");
/// assert_eq!(next_box_id([], "SCAT_"), "SCAT_001");
/// ```
pub fn next_box_id<'a, I>(ids: I, prefix: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = ids
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(last_digit_run)
        .max();
    match max {
        Some(n) => format!("{}{:03}", prefix, n + 1),
        None => format!("{}001", prefix),
    }
}

/// Last run of decimal digits in `s`, if any. Runs too large for `u64` are
/// ignored.
fn last_digit_run(s: &str) -> Option<u64> {
    DIGIT_RUNS
        .find_iter(s)
        .last()
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Records that can be encoded on a printed QR label.
///
/// The payload is used verbatim as the QR content, with no framing: a box
/// encodes its name, a location its code. Renaming a record therefore
/// orphans labels printed before the rename.
pub trait QrPayload {
    fn qr_payload(&self) -> &str;
}

impl QrPayload for BoxRecord {
    fn qr_payload(&self) -> &str {
        &self.name
    }
}

impl QrPayload for Location {
    fn qr_payload(&self) -> &str {
        &self.code
    }
}
