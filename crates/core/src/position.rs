//! Position records scraped from the vault dashboard and the threshold
//! filter applied to them.

use crate::numeric::extract_decimal;
use rust_decimal::Decimal;

/// One raw table row as scraped from the dashboard, cell texts in DOM order.
///
/// This is the wire contract with the externally controlled page: at least
/// four cells (coin, leverage, size, mark) are expected per position row.
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    #[must_use]
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

/// An open perpetual position, valid for a single run.
///
/// Invariant: `size` and `mark` are nonzero and `value == size * mark`
/// exactly. Rows violating this never become records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRecord {
    pub coin: String,
    /// Free-form leverage label (e.g. "10x"), informational only.
    pub leverage: String,
    pub size: Decimal,
    pub mark: Decimal,
    /// Notional value, `size * mark`.
    pub value: Decimal,
}

/// Parses scraped rows into position records.
///
/// Rows with fewer than four cells are skipped. Size and mark cells go
/// through [`extract_decimal`]; a zero in either drops the row, since a zero
/// position and unparseable text are treated identically. The filter is
/// idempotent: re-parsing retained records would retain them all.
#[must_use]
pub fn parse_rows(rows: &[TableRow]) -> Vec<PositionRecord> {
    rows.iter().filter_map(parse_row).collect()
}

fn parse_row(row: &TableRow) -> Option<PositionRecord> {
    if row.cells.len() < 4 {
        return None;
    }

    let coin = row.cells[0].trim().to_string();
    let leverage = row.cells[1].trim().to_string();
    let size = extract_decimal(&row.cells[2]);
    let mark = extract_decimal(&row.cells[3]);

    if size.is_zero() || mark.is_zero() {
        return None;
    }

    Some(PositionRecord {
        coin,
        leverage,
        size,
        mark,
        value: size * mark,
    })
}

/// Returns the positions whose absolute notional value strictly exceeds
/// `threshold`, in scrape order.
#[must_use]
pub fn breaching(records: &[PositionRecord], threshold: Decimal) -> Vec<&PositionRecord> {
    records
        .iter()
        .filter(|record| record.value.abs() > threshold)
        .collect()
}
