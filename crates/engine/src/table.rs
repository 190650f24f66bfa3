//! Table loading: CSV text into typed rows, with row-level error isolation.
//!
//! Abort-class problems (unparseable CSV, a missing designated column) fail
//! the whole job before any matching. Bad data inside a single row never
//! does: the row is skipped (reference) or kept with a blank code (query)
//! and the count surfaces in the run summary.

use crate::config::{QueryTableConfig, ReferenceTableConfig};
use crate::error::MatchError;
use crate::model::{QueryRow, ReferenceRow};

/// Rows plus the count of rows hit by row-level data errors.
#[derive(Debug)]
pub struct Loaded<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

/// Load the reference table. Rows with a blank code or an unconvertible
/// price are excluded from the pool and counted.
pub fn load_reference_rows(
    csv_data: &str,
    config: &ReferenceTableConfig,
) -> Result<Loaded<ReferenceRow>, MatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let code_idx = column_index(&mut reader, "reference", &config.columns.code)?;
    let price_idx = column_index(&mut reader, "reference", &config.columns.price)?;

    let mut rows = Vec::new();
    let mut skipped = 0;

    for record in reader.records() {
        let record = record.map_err(|e| MatchError::InputFormat {
            table: "reference".into(),
            detail: e.to_string(),
        })?;

        let code = record.get(code_idx).unwrap_or("").trim();
        if code.is_empty() {
            skipped += 1;
            continue;
        }

        let price_str = record.get(price_idx).unwrap_or("").trim();
        let Ok(price) = price_str.parse::<f64>() else {
            skipped += 1;
            continue;
        };

        rows.push(ReferenceRow {
            raw_code: code.to_string(),
            price,
        });
    }

    Ok(Loaded { rows, skipped })
}

/// Load the query table. Rows with a blank code are kept (every query row
/// must emit a result) but counted as data errors.
pub fn load_query_rows(
    csv_data: &str,
    config: &QueryTableConfig,
) -> Result<Loaded<QueryRow>, MatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let code_idx = column_index(&mut reader, "query", &config.columns.code)?;

    let mut rows = Vec::new();
    let mut skipped = 0;

    for record in reader.records() {
        let record = record.map_err(|e| MatchError::InputFormat {
            table: "query".into(),
            detail: e.to_string(),
        })?;

        let code = record.get(code_idx).unwrap_or("").trim();
        if code.is_empty() {
            skipped += 1;
        }
        rows.push(QueryRow {
            raw_code: code.to_string(),
        });
    }

    Ok(Loaded { rows, skipped })
}

fn column_index<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    table: &str,
    column: &str,
) -> Result<usize, MatchError> {
    let headers = reader.headers().map_err(|e| MatchError::InputFormat {
        table: table.into(),
        detail: e.to_string(),
    })?;
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| MatchError::MissingColumn {
            table: table.into(),
            column: column.into(),
        })
}
