//! CSV reading of one named yearly series.

use std::path::Path;

use tracing::warn;

use helios_series::ObservationSeries;

use crate::error::IoError;

/// Reads a yearly series from a CSV file with a header row.
///
/// The year and value columns must match the configured names exactly —
/// normalising vendor-specific headers is the job of whatever produced the
/// file, not of this reader. Empty value cells are skipped as missing
/// observations; a duplicate year keeps the first occurrence. Both are
/// logged.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::Csv`] | malformed CSV |
/// | [`IoError::ColumnMissing`] | a configured column is absent |
/// | [`IoError::BadCell`] | unparsable year or value |
/// | [`IoError::Series`] | the collected rows violate series invariants |
pub fn read_series(
    path: &Path,
    series_name: &str,
    year_column: &str,
    value_column: &str,
) -> Result<ObservationSeries, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| IoError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let headers = reader
        .headers()
        .map_err(|e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
        .clone();
    let year_idx = column_index(path, &headers, year_column)?;
    let value_idx = column_index(path, &headers, value_column)?;

    let mut years: Vec<i32> = Vec::new();
    let mut values: Vec<f64> = Vec::new();
    let mut skipped_missing = 0usize;
    let mut skipped_duplicate = 0usize;

    for (row, record) in reader.records().enumerate() {
        let line = row + 2; // header is line 1
        let record = record.map_err(|e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let year_cell = record.get(year_idx).unwrap_or("").trim();
        let year: i32 = year_cell.parse().map_err(|_| IoError::BadCell {
            path: path.to_path_buf(),
            line,
            cell: year_cell.to_string(),
            expected: "a year (integer)",
        })?;

        let value_cell = record.get(value_idx).unwrap_or("").trim();
        if value_cell.is_empty() {
            skipped_missing += 1;
            continue;
        }
        let value: f64 = value_cell.parse().map_err(|_| IoError::BadCell {
            path: path.to_path_buf(),
            line,
            cell: value_cell.to_string(),
            expected: "a number",
        })?;

        if years.contains(&year) {
            skipped_duplicate += 1;
            continue;
        }
        years.push(year);
        values.push(value);
    }

    if skipped_missing > 0 {
        warn!(
            series = series_name,
            rows = skipped_missing,
            "skipped rows with empty value cells"
        );
    }
    if skipped_duplicate > 0 {
        warn!(
            series = series_name,
            rows = skipped_duplicate,
            "skipped duplicate years (first occurrence kept)"
        );
    }

    Ok(ObservationSeries::new(series_name, years, values)?)
}

fn column_index(
    path: &Path,
    headers: &csv::StringRecord,
    column: &str,
) -> Result<usize, IoError> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| IoError::ColumnMissing {
            path: path.to_path_buf(),
            column: column.to_string(),
            available: headers.iter().collect::<Vec<_>>().join(", "),
        })
}
