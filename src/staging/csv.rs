use anyhow::{Context, Result};
use std::path::Path;

use super::record::StagedRow;

/// Read a staging CSV file (comma-delimited, header row) into a batch of
/// loosely-typed rows. Header names become column names; no typing or
/// validation happens here.
pub fn read_staging_file(path: &Path) -> Result<Vec<StagedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open staging file: {:?}", path))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row: {:?}", path))?
        .clone();

    let mut rows = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("Failed to read record {} in {:?}", i + 1, path))?;

        let mut row = StagedRow::new(i + 1);
        for (header, field) in headers.iter().zip(record.iter()) {
            row.set(header, field);
        }
        rows.push(row);
    }

    Ok(rows)
}
