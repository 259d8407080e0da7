//! CSV file contracts for the raw extract and the cleaned table.

use crate::record::{CleanedRecord, CleanedTable, RawTable};
use crate::schema::{CLEANED_COLUMNS, DATA_VALUE};
use nutrigraph_common::{NutriGraphError, Result};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::{debug, instrument};

fn open_existing(path: &Path) -> Result<File> {
    if !path.is_file() {
        return Err(NutriGraphError::missing_input(path));
    }
    Ok(File::open(path)?)
}

/// Reads the raw survey extract.
#[instrument]
pub fn read_raw(path: &Path) -> Result<RawTable> {
    let file = open_existing(path)?;
    let table = RawTable::from_reader(BufReader::new(file))?;
    debug!(rows = table.len(), "read raw extract");
    Ok(table)
}

/// Reads a cleaned table, requiring its header to be exactly the cleaned schema.
#[instrument]
pub fn read_cleaned(path: &Path) -> Result<CleanedTable> {
    let file = open_existing(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let headers = reader.headers()?.clone();

    let missing: Vec<&str> = CLEANED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(NutriGraphError::schema(missing));
    }
    if headers.len() != CLEANED_COLUMNS.len() {
        let extra: Vec<&str> = headers
            .iter()
            .filter(|h| !CLEANED_COLUMNS.contains(h))
            .collect();
        return Err(NutriGraphError::validation_field(
            format!("unexpected columns in cleaned table: {}", extra.join(", ")),
            path.display().to_string(),
        ));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: CleanedRecord = row.deserialize(Some(&headers))?;
        if !record.data_value.is_finite() {
            let line = row.position().map_or(0, csv::Position::line);
            return Err(NutriGraphError::parse(
                line,
                DATA_VALUE,
                format!("non-finite value {}", record.data_value),
            ));
        }
        records.push(record);
    }

    debug!(rows = records.len(), "read cleaned table");
    Ok(CleanedTable::new(records))
}

/// Writes a cleaned table atomically: the destination only appears once fully written.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn write_cleaned(path: &Path, table: &CleanedTable) -> Result<()> {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory)?;

    let mut temp = tempfile::NamedTempFile::new_in(directory)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp.as_file_mut());
        writer.write_record(CLEANED_COLUMNS)?;
        for record in table {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    temp.as_file_mut().flush()?;

    temp.persist(path)
        .map_err(|e| NutriGraphError::with_source("Failed to persist cleaned table", e))?;
    Ok(())
}
