//! Cleaning pipeline: raw extract to analysis-ready table.
//!
//! The pipeline validates the header first, then drops rows without a
//! measurement, projects the fixed column set and renames `YearStart` to
//! `Year`. Nothing is written unless every step succeeds.

use crate::io::{read_raw, write_cleaned};
use crate::record::{CleanedRecord, CleanedTable, RawTable};
use crate::schema::{is_missing, missing_raw_columns, DATA_VALUE, REQUIRED_RAW_COLUMNS, YEAR_START};
use nutrigraph_common::{NutriGraphError, Result, Year};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Row counts observed by one cleaning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningReport {
    /// Rows in the raw extract.
    pub initial_rows: usize,
    /// Rows kept after dropping missing measurements.
    pub retained_rows: usize,
    /// Where the cleaned table was written.
    pub output: PathBuf,
}

impl CleaningReport {
    /// Rows removed for a missing `Data_Value`.
    pub fn dropped_rows(&self) -> usize {
        self.initial_rows - self.retained_rows
    }
}

/// Column positions of the retained fields inside a raw header.
struct Projection {
    indices: [usize; REQUIRED_RAW_COLUMNS.len()],
}

impl Projection {
    fn resolve(raw: &RawTable) -> Result<Self> {
        let missing = missing_raw_columns(raw.headers());
        if !missing.is_empty() {
            return Err(NutriGraphError::schema(missing));
        }

        let mut indices = [0; REQUIRED_RAW_COLUMNS.len()];
        for (slot, column) in indices.iter_mut().zip(REQUIRED_RAW_COLUMNS) {
            *slot = raw
                .column_index(column)
                .ok_or_else(|| NutriGraphError::schema([column]))?;
        }
        Ok(Self { indices })
    }

    fn cell<'r>(&self, row: &'r csv::StringRecord, field: usize) -> &'r str {
        row.get(self.indices[field]).unwrap_or("")
    }
}

/// Cleans a loaded raw table.
///
/// Fails with a schema error when any retained column is absent and with a
/// parse error when a present `Data_Value` or a `YearStart` is not numeric.
#[instrument(skip(raw), fields(rows = raw.len()))]
pub fn clean(raw: &RawTable) -> Result<CleanedTable> {
    let projection = Projection::resolve(raw)?;
    let mut records = Vec::with_capacity(raw.len());

    for (index, row) in raw.rows().iter().enumerate() {
        let line = row
            .position()
            .map_or(index as u64 + 2, csv::Position::line);

        let value_cell = projection.cell(row, 6);
        if is_missing(value_cell) {
            continue;
        }
        let data_value: f64 = value_cell
            .trim()
            .parse()
            .map_err(|e| NutriGraphError::parse(line, DATA_VALUE, format!("{e}: '{value_cell}'")))?;
        if data_value.is_nan() {
            continue;
        }
        if data_value.is_infinite() {
            return Err(NutriGraphError::parse(
                line,
                DATA_VALUE,
                format!("non-finite value '{value_cell}'"),
            ));
        }

        let year_cell = projection.cell(row, 0).trim();
        let year: i32 = year_cell
            .parse()
            .map_err(|e| NutriGraphError::parse(line, YEAR_START, format!("{e}: '{year_cell}'")))?;

        let text = |field: usize| projection.cell(row, field).to_string();
        records.push(CleanedRecord {
            year: Year(year),
            location_abbr: text(1),
            location_desc: text(2),
            class: text(3),
            topic: text(4),
            question: text(5),
            data_value,
            data_value_unit: text(7),
            stratification_category: text(8),
            stratification: text(9),
            geolocation: text(10),
        });
    }

    debug!(
        retained = records.len(),
        dropped = raw.len() - records.len(),
        "dropped rows with missing Data_Value"
    );
    Ok(CleanedTable::new(records))
}

/// Reads the raw extract at `input`, cleans it and writes the cleaned table to `output`.
#[instrument]
pub fn clean_file(input: &Path, output: &Path) -> Result<CleaningReport> {
    info!("Loading data from {}", input.display());
    let raw = read_raw(input)?;
    let cleaned = clean(&raw)?;

    info!(
        initial = raw.len(),
        retained = cleaned.len(),
        "Saving cleaned data to {}",
        output.display()
    );
    write_cleaned(output, &cleaned)?;

    Ok(CleaningReport {
        initial_rows: raw.len(),
        retained_rows: cleaned.len(),
        output: output.to_path_buf(),
    })
}
