//! Raw and cleaned survey tables.

use nutrigraph_common::{Result, Year, TOTAL_STRATIFICATION};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// The raw extract as read: header plus untyped rows.
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: csv::StringRecord,
    rows: Vec<csv::StringRecord>,
}

impl RawTable {
    /// Parses CSV text with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers()?.clone();
        let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { headers, rows })
    }

    /// Header names in file order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    /// Position of a named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Data rows.
    pub fn rows(&self) -> &[csv::StringRecord] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row of the cleaned table. Field order is the on-disk column order.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    #[serde(rename = "Year")]
    pub year: Year,
    #[serde(rename = "LocationAbbr")]
    pub location_abbr: String,
    #[serde(rename = "LocationDesc")]
    pub location_desc: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "Topic")]
    pub topic: String,
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Data_Value")]
    pub data_value: f64,
    #[serde(rename = "Data_Value_Unit")]
    pub data_value_unit: String,
    #[serde(rename = "StratificationCategory1")]
    pub stratification_category: String,
    #[serde(rename = "Stratification1")]
    pub stratification: String,
    #[serde(rename = "GeoLocation")]
    pub geolocation: String,
}

impl CleanedRecord {
    /// Whether this row describes the whole population.
    pub fn is_total(&self) -> bool {
        self.stratification_category == TOTAL_STRATIFICATION
    }
}

/// The analysis-ready table. Loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedTable {
    records: Vec<CleanedRecord>,
}

impl CleanedTable {
    /// Wraps records that are already cleaned.
    pub fn new(records: Vec<CleanedRecord>) -> Self {
        Self { records }
    }

    /// All records in load order.
    pub fn records(&self) -> &[CleanedRecord] {
        &self.records
    }

    /// Iterates over records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, CleanedRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent year over the whole table.
    pub fn latest_year(&self) -> Option<Year> {
        self.records.iter().map(|r| r.year).max()
    }

    /// Distinct years, most recent first.
    pub fn years_descending(&self) -> Vec<Year> {
        let mut years: Vec<Year> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }

    /// Distinct classes in order of first appearance.
    pub fn classes(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.class.as_str()))
    }

    /// Distinct questions of one class in order of first appearance.
    pub fn questions_for_class(&self, class: &str) -> Vec<&str> {
        distinct(
            self.records
                .iter()
                .filter(|r| r.class == class)
                .map(|r| r.question.as_str()),
        )
    }
}

impl<'a> IntoIterator for &'a CleanedTable {
    type Item = &'a CleanedRecord;
    type IntoIter = std::slice::Iter<'a, CleanedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(year: i32, abbr: &str, class: &str, question: &str, value: f64) -> CleanedRecord {
        CleanedRecord {
            year: Year(year),
            location_abbr: abbr.to_string(),
            location_desc: format!("State {abbr}"),
            class: class.to_string(),
            topic: format!("{class} - Behavior"),
            question: question.to_string(),
            data_value: value,
            data_value_unit: "%".to_string(),
            stratification_category: TOTAL_STRATIFICATION.to_string(),
            stratification: TOTAL_STRATIFICATION.to_string(),
            geolocation: String::new(),
        }
    }

    pub fn stratified(
        year: i32,
        abbr: &str,
        class: &str,
        question: &str,
        category: &str,
        stratum: &str,
        value: f64,
    ) -> CleanedRecord {
        CleanedRecord {
            stratification_category: category.to_string(),
            stratification: stratum.to_string(),
            ..record(year, abbr, class, question, value)
        }
    }
}
