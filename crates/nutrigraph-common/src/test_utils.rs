//! Test utilities and shared test helpers for NutriGraph.
//!
//! Fixtures here produce CSV text in the raw and cleaned survey layouts so that
//! every crate in the workspace can build synthetic tables the same way.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call multiple times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Column order of the raw extract fixtures, including columns the cleaner drops.
pub const RAW_HEADER: [&str; 14] = [
    "YearStart",
    "YearEnd",
    "LocationAbbr",
    "LocationDesc",
    "Datasource",
    "Class",
    "Topic",
    "Question",
    "Data_Value_Unit",
    "Data_Value",
    "Sample_Size",
    "GeoLocation",
    "StratificationCategory1",
    "Stratification1",
];

/// Column order of the cleaned table.
pub const CLEANED_HEADER: [&str; 11] = [
    "Year",
    "LocationAbbr",
    "LocationDesc",
    "Class",
    "Topic",
    "Question",
    "Data_Value",
    "Data_Value_Unit",
    "StratificationCategory1",
    "Stratification1",
    "GeoLocation",
];

/// One synthetic survey row.
#[derive(Debug, Clone)]
pub struct SurveyRow {
    pub year: i32,
    pub abbr: String,
    pub desc: String,
    pub class: String,
    pub question: String,
    pub value: Option<f64>,
    pub category: String,
    pub stratum: String,
}

impl SurveyRow {
    /// A whole-population ("Total") row.
    pub fn total(year: i32, abbr: &str, class: &str, question: &str, value: f64) -> Self {
        Self {
            year,
            abbr: abbr.to_string(),
            desc: state_name(abbr),
            class: class.to_string(),
            question: question.to_string(),
            value: Some(value),
            category: "Total".to_string(),
            stratum: "Total".to_string(),
        }
    }

    /// A row for one stratum of a demographic axis.
    pub fn stratified(
        year: i32,
        abbr: &str,
        class: &str,
        question: &str,
        category: &str,
        stratum: &str,
        value: f64,
    ) -> Self {
        Self {
            category: category.to_string(),
            stratum: stratum.to_string(),
            ..Self::total(year, abbr, class, question, value)
        }
    }

    /// Drops the measured value, as suppressed cells appear in the raw extract.
    pub fn without_value(mut self) -> Self {
        self.value = None;
        self
    }

    fn topic(&self) -> String {
        format!("{} - Behavior", self.class)
    }

    fn value_cell(&self) -> String {
        self.value.map(|v| v.to_string()).unwrap_or_default()
    }

    fn geolocation(&self) -> String {
        "(32.84057112200048, -86.63186076199969)".to_string()
    }
}

fn state_name(abbr: &str) -> String {
    match abbr {
        "AL" => "Alabama",
        "AK" => "Alaska",
        "AZ" => "Arizona",
        "CA" => "California",
        "CO" => "Colorado",
        "MS" => "Mississippi",
        "TX" => "Texas",
        "WV" => "West Virginia",
        other => return format!("State {other}"),
    }
    .to_string()
}

fn write_rows<const N: usize>(header: [&str; N], rows: Vec<Vec<String>>) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header).expect("header write");
    for row in rows {
        writer.write_record(&row).expect("row write");
    }
    String::from_utf8(writer.into_inner().expect("flush")).expect("utf8")
}

/// Renders rows in the raw extract layout.
pub fn raw_csv(rows: &[SurveyRow]) -> String {
    let rows = rows
        .iter()
        .map(|r| {
            vec![
                r.year.to_string(),
                r.year.to_string(),
                r.abbr.clone(),
                r.desc.clone(),
                "BRFSS".to_string(),
                r.class.clone(),
                r.topic(),
                r.question.clone(),
                "%".to_string(),
                r.value_cell(),
                "1000".to_string(),
                r.geolocation(),
                r.category.clone(),
                r.stratum.clone(),
            ]
        })
        .collect();
    write_rows(RAW_HEADER, rows)
}

/// Renders rows in the raw layout with one column removed from header and rows.
pub fn raw_csv_without(rows: &[SurveyRow], dropped: &str) -> String {
    let full = raw_csv(rows);
    let mut reader = csv::Reader::from_reader(full.as_bytes());
    let headers = reader.headers().expect("headers").clone();
    let keep: Vec<usize> = (0..headers.len()).filter(|&i| &headers[i] != dropped).collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(keep.iter().map(|&i| &headers[i]))
        .expect("header write");
    for record in reader.records() {
        let record = record.expect("record");
        writer
            .write_record(keep.iter().map(|&i| &record[i]))
            .expect("row write");
    }
    String::from_utf8(writer.into_inner().expect("flush")).expect("utf8")
}

/// Renders rows in the cleaned layout. Rows without a value are skipped.
pub fn cleaned_csv(rows: &[SurveyRow]) -> String {
    let rows = rows
        .iter()
        .filter(|r| r.value.is_some())
        .map(|r| {
            vec![
                r.year.to_string(),
                r.abbr.clone(),
                r.desc.clone(),
                r.class.clone(),
                r.topic(),
                r.question.clone(),
                r.value_cell(),
                "%".to_string(),
                r.category.clone(),
                r.stratum.clone(),
                r.geolocation(),
            ]
        })
        .collect();
    write_rows(CLEANED_HEADER, rows)
}

/// Writes `content` to a fresh temporary file.
#[cfg(feature = "tempfile")]
pub fn write_temp_csv(content: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temporary file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temporary file");
    file
}
