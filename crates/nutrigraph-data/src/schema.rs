//! Column contracts of the raw extract and the cleaned table.

/// Raw column carrying the survey year; renamed to [`YEAR`] when cleaning.
pub const YEAR_START: &str = "YearStart";

/// Cleaned column carrying the survey year.
pub const YEAR: &str = "Year";

/// Column carrying the measured percentage.
pub const DATA_VALUE: &str = "Data_Value";

/// Raw columns retained by the cleaner, in output order.
pub const REQUIRED_RAW_COLUMNS: [&str; 11] = [
    YEAR_START,
    "LocationAbbr",
    "LocationDesc",
    "Class",
    "Topic",
    "Question",
    DATA_VALUE,
    "Data_Value_Unit",
    "StratificationCategory1",
    "Stratification1",
    "GeoLocation",
];

/// Exact header of a cleaned table.
pub const CLEANED_COLUMNS: [&str; 11] = [
    YEAR,
    "LocationAbbr",
    "LocationDesc",
    "Class",
    "Topic",
    "Question",
    DATA_VALUE,
    "Data_Value_Unit",
    "StratificationCategory1",
    "Stratification1",
    "GeoLocation",
];

/// Cells the raw extract uses for an absent measurement.
pub const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw `Data_Value` cell denotes a missing measurement.
pub fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    MISSING_MARKERS.contains(&trimmed)
}

/// Required raw columns absent from `headers`, in schema order.
pub fn missing_raw_columns<'a, I>(headers: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().collect();
    REQUIRED_RAW_COLUMNS
        .iter()
        .copied()
        .filter(|column| !present.contains(column))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaned_columns_follow_raw_projection() {
        assert_eq!(CLEANED_COLUMNS[0], YEAR);
        assert_eq!(REQUIRED_RAW_COLUMNS[0], YEAR_START);
        assert_eq!(CLEANED_COLUMNS[1..], REQUIRED_RAW_COLUMNS[1..]);
    }

    #[test]
    fn test_missing_markers() {
        assert!(is_missing(""));
        assert!(is_missing("   "));
        assert!(is_missing("NaN"));
        assert!(is_missing("NA"));
        assert!(!is_missing("0"));
        assert!(!is_missing("31.4"));
    }

    #[test]
    fn test_missing_raw_columns_in_schema_order() {
        let headers = ["Question", "YearStart", "LocationAbbr"];
        let missing = missing_raw_columns(headers);
        assert_eq!(missing.len(), 8);
        assert_eq!(missing[0], "LocationDesc");
        assert_eq!(missing.last(), Some(&"GeoLocation"));
        assert!(missing_raw_columns(REQUIRED_RAW_COLUMNS).is_empty());
    }
}
