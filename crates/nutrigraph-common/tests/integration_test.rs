//! Integration tests for nutrigraph-common crate.

use nutrigraph_common::{
    artifact_stem, truncate_string, LoggingConfig, NutriGraphError, Year, REPORT_DEMOGRAPHIC_AXES,
};

#[test]
fn test_report_axes_map_to_artifact_names() {
    let stems: Vec<String> = REPORT_DEMOGRAPHIC_AXES
        .iter()
        .map(|axis| artifact_stem(axis))
        .collect();
    assert_eq!(
        stems,
        vec!["Income", "Education", "Age_(years)", "Race_Ethnicity"]
    );
}

#[test]
fn test_year_ordering_is_numeric() {
    let mut years = vec![Year(2023), Year(2011), Year(2017)];
    years.sort();
    assert_eq!(years, vec![Year(2011), Year(2017), Year(2023)]);
}

#[test]
fn test_error_classification() {
    assert!(NutriGraphError::missing_input("raw.csv").is_missing_input());
    assert!(NutriGraphError::schema(["Topic"]).is_schema());
    assert!(!NutriGraphError::new("other").is_schema());
}

#[test]
fn test_truncate_long_question() {
    let question = "Percent of adults who engage in no leisure-time physical activity";
    let label = truncate_string(question, 30);
    assert_eq!(label.chars().count(), 30);
    assert!(label.ends_with("..."));
}

#[test]
fn test_logging_config_default_level() {
    assert_eq!(LoggingConfig::default().level, "info");
}
