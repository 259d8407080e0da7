//! Runtime validation of loaded configuration.

use crate::schema::Config;
use nutrigraph_common::{NutriGraphError, Result};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        let analysis = &config.analysis;

        if analysis.ranking_size == 0 {
            return Err(NutriGraphError::validation_field(
                "ranking size must be at least 1",
                "analysis.ranking_size",
            ));
        }

        for (field, value) in [
            ("analysis.obesity_class", &analysis.obesity_class),
            ("analysis.obesity_question", &analysis.obesity_question),
            ("analysis.inactivity_question", &analysis.inactivity_question),
        ] {
            if value.trim().is_empty() {
                return Err(NutriGraphError::validation_field("value cannot be empty", field));
            }
        }

        if analysis.report_demographic_axes.is_empty() {
            return Err(NutriGraphError::validation_field(
                "at least one demographic axis is required",
                "analysis.report_demographic_axes",
            ));
        }

        if analysis.dashboard_demographic_axes.is_empty() {
            return Err(NutriGraphError::validation_field(
                "at least one demographic axis is required",
                "analysis.dashboard_demographic_axes",
            ));
        }

        let graphs = &config.graphs;
        if graphs.width == 0 || graphs.height == 0 {
            return Err(NutriGraphError::validation_field(
                "chart dimensions must be non-zero",
                "graphs",
            ));
        }

        for color in std::iter::once(&graphs.background_color).chain(&graphs.palette) {
            if !is_hex_color(color) {
                return Err(NutriGraphError::validation_field(
                    format!("'{color}' is not a #RRGGBB color"),
                    "graphs",
                ));
            }
        }

        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_ranking_size_rejected() {
        let mut config = Config::default();
        config.analysis.ranking_size = 0;
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            err,
            NutriGraphError::Validation { field: Some(ref f), .. } if f == "analysis.ranking_size"
        ));
    }

    #[test]
    fn test_blank_question_rejected() {
        let mut config = Config::default();
        config.analysis.inactivity_question = "  ".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_bad_palette_color_rejected() {
        let mut config = Config::default();
        config.graphs.palette = vec!["#12345".to_string()];
        assert!(ConfigValidator::validate(&config).is_err());

        config.graphs.palette = vec!["#1f77b4".to_string()];
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_hex_color_check() {
        assert!(is_hex_color("#FFFFFF"));
        assert!(!is_hex_color("FFFFFF"));
        assert!(!is_hex_color("#GG0000"));
    }
}
