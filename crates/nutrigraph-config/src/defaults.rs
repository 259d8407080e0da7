//! Default values for every configuration section.

use crate::schema::*;
use nutrigraph_common::{
    LoggingConfig, DASHBOARD_DEMOGRAPHIC_AXES, INACTIVITY_QUESTION, OBESITY_CLASS,
    OBESITY_QUESTION, REPORT_DEMOGRAPHIC_AXES,
};
use std::path::PathBuf;

/// File name of the raw extract as published.
pub const DEFAULT_RAW_INPUT: &str =
    "Nutrition__Physical_Activity__and_Obesity_-_Behavioral_Risk_Factor_Surveillance_System.csv";

/// File name of the cleaned table.
pub const DEFAULT_CLEANED: &str = "cleaned_data.csv";

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "nutrigraph.toml";

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            analysis: AnalysisConfig::default(),
            graphs: GraphsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_input: PathBuf::from(DEFAULT_RAW_INPUT),
            cleaned: PathBuf::from(DEFAULT_CLEANED),
            output_dir: PathBuf::from("output"),
            dashboard_charts: None,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            obesity_class: OBESITY_CLASS.to_string(),
            obesity_question: OBESITY_QUESTION.to_string(),
            inactivity_question: INACTIVITY_QUESTION.to_string(),
            ranking_size: 10,
            report_demographic_axes: REPORT_DEMOGRAPHIC_AXES
                .iter()
                .map(ToString::to_string)
                .collect(),
            dashboard_demographic_axes: DASHBOARD_DEMOGRAPHIC_AXES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl Default for GraphsConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            background_color: "#ffffff".to_string(),
            palette: Vec::new(),
            title_font_size: 22,
            enable_grid: true,
        }
    }
}
