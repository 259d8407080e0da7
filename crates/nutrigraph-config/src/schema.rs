//! Configuration schema definitions using serde.

use nutrigraph_common::{LoggingConfig, NutriGraphError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for NutriGraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Metric selection and report sizing.
    pub analysis: AnalysisConfig,
    /// Chart dimensions and styling.
    pub graphs: GraphsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// File system locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Raw survey extract read by the cleaner.
    pub raw_input: PathBuf,
    /// Cleaned table written by the cleaner and read by report and dashboard.
    pub cleaned: PathBuf,
    /// Directory receiving the batch report images.
    pub output_dir: PathBuf,
    /// Directory receiving dashboard chart images, if charts are wanted.
    pub dashboard_charts: Option<PathBuf>,
}

/// Analytical parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Class holding the obesity metric.
    pub obesity_class: String,
    /// Exact question text of the obesity metric.
    pub obesity_question: String,
    /// Exact question text of the physical inactivity metric.
    pub inactivity_question: String,
    /// Number of states shown at each end of the geographic ranking.
    pub ranking_size: usize,
    /// Demographic axes charted by the batch report.
    pub report_demographic_axes: Vec<String>,
    /// Demographic axes offered by the dashboard.
    pub dashboard_demographic_axes: Vec<String>,
}

/// Chart styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphsConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Background color as `#RRGGBB`.
    pub background_color: String,
    /// Series colors as `#RRGGBB`; an empty list selects the default palette.
    pub palette: Vec<String>,
    /// Caption font size.
    pub title_font_size: u32,
    /// Whether to draw mesh lines.
    pub enable_grid: bool,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        crate::validator::ConfigValidator::validate(self)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| NutriGraphError::config_with_source("TOML encoding error", e))
    }
}
