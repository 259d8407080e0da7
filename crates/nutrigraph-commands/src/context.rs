//! Settings shared by every page of a dashboard session.

use nutrigraph_config::{AnalysisConfig, Config};
use nutrigraph_graphs::GraphConfig;
use std::path::PathBuf;

/// Read-only settings of one dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    /// Metric selection.
    pub analysis: AnalysisConfig,
    /// Base chart configuration.
    pub graphs: GraphConfig,
    /// Where chart pages write PNGs; `None` disables charts.
    pub chart_dir: Option<PathBuf>,
}

impl DashboardContext {
    /// Context from a loaded configuration, optionally overriding the chart directory.
    pub fn from_config(config: &Config, chart_dir: Option<PathBuf>) -> Self {
        Self {
            analysis: config.analysis.clone(),
            graphs: GraphConfig::from_settings(&config.graphs),
            chart_dir: chart_dir.or_else(|| config.paths.dashboard_charts.clone()),
        }
    }

    /// Demographic axes offered by the demographic page.
    pub fn axes(&self) -> &[String] {
        &self.analysis.dashboard_demographic_axes
    }
}
