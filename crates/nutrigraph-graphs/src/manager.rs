//! Batch report: one chart per fixed analytical question.
//!
//! Each step first builds a [`PlannedArtifact`] from the cleaned table, which
//! is pure, and only then renders it. Steps whose query came back empty are
//! skipped with a progress line instead of failing the whole report.

use crate::utils::{CORRELATION_FILE, GEOGRAPHIC_RANKING_FILE, TEMPORAL_TRENDS_FILE};
use crate::{
    ColorScheme, CorrelationChart, GraphConfig, GraphRenderer, GraphUtils, HorizontalBarChart,
    TrendChart,
};
use nutrigraph_common::{Result, Year};
use nutrigraph_config::{AnalysisConfig, Config};
use nutrigraph_data::{
    demographic_breakdown, geographic_ranking, metric_correlation, read_cleaned, temporal_trend,
    trend_lines, BreakdownOrder, CleanedTable, CorrelationOutcome, DemographicQuery, TrendSeries,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// A chart ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    /// Line chart.
    Trend(TrendChart),
    /// Horizontal bars.
    Bars(HorizontalBarChart),
    /// Scatter with regression line.
    Correlation(CorrelationChart),
}

impl Chart {
    /// The renderer behind this chart.
    pub fn renderer(&self) -> &dyn GraphRenderer {
        match self {
            Self::Trend(chart) => chart,
            Self::Bars(chart) => chart,
            Self::Correlation(chart) => chart,
        }
    }
}

/// Outcome of planning one report artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedArtifact {
    /// Render `chart` with `config` into `file_name`.
    Render {
        /// File name inside the output directory.
        file_name: String,
        /// Chart configuration.
        config: GraphConfig,
        /// Prepared chart.
        chart: Chart,
    },
    /// Nothing to draw.
    Skip {
        /// File name that would have been written.
        file_name: String,
        /// Why the artifact was skipped.
        reason: String,
    },
}

impl PlannedArtifact {
    /// Target file name.
    pub fn file_name(&self) -> &str {
        match self {
            Self::Render { file_name, .. } | Self::Skip { file_name, .. } => file_name,
        }
    }
}

/// An artifact that was not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedArtifact {
    /// File name that would have been written.
    pub file_name: String,
    /// Why it was skipped.
    pub reason: String,
}

/// What one report run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    /// Written image paths, in generation order.
    pub written: Vec<PathBuf>,
    /// Artifacts skipped for lack of data.
    pub skipped: Vec<SkippedArtifact>,
    /// Most recent year in the table.
    pub latest_year: Option<Year>,
    /// Obesity and inactivity correlation, if computable.
    pub correlation: Option<f64>,
}

/// Generates the fixed set of report images.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    analysis: AnalysisConfig,
    base: GraphConfig,
}

impl ReportGenerator {
    /// Generator for explicit analysis and chart settings.
    pub fn new(analysis: AnalysisConfig, base: GraphConfig) -> Self {
        Self { analysis, base }
    }

    /// Generator for a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.analysis.clone(),
            GraphConfig::from_settings(&config.graphs),
        )
    }

    /// Loads the cleaned table at `input` and writes every artifact into `output_dir`.
    #[instrument(skip(self, out))]
    pub fn generate(
        &self,
        input: &Path,
        output_dir: &Path,
        out: &mut dyn Write,
    ) -> Result<ReportSummary> {
        std::fs::create_dir_all(output_dir)?;

        writeln!(out, "Loading cleaned data from {}...", input.display())?;
        let table = read_cleaned(input)?;
        self.generate_from_table(&table, output_dir, out)
    }

    /// Writes every artifact for an already loaded table.
    pub fn generate_from_table(
        &self,
        table: &CleanedTable,
        output_dir: &Path,
        out: &mut dyn Write,
    ) -> Result<ReportSummary> {
        std::fs::create_dir_all(output_dir)?;
        let mut summary = ReportSummary::default();

        writeln!(out, "Analyzing Temporal Trends...")?;
        self.emit(self.plan_temporal_trends(table), output_dir, out, &mut summary)?;

        writeln!(out, "Analyzing Geographic Trends...")?;
        let latest_year = table.latest_year();
        summary.latest_year = latest_year;
        match latest_year {
            Some(year) => writeln!(out, "Latest year in dataset: {year}")?,
            None => writeln!(out, "Latest year in dataset: none (table is empty)")?,
        }
        self.emit(
            self.plan_geographic_ranking(table, latest_year),
            output_dir,
            out,
            &mut summary,
        )?;

        writeln!(out, "Analyzing Demographic Trends...")?;
        for planned in self.plan_demographics(table) {
            self.emit(planned, output_dir, out, &mut summary)?;
        }

        writeln!(out, "Analyzing Correlations...")?;
        let (planned, outcome) = self.plan_correlation(table, latest_year);
        match outcome.as_ref() {
            Some(CorrelationOutcome::Computed { coefficient, .. }) => {
                summary.correlation = Some(*coefficient);
                writeln!(
                    out,
                    "Correlation between Obesity and Physical Inactivity: {coefficient:.2}"
                )?;
            }
            Some(CorrelationOutcome::NotComputable { reason, .. }) => {
                warn!(%reason, "correlation not computable");
                writeln!(
                    out,
                    "Correlation between Obesity and Physical Inactivity: not computable ({reason})"
                )?;
            }
            None => {}
        }
        self.emit(planned, output_dir, out, &mut summary)?;

        writeln!(
            out,
            "Analysis complete. Visualizations saved to {}.",
            output_dir.display()
        )?;
        info!(
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            "report finished"
        );
        Ok(summary)
    }

    /// Mean value per year and class over whole-population rows.
    pub fn plan_temporal_trends(&self, table: &CleanedTable) -> PlannedArtifact {
        let chart = TrendChart::from_lines(&trend_lines(&temporal_trend(
            table,
            TrendSeries::ByClass,
            None,
        )));
        let Some((first, last)) = chart.year_bounds() else {
            return skip(TEMPORAL_TRENDS_FILE, "no whole-population rows");
        };

        let title = format!(
            "Trends in Obesity, Physical Activity, and Nutrition ({})",
            GraphUtils::year_span(first, last)
        );
        PlannedArtifact::Render {
            file_name: TEMPORAL_TRENDS_FILE.to_string(),
            config: self.base.titled(title, "Year", "Percentage (%)"),
            chart: Chart::Trend(chart),
        }
    }

    /// Top and bottom states for the obesity metric in `year`.
    pub fn plan_geographic_ranking(
        &self,
        table: &CleanedTable,
        year: Option<Year>,
    ) -> PlannedArtifact {
        let Some(year) = year else {
            return skip(GEOGRAPHIC_RANKING_FILE, "no survey year available");
        };
        let ranking = geographic_ranking(
            table,
            year,
            Some(&self.analysis.obesity_class),
            &self.analysis.obesity_question,
        );
        if ranking.is_empty() {
            return skip(
                GEOGRAPHIC_RANKING_FILE,
                format!("no obesity rows for {year}"),
            );
        }

        let n = self.analysis.ranking_size;
        let chart = HorizontalBarChart::from_ranking(&ranking.top_and_bottom(n));
        let mut config = self.base.titled(
            format!("Top {n} and Bottom {n} States by Obesity Rate ({year})"),
            "Obesity Rate (%)",
            "State",
        );
        config.height = GraphUtils::bar_chart_height(config.height, chart.items().len());
        config.style.color_scheme = ColorScheme::Viridis;

        PlannedArtifact::Render {
            file_name: GEOGRAPHIC_RANKING_FILE.to_string(),
            config,
            chart: Chart::Bars(chart),
        }
    }

    /// Mean obesity per stratum for each configured axis, all years pooled.
    pub fn plan_demographics(&self, table: &CleanedTable) -> Vec<PlannedArtifact> {
        let span = match (table.years_descending().last(), table.latest_year()) {
            (Some(first), Some(last)) => GraphUtils::year_span(*first, last),
            _ => String::new(),
        };

        self.analysis
            .report_demographic_axes
            .iter()
            .map(|axis| {
                let file_name = GraphUtils::demographic_file_name(axis);
                let query = DemographicQuery {
                    class: Some(&self.analysis.obesity_class),
                    question: &self.analysis.obesity_question,
                    axis,
                    year: None,
                };
                let breakdown =
                    demographic_breakdown(table, &query, BreakdownOrder::ValueAscending);
                if breakdown.is_empty() {
                    return skip(&file_name, format!("no '{axis}' strata"));
                }

                let chart = HorizontalBarChart::from_aggregate(&breakdown);
                let mut config = self.base.titled(
                    format!("Average Obesity Rate by {axis} ({span})"),
                    "Obesity Rate (%)",
                    axis,
                );
                config.height = GraphUtils::bar_chart_height(config.height, chart.items().len());
                config.style.color_scheme = ColorScheme::Magma;

                PlannedArtifact::Render {
                    file_name,
                    config,
                    chart: Chart::Bars(chart),
                }
            })
            .collect()
    }

    /// Obesity against inactivity per state in `year`.
    pub fn plan_correlation(
        &self,
        table: &CleanedTable,
        year: Option<Year>,
    ) -> (PlannedArtifact, Option<CorrelationOutcome>) {
        let Some(year) = year else {
            return (skip(CORRELATION_FILE, "no survey year available"), None);
        };
        let outcome = metric_correlation(
            table,
            year,
            &self.analysis.obesity_question,
            &self.analysis.inactivity_question,
        );

        let planned = match (CorrelationChart::from_outcome(&outcome), &outcome) {
            (Some(chart), _) => {
                let title = format!(
                    "Obesity vs. Physical Inactivity by State ({year}), Correlation: {:.2}",
                    chart.coefficient()
                );
                PlannedArtifact::Render {
                    file_name: CORRELATION_FILE.to_string(),
                    config: self.base.titled(
                        title,
                        "Physical Inactivity Rate (%)",
                        "Obesity Rate (%)",
                    ),
                    chart: Chart::Correlation(chart),
                }
            }
            (None, CorrelationOutcome::NotComputable { reason, .. }) => {
                skip(CORRELATION_FILE, reason.to_string())
            }
            (None, CorrelationOutcome::Computed { .. }) => {
                skip(CORRELATION_FILE, "no joined states")
            }
        };
        (planned, Some(outcome))
    }

    fn emit(
        &self,
        planned: PlannedArtifact,
        output_dir: &Path,
        out: &mut dyn Write,
        summary: &mut ReportSummary,
    ) -> Result<()> {
        match planned {
            PlannedArtifact::Render {
                file_name,
                config,
                chart,
            } => {
                let path = output_dir.join(&file_name);
                chart.renderer().render_to_file(&config, &path)?;
                info!(chart = chart.renderer().name(), "Saved {}", path.display());
                summary.written.push(path);
            }
            PlannedArtifact::Skip { file_name, reason } => {
                writeln!(out, "Skipping {file_name}: {reason}")?;
                summary.skipped.push(SkippedArtifact { file_name, reason });
            }
        }
        Ok(())
    }
}

fn skip(file_name: &str, reason: impl Into<String>) -> PlannedArtifact {
    PlannedArtifact::Skip {
        file_name: file_name.to_string(),
        reason: reason.into(),
    }
}
