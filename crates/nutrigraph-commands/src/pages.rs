//! Rendering of each dashboard page as terminal text.
//!
//! Every page runs at most one query against the cleaned table. Pages with a
//! chart also write a PNG when the session has a chart directory; a failed
//! chart is reported and does not end the session.

use crate::{DashboardContext, Filters, View};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use nutrigraph_common::{
    artifact_stem, format_value, truncate_string, NutriGraphError, Result, Year,
};
use nutrigraph_data::{
    demographic_breakdown, geographic_ranking, has_question_containing, metric_correlation,
    summary_statistics, temporal_trend, trend_lines, BreakdownOrder, CleanedTable,
    CorrelationOutcome, DemographicQuery, TrendSeries,
};
use nutrigraph_graphs::{
    Chart, ColorScheme, CorrelationChart, GraphConfig, GraphUtils, HorizontalBarChart, TrendChart,
};
use std::io::Write;
use tracing::{info, warn};

use crate::narrative::{BACKGROUND, CLEANING_STEPS, FILTER_HINT, QA_PAIRS, SUMMARY};

const NO_DATA: &str = "No data available for the selected filters.";
const QUESTION_WIDTH: usize = 60;

/// Renders pages for one table and filter state.
pub struct PageRenderer<'a> {
    table: &'a CleanedTable,
    filters: &'a Filters,
    context: &'a DashboardContext,
}

impl<'a> PageRenderer<'a> {
    /// Renderer over the current session state.
    pub fn new(table: &'a CleanedTable, filters: &'a Filters, context: &'a DashboardContext) -> Self {
        Self {
            table,
            filters,
            context,
        }
    }

    /// Writes `view` to `out`.
    pub fn render(&self, view: View, out: &mut dyn Write) -> Result<()> {
        match view {
            View::Background => self.background(out),
            View::CleaningStats => self.cleaning_stats(out),
            View::TemporalTrends => self.temporal_trends(out),
            View::Geographic => self.geographic(out),
            View::Demographic => self.demographic(out),
            View::Correlation => self.correlation(out),
            View::QaPrep => self.qa_prep(out),
            View::Summary => self.summary(out),
        }
    }

    fn background(&self, out: &mut dyn Write) -> Result<()> {
        heading(out, "1. Background and Introduction")?;
        writeln!(out, "{BACKGROUND}\n\n{FILTER_HINT}")?;
        Ok(())
    }

    fn cleaning_stats(&self, out: &mut dyn Write) -> Result<()> {
        heading(out, "2. Data Cleaning, Statistics, and Analysis")?;
        writeln!(out, "{CLEANING_STEPS}\n")?;

        let (Some(year), Some(class)) = (self.filters.year, self.filters.class.as_deref()) else {
            writeln!(out, "{NO_DATA}")?;
            return Ok(());
        };
        writeln!(out, "Summary statistics ({class}, {year})")?;
        let Some(stats) = summary_statistics(self.table, year, class) else {
            writeln!(out, "{NO_DATA}")?;
            return Ok(());
        };

        let mut metrics = new_table(&["Mean Value (%)", "Median Value (%)", "Total Records"]);
        metrics.add_row(vec![
            number_cell(format_value(stats.mean, 2)),
            number_cell(format_value(stats.median, 2)),
            number_cell(stats.count.to_string()),
        ]);
        writeln!(out, "{metrics}\n\nData preview")?;

        let mut preview = new_table(&["Year", "State", "Question", "Stratification", "Value"]);
        for record in &stats.preview {
            preview.add_row(vec![
                Cell::new(record.year),
                Cell::new(&record.location_desc),
                Cell::new(truncate_string(&record.question, QUESTION_WIDTH)),
                Cell::new(&record.stratification),
                number_cell(format_value(record.data_value, 1)),
            ]);
        }
        writeln!(out, "{preview}")?;
        Ok(())
    }

    fn temporal_trends(&self, out: &mut dyn Write) -> Result<()> {
        heading(out, "Q1: How have health metrics changed over time?")?;
        let Some(class) = self.filters.class.as_deref() else {
            writeln!(out, "{NO_DATA}")?;
            return Ok(());
        };

        let trend = temporal_trend(self.table, TrendSeries::ByQuestion, Some(class));
        if trend.is_empty() {
            writeln!(out, "{NO_DATA}")?;
            return Ok(());
        }

        let mut table = new_table(&["Year", "Question", "Mean (%)"]);
        for row in trend.rows() {
            table.add_row(vec![
                Cell::new(&row.key[0]),
                Cell::new(truncate_string(&row.key[1].to_string(), QUESTION_WIDTH)),
                number_cell(format_value(row.value, 1)),
            ]);
        }
        writeln!(out, "Trend of {class} (whole population)\n{table}")?;

        let chart = TrendChart::from_lines(&trend_lines(&trend));
        let span = chart
            .year_bounds()
            .map(|(first, last)| GraphUtils::year_span(first, last))
            .unwrap_or_default();
        let config = self.context.graphs.titled(
            format!("Trends in {class} ({span})"),
            "Year",
            "Percentage (%)",
        );
        self.write_chart("dashboard_temporal_trends.png", Chart::Trend(chart), &config, out)
    }

    fn geographic(&self, out: &mut dyn Write) -> Result<()> {
        heading(out, "Q2: Which states have the highest/lowest rates?")?;
        let (Some(year), Some(class), Some(metric)) = (
            self.filters.year,
            self.filters.class.as_deref(),
            self.filters.metric.as_deref(),
        ) else {
            writeln!(out, "{NO_DATA}")?;
            return Ok(());
        };
        writeln!(out, "Ranking of states for {class} in {year}.\nMetric: {metric}")?;

        let ranking = geographic_ranking(self.table, year, None, metric);
        if ranking.is_empty() {
            writeln!(out, "{NO_DATA}")?;
            return Ok(());
        }

        let mut table = new_table(&["Rank", "State", "Value (%)"]);
        for (rank, entry) in ranking.entries().iter().enumerate() {
            table.add_row(vec![
                number_cell((rank + 1).to_string()),
                Cell::new(&entry.location_desc),
                number_cell(format_value(entry.value, 1)),
            ]);
        }
        writeln!(out, "{table}")?;

        let chart = HorizontalBarChart::from_ranking(ranking.entries());
        let mut config = self.context.graphs.titled(
            format!("State Rankings for {} ({year})", truncate_string(metric, QUESTION_WIDTH)),
            "Percentage (%)",
            "State",
        );
        config.height = GraphUtils::bar_chart_height(config.height, chart.items().len());
        config.style.color_scheme = ColorScheme::Viridis;
        self.write_chart("dashboard_geographic.png", Chart::Bars(chart), &config, out)
    }

    fn demographic(&self, out: &mut dyn Write) -> Result<()> {
        heading(out, "Q3: How do metrics vary by Demographics?")?;
        let axis = self.filters.axis.as_str();
        let (Some(year), Some(metric)) = (self.filters.year, self.filters.metric.as_deref())
        else {
            writeln!(out, "{NO_DATA}")?;
            return Ok(());
        };
        writeln!(out, "Demographic category: {axis}\nMetric: {metric}\nYear: {year}")?;

        let query = DemographicQuery {
            class: None,
            question: metric,
            axis,
            year: Some(year),
        };
        let mut breakdown = demographic_breakdown(self.table, &query, BreakdownOrder::Unordered);
        if breakdown.is_empty() {
            writeln!(out, "{NO_DATA}")?;
            return Ok(());
        }
        breakdown.sort_by_value(false);

        let mut table = new_table(&[axis, "Mean (%)"]);
        for row in breakdown.rows() {
            table.add_row(vec![
                Cell::new(&row.key[0]),
                number_cell(format_value(row.value, 1)),
            ]);
        }
        writeln!(out, "{table}")?;

        let chart = HorizontalBarChart::from_aggregate(&breakdown);
        let mut config = self.context.graphs.titled(
            format!(
                "Average {} by {axis} ({year})",
                truncate_string(metric, QUESTION_WIDTH)
            ),
            "Percentage (%)",
            axis,
        );
        config.height = GraphUtils::bar_chart_height(config.height, chart.items().len());
        let file_name = format!("dashboard_demographic_{}.png", artifact_stem(axis));
        self.write_chart(&file_name, Chart::Bars(chart), &config, out)
    }

    fn correlation(&self, out: &mut dyn Write) -> Result<()> {
        heading(out, "Correlation: Obesity vs. Physical Inactivity")?;
        let Some(year) = self.filters.year else {
            writeln!(out, "{NO_DATA}")?;
            return Ok(());
        };
        writeln!(out, "Analyzing the relationship for {year}.")?;

        let obesity = &self.context.analysis.obesity_question;
        let inactivity = &self.context.analysis.inactivity_question;
        if !(has_question_containing(self.table, year, obesity)
            && has_question_containing(self.table, year, inactivity))
        {
            writeln!(
                out,
                "Warning: Required data for correlation (Obesity & Inactivity) not found for this year."
            )?;
            return Ok(());
        }

        let outcome = metric_correlation(self.table, year, obesity, inactivity);
        let coefficient = match &outcome {
            CorrelationOutcome::Computed { coefficient, .. } => *coefficient,
            CorrelationOutcome::NotComputable { reason, .. } => {
                writeln!(
                    out,
                    "Warning: Not enough data to perform correlation analysis for this year ({reason})."
                )?;
                return Ok(());
            }
        };
        writeln!(out, "Correlation Coefficient: {coefficient:.2}")?;

        let mut table = new_table(&["State", "Obesity Rate (%)", "Inactivity Rate (%)"]);
        for pair in outcome.pairs() {
            table.add_row(vec![
                Cell::new(&pair.location_desc),
                number_cell(format_value(pair.first, 1)),
                number_cell(format_value(pair.second, 1)),
            ]);
        }
        writeln!(out, "{table}")?;

        let Some(chart) = CorrelationChart::from_outcome(&outcome) else {
            return Ok(());
        };
        let config = self.context.graphs.titled(
            format!("Obesity vs. Inactivity ({year})"),
            "Physical Inactivity (%)",
            "Obesity Rate (%)",
        );
        self.write_chart("dashboard_correlation.png", Chart::Correlation(chart), &config, out)
    }

    fn qa_prep(&self, out: &mut dyn Write) -> Result<()> {
        heading(out, "7. Q&A Preparation")?;
        for (index, (question, answer)) in QA_PAIRS.iter().enumerate() {
            writeln!(out, "{}. {question}\n   {answer}\n", index + 1)?;
        }
        Ok(())
    }

    fn summary(&self, out: &mut dyn Write) -> Result<()> {
        heading(out, "8. Summary and Conclusion")?;
        writeln!(out, "{SUMMARY}")?;
        Ok(())
    }

    fn write_chart(
        &self,
        file_name: &str,
        chart: Chart,
        config: &GraphConfig,
        out: &mut dyn Write,
    ) -> Result<()> {
        let Some(dir) = self.context.chart_dir.as_deref() else {
            return Ok(());
        };
        let path = dir.join(file_name);

        let rendered = std::fs::create_dir_all(dir)
            .map_err(NutriGraphError::from)
            .and_then(|()| chart.renderer().render_to_file(config, &path));
        match rendered {
            Ok(()) => {
                info!(chart = chart.renderer().name(), "Saved {}", path.display());
                writeln!(out, "Chart saved to {}", path.display())?;
            }
            Err(error) => {
                warn!(%error, "chart rendering failed");
                writeln!(out, "Chart could not be rendered: {error}")?;
            }
        }
        Ok(())
    }
}

/// Writes the page heading.
fn heading(out: &mut dyn Write, title: &str) -> Result<()> {
    writeln!(out, "\n=== {title} ===\n")?;
    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120)
        .set_header(header.to_vec());
    table
}

fn number_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Year shown in the status line, or a placeholder.
pub fn year_label(year: Option<Year>) -> String {
    year.map_or_else(|| "-".to_string(), |y| y.to_string())
}
