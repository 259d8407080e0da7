//! The interactive dashboard session.

use crate::command::{Command, HELP_TEXT};
use crate::narrative::DASHBOARD_TITLE;
use crate::pages::{year_label, PageRenderer};
use crate::{DashboardContext, Filters, View};
use nutrigraph_common::Result;
use nutrigraph_data::{CleanedTable, DataSession};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Whether the loop keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Leave the session.
    Quit,
}

/// A dashboard session over a loaded cleaned table.
#[derive(Debug)]
pub struct Dashboard {
    context: DashboardContext,
    table: Arc<CleanedTable>,
    filters: Filters,
    view: View,
}

impl Dashboard {
    /// Session over an already loaded table, starting on the first page.
    pub fn new(context: DashboardContext, table: Arc<CleanedTable>) -> Self {
        let filters = Filters::initial(&table, context.axes());
        Self {
            context,
            table,
            filters,
            view: View::Background,
        }
    }

    /// Loads the table through `data`.
    ///
    /// A missing file is reported on `out` and yields `None`; other load
    /// failures are returned as errors.
    pub fn open(
        context: DashboardContext,
        data: &DataSession,
        out: &mut dyn Write,
    ) -> Result<Option<Self>> {
        writeln!(out, "{DASHBOARD_TITLE}")?;
        match data.table() {
            Ok(table) => Ok(Some(Self::new(context, table))),
            Err(error) if error.is_missing_input() => {
                warn!(path = %data.path().display(), "cleaned data file missing");
                writeln!(
                    out,
                    "Data file '{}' not found. Please run data cleaning first.",
                    data.path().display()
                )?;
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Current filters.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Current page.
    pub fn view(&self) -> View {
        self.view
    }

    /// Renders the first page, then executes lines from `input` until `quit` or end of input.
    #[instrument(skip_all)]
    pub fn run<R: BufRead>(&mut self, input: R, out: &mut dyn Write) -> Result<()> {
        info!(rows = self.table.len(), "dashboard session started");
        self.render_current(out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "\n[{}] > ", self.status())?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            if self.execute(&line?, out)? == Flow::Quit {
                break;
            }
        }

        info!("dashboard session ended");
        Ok(())
    }

    /// Executes one input line. Invalid input is reported and the session continues.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(error) => {
                writeln!(out, "{error}")?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "executing dashboard command");

        match command {
            Command::Empty => {}
            Command::Help => writeln!(out, "{HELP_TEXT}")?,
            Command::Views => self.list_views(out)?,
            Command::View(selector) => match View::from_selector(&selector) {
                Some(view) => {
                    self.view = view;
                    self.render_current(out)?;
                }
                None => writeln!(out, "No page matches '{selector}'. Type 'views' to list them.")?,
            },
            Command::Years => {
                let years = self.table.years_descending();
                let selected = self.filters.year;
                list(out, years.iter().map(|y| (y.to_string(), Some(*y) == selected)))?;
            }
            Command::Year(input) => {
                let result = self.filters.select_year(&self.table, &input).map(|_| ());
                self.after_selection(result, out)?;
            }
            Command::Classes => {
                let selected = self.filters.class.as_deref();
                let classes = self.table.classes();
                list_numbered(out, classes.iter().map(|c| (*c, Some(*c) == selected)))?;
            }
            Command::Class(input) => {
                let result = self.filters.select_class(&self.table, &input).map(|_| ());
                self.after_selection(result, out)?;
            }
            Command::Metrics => {
                let selected = self.filters.metric.as_deref();
                let questions = self
                    .filters
                    .class
                    .as_deref()
                    .map(|c| self.table.questions_for_class(c))
                    .unwrap_or_default();
                list_numbered(out, questions.iter().map(|q| (*q, Some(*q) == selected)))?;
            }
            Command::Metric(input) => {
                let result = self.filters.select_metric(&self.table, &input).map(|_| ());
                self.after_selection(result, out)?;
            }
            Command::Axes => {
                let selected = self.filters.axis.as_str();
                let axes = self.context.axes();
                list_numbered(out, axes.iter().map(|a| (a.as_str(), a == selected)))?;
            }
            Command::Axis(input) => {
                let result = self
                    .filters
                    .select_axis(&self.context.analysis.dashboard_demographic_axes, &input)
                    .map(|_| ());
                self.after_selection(result, out)?;
            }
            Command::Show => self.render_current(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn after_selection(
        &self,
        result: std::result::Result<(), crate::SelectionError>,
        out: &mut dyn Write,
    ) -> Result<()> {
        match result {
            Ok(()) => self.render_current(out),
            Err(error) => {
                writeln!(out, "{error}")?;
                Ok(())
            }
        }
    }

    fn render_current(&self, out: &mut dyn Write) -> Result<()> {
        PageRenderer::new(&self.table, &self.filters, &self.context).render(self.view, out)
    }

    fn list_views(&self, out: &mut dyn Write) -> Result<()> {
        let charts = self.context.chart_dir.is_some();
        list(
            out,
            View::ALL.into_iter().map(|view| {
                let suffix = if charts && view.has_chart() { " [chart]" } else { "" };
                (format!("{view}{suffix}"), view == self.view)
            }),
        )
    }

    fn status(&self) -> String {
        format!(
            "{} | year {} | {}",
            self.view.title(),
            year_label(self.filters.year),
            self.filters.class.as_deref().unwrap_or("-")
        )
    }
}

fn list<I>(out: &mut dyn Write, items: I) -> Result<()>
where
    I: IntoIterator<Item = (String, bool)>,
{
    for (label, selected) in items {
        let marker = if selected { '*' } else { ' ' };
        writeln!(out, " {marker} {label}")?;
    }
    Ok(())
}

fn list_numbered<'a, I>(out: &mut dyn Write, items: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    list(
        out,
        items
            .into_iter()
            .enumerate()
            .map(|(index, (label, selected))| (format!("{}. {label}", index + 1), selected)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrigraph_common::test_utils::{cleaned_csv, SurveyRow};
    use nutrigraph_common::{Year, OBESITY_CLASS, OBESITY_QUESTION};
    use nutrigraph_config::Config;
    use nutrigraph_data::read_cleaned;
    use pretty_assertions::assert_eq;

    fn dashboard() -> Dashboard {
        let rows = vec![
            SurveyRow::total(2022, "AL", OBESITY_CLASS, OBESITY_QUESTION, 39.0),
            SurveyRow::total(2021, "AL", OBESITY_CLASS, OBESITY_QUESTION, 38.0),
            SurveyRow::total(2022, "AL", "Physical Activity", "inactive", 30.0),
        ];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");
        std::fs::write(&path, cleaned_csv(&rows)).unwrap();
        let table = Arc::new(read_cleaned(&path).unwrap());
        Dashboard::new(DashboardContext::from_config(&Config::default(), None), table)
    }

    fn run(dashboard: &mut Dashboard, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = dashboard.execute(line, &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_view_navigation() {
        let mut dashboard = dashboard();
        let (flow, text) = run(&mut dashboard, "view 8");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(dashboard.view(), View::Summary);
        assert!(text.contains("8. Summary and Conclusion"));

        let (_, text) = run(&mut dashboard, "view nowhere");
        assert!(text.contains("No page matches 'nowhere'"));
        assert_eq!(dashboard.view(), View::Summary);
    }

    #[test]
    fn test_year_filter_rerenders_page() {
        let mut dashboard = dashboard();
        run(&mut dashboard, "view geo");
        let (_, text) = run(&mut dashboard, "year 2021");
        assert_eq!(dashboard.filters().year, Some(Year(2021)));
        assert!(text.contains("in 2021"));
        assert!(text.contains("38.0"));

        let (_, text) = run(&mut dashboard, "year 1990");
        assert!(text.contains("Year 1990 is not in the dataset"));
    }

    #[test]
    fn test_lists_mark_selection() {
        let mut dashboard = dashboard();
        let (_, text) = run(&mut dashboard, "years");
        assert_eq!(text, " * 2022\n   2021\n");

        let (_, text) = run(&mut dashboard, "classes");
        assert!(text.contains(&format!(" * 1. {OBESITY_CLASS}")));
    }

    #[test]
    fn test_views_mark_chart_pages_when_charts_enabled() {
        let mut dashboard = dashboard();
        let (_, text) = run(&mut dashboard, "views");
        assert!(text.starts_with(" * 1. Background & Intro\n"));
        assert!(!text.contains("[chart]"));

        dashboard.context.chart_dir = Some("charts".into());
        let (_, text) = run(&mut dashboard, "views");
        assert_eq!(text.matches("[chart]").count(), 4);
        assert!(text.contains("   4. Q2: Geographic Analysis [chart]\n"));
        assert!(text.contains("   8. Summary & Conclusion\n"));
    }

    #[test]
    fn test_invalid_and_quit() {
        let mut dashboard = dashboard();
        let (flow, text) = run(&mut dashboard, "frobnicate");
        assert_eq!(flow, Flow::Continue);
        assert!(text.starts_with("Unknown command 'frobnicate'"));

        assert_eq!(run(&mut dashboard, "quit").0, Flow::Quit);
    }
}
