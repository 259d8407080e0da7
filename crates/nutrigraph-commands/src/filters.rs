//! Global dashboard filters and their selection rules.

use nutrigraph_common::Year;
use nutrigraph_data::CleanedTable;
use thiserror::Error;

/// A rejected filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The year is not present in the table.
    #[error("Year {0} is not in the dataset. Type 'years' to list them.")]
    UnknownYear(String),

    /// No option matches the given number or name.
    #[error("No {kind} matches '{given}'. Type '{list_command}' to list them.")]
    NoMatch {
        /// What was being selected.
        kind: &'static str,
        /// User input.
        given: String,
        /// Command listing the options.
        list_command: &'static str,
    },
}

/// Year, category, metric and demographic axis currently selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    /// Selected year; defaults to the most recent.
    pub year: Option<Year>,
    /// Selected class; defaults to the first in table order.
    pub class: Option<String>,
    /// Selected question of the class; defaults to its first.
    pub metric: Option<String>,
    /// Selected demographic axis.
    pub axis: String,
}

impl Filters {
    /// Defaults for a freshly loaded table.
    pub fn initial(table: &CleanedTable, axes: &[String]) -> Self {
        let class = table.classes().first().map(|c| c.to_string());
        let metric = class
            .as_deref()
            .and_then(|c| table.questions_for_class(c).first().map(|q| q.to_string()));

        Self {
            year: table.years_descending().first().copied(),
            class,
            metric,
            axis: axes.first().cloned().unwrap_or_default(),
        }
    }

    /// Selects a year present in the table.
    pub fn select_year(&mut self, table: &CleanedTable, input: &str) -> Result<Year, SelectionError> {
        let year = input
            .trim()
            .parse::<i32>()
            .map(Year)
            .ok()
            .filter(|y| table.years_descending().contains(y))
            .ok_or_else(|| SelectionError::UnknownYear(input.trim().to_string()))?;
        self.year = Some(year);
        Ok(year)
    }

    /// Selects a class and resets the metric to the class's first question.
    pub fn select_class(&mut self, table: &CleanedTable, input: &str) -> Result<String, SelectionError> {
        let class = pick(&table.classes(), input).ok_or_else(|| SelectionError::NoMatch {
            kind: "category",
            given: input.to_string(),
            list_command: "classes",
        })?;
        self.metric = table.questions_for_class(&class).first().map(|q| q.to_string());
        self.class = Some(class.clone());
        Ok(class)
    }

    /// Selects a question of the current class.
    pub fn select_metric(&mut self, table: &CleanedTable, input: &str) -> Result<String, SelectionError> {
        let questions = self
            .class
            .as_deref()
            .map(|c| table.questions_for_class(c))
            .unwrap_or_default();
        let metric = pick(&questions, input).ok_or_else(|| SelectionError::NoMatch {
            kind: "metric",
            given: input.to_string(),
            list_command: "metrics",
        })?;
        self.metric = Some(metric.clone());
        Ok(metric)
    }

    /// Selects one of the offered demographic axes.
    pub fn select_axis(&mut self, axes: &[String], input: &str) -> Result<String, SelectionError> {
        let options: Vec<&str> = axes.iter().map(String::as_str).collect();
        let axis = pick(&options, input).ok_or_else(|| SelectionError::NoMatch {
            kind: "demographic axis",
            given: input.to_string(),
            list_command: "axes",
        })?;
        self.axis = axis.clone();
        Ok(axis)
    }
}

/// Resolves a 1-based number or a case-insensitive exact name.
fn pick(options: &[&str], input: &str) -> Option<String> {
    let input = input.trim();
    if let Ok(number) = input.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .map(|s| s.to_string());
    }
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(input))
        .map(|s| s.to_string())
}
