//! The analytical questions answered by the report and the dashboard.
//!
//! Each function is pure: it reads the cleaned table and returns a fresh
//! result. An empty result means the filters matched nothing and is never an
//! error.

use crate::query::{aggregate, AggregatedTable, Dimension, Filter, Reduction};
use crate::record::{CleanedRecord, CleanedTable};
use crate::stats;
use nutrigraph_common::{Year, TOTAL_STRATIFICATION};
use std::collections::BTreeMap;
use std::fmt;

/// Series dimension of a temporal trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendSeries {
    /// One line per survey class.
    ByClass,
    /// One line per question.
    ByQuestion,
}

impl TrendSeries {
    fn dimension(self) -> Dimension {
        match self {
            Self::ByClass => Dimension::Class,
            Self::ByQuestion => Dimension::Question,
        }
    }
}

/// One line of a temporal trend.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    /// Class or question text.
    pub name: String,
    /// Mean value per year, ascending by year.
    pub points: Vec<(Year, f64)>,
}

/// Mean `Data_Value` per (Year, series) over whole-population rows, ascending by year.
pub fn temporal_trend(
    table: &CleanedTable,
    series: TrendSeries,
    class: Option<&str>,
) -> AggregatedTable {
    let filter = Filter::total().maybe_class(class);
    aggregate(
        table,
        &filter,
        &[Dimension::Year, series.dimension()],
        Reduction::Mean,
    )
}

/// Pivots a temporal trend into one line per series, series sorted by name.
pub fn trend_lines(trend: &AggregatedTable) -> Vec<TrendLine> {
    let mut lines: BTreeMap<String, Vec<(Year, f64)>> = BTreeMap::new();
    for row in trend.rows() {
        let (Some(year), Some(name)) = (
            row.key.first().and_then(|k| k.as_year()),
            row.key.get(1).and_then(|k| k.as_text()),
        ) else {
            continue;
        };
        lines.entry(name.to_string()).or_default().push((year, row.value));
    }

    lines
        .into_iter()
        .map(|(name, mut points)| {
            points.sort_by_key(|(year, _)| *year);
            TrendLine { name, points }
        })
        .collect()
}

/// One state in a geographic ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedLocation {
    /// State abbreviation.
    pub location_abbr: String,
    /// State name.
    pub location_desc: String,
    /// Survey year of the value.
    pub year: Year,
    /// Metric value.
    pub value: f64,
}

impl From<&CleanedRecord> for RankedLocation {
    fn from(record: &CleanedRecord) -> Self {
        Self {
            location_abbr: record.location_abbr.clone(),
            location_desc: record.location_desc.clone(),
            year: record.year,
            value: record.data_value,
        }
    }
}

/// States ordered by descending value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeographicRanking {
    entries: Vec<RankedLocation>,
}

impl GeographicRanking {
    /// Every ranked state, highest first.
    pub fn entries(&self) -> &[RankedLocation] {
        &self.entries
    }

    /// Number of ranked rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` highest values.
    pub fn top(&self, n: usize) -> &[RankedLocation] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// The `n` lowest values, still in descending order.
    pub fn bottom(&self, n: usize) -> &[RankedLocation] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }

    /// `top(n)` followed by `bottom(n)`. With fewer than `2n` states the halves overlap.
    pub fn top_and_bottom(&self, n: usize) -> Vec<RankedLocation> {
        self.top(n).iter().chain(self.bottom(n)).cloned().collect()
    }
}

/// One row per state for a metric in a year (whole population), highest first.
pub fn geographic_ranking(
    table: &CleanedTable,
    year: Year,
    class: Option<&str>,
    question: &str,
) -> GeographicRanking {
    let filter = Filter::total()
        .year(year)
        .maybe_class(class)
        .question(question);

    let mut entries: Vec<RankedLocation> = filter
        .apply(table)
        .into_iter()
        .map(RankedLocation::from)
        .collect();
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    GeographicRanking { entries }
}

/// Parameters of a demographic breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicQuery<'a> {
    /// Optional class restriction.
    pub class: Option<&'a str>,
    /// Exact question text.
    pub question: &'a str,
    /// `StratificationCategory1` value, e.g. `"Income"`.
    pub axis: &'a str,
    /// Optional year; all years are pooled when unset.
    pub year: Option<Year>,
}

/// Row order of a demographic breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownOrder {
    /// By mean value, lowest first.
    ValueAscending,
    /// By stratum label; the renderer decides the final order.
    Unordered,
}

/// Mean `Data_Value` per stratum of one demographic axis.
pub fn demographic_breakdown(
    table: &CleanedTable,
    query: &DemographicQuery<'_>,
    order: BreakdownOrder,
) -> AggregatedTable {
    let filter = Filter::new()
        .year(query.year)
        .maybe_class(query.class)
        .question(query.question)
        .stratification_category(query.axis);

    let mut result = aggregate(table, &filter, &[Dimension::Stratification], Reduction::Mean);
    if order == BreakdownOrder::ValueAscending {
        result.sort_by_value(true);
    }
    result
}

/// Values of two metrics for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPair {
    /// State abbreviation (join key).
    pub location_abbr: String,
    /// State name, taken from the first metric's row.
    pub location_desc: String,
    /// First metric value.
    pub first: f64,
    /// Second metric value.
    pub second: f64,
}

/// Why a correlation coefficient could not be computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotComputableReason {
    /// No row for this question in the requested year.
    MissingMetric(String),
    /// Both metrics exist but share no state.
    EmptyJoin,
    /// Fewer than two joined states.
    InsufficientPairs(usize),
    /// One metric has the same value in every joined state.
    ZeroVariance,
}

impl fmt::Display for NotComputableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMetric(question) => write!(f, "no data for '{question}'"),
            Self::EmptyJoin => f.write_str("the two metrics share no state"),
            Self::InsufficientPairs(n) => write!(f, "only {n} matched state(s), need at least 2"),
            Self::ZeroVariance => f.write_str("one metric does not vary across states"),
        }
    }
}

/// Result of a cross-metric correlation.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrelationOutcome {
    /// A valid Pearson coefficient over the joined states.
    Computed {
        /// Joined states.
        pairs: Vec<MetricPair>,
        /// Pearson coefficient in [-1, 1].
        coefficient: f64,
    },
    /// The coefficient is undefined for this input.
    NotComputable {
        /// Joined states, possibly empty.
        pairs: Vec<MetricPair>,
        /// Cause.
        reason: NotComputableReason,
    },
}

impl CorrelationOutcome {
    /// The coefficient, if one was computed.
    pub fn coefficient(&self) -> Option<f64> {
        match self {
            Self::Computed { coefficient, .. } => Some(*coefficient),
            Self::NotComputable { .. } => None,
        }
    }

    /// Joined states.
    pub fn pairs(&self) -> &[MetricPair] {
        match self {
            Self::Computed { pairs, .. } | Self::NotComputable { pairs, .. } => pairs,
        }
    }

    /// Whether a coefficient is available.
    pub fn is_computable(&self) -> bool {
        matches!(self, Self::Computed { .. })
    }
}

/// Joins two metrics on `LocationAbbr` for one year (whole population) and
/// computes their Pearson correlation.
///
/// Duplicate rows per state join pairwise, as an inner join does.
pub fn metric_correlation(
    table: &CleanedTable,
    year: Year,
    first_question: &str,
    second_question: &str,
) -> CorrelationOutcome {
    let base = Filter::total().year(year);
    let first = base.clone().question(first_question).apply(table);
    let second = base.question(second_question).apply(table);

    let missing = if first.is_empty() {
        Some(first_question)
    } else if second.is_empty() {
        Some(second_question)
    } else {
        None
    };
    if let Some(question) = missing {
        return CorrelationOutcome::NotComputable {
            pairs: Vec::new(),
            reason: NotComputableReason::MissingMetric(question.to_string()),
        };
    }

    let pairs: Vec<MetricPair> = first
        .iter()
        .flat_map(|a| {
            second
                .iter()
                .filter(move |b| b.location_abbr == a.location_abbr)
                .map(move |b| MetricPair {
                    location_abbr: a.location_abbr.clone(),
                    location_desc: a.location_desc.clone(),
                    first: a.data_value,
                    second: b.data_value,
                })
        })
        .collect();

    if pairs.is_empty() {
        return CorrelationOutcome::NotComputable {
            pairs,
            reason: NotComputableReason::EmptyJoin,
        };
    }

    let xs: Vec<f64> = pairs.iter().map(|p| p.first).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.second).collect();
    match stats::pearson(&xs, &ys) {
        Some(coefficient) => CorrelationOutcome::Computed { pairs, coefficient },
        None => {
            let reason = if pairs.len() < 2 {
                NotComputableReason::InsufficientPairs(pairs.len())
            } else {
                NotComputableReason::ZeroVariance
            };
            CorrelationOutcome::NotComputable { pairs, reason }
        }
    }
}

/// Whether any whole-population question in `year` contains `needle`.
///
/// Only gates whether an exact-match query is worth attempting.
pub fn has_question_containing(table: &CleanedTable, year: Year, needle: &str) -> bool {
    table.iter().any(|r| {
        r.year == year && r.stratification_category == TOTAL_STRATIFICATION && r.question.contains(needle)
    })
}

/// Descriptive statistics for one class in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    /// Mean `Data_Value`.
    pub mean: f64,
    /// Median `Data_Value`.
    pub median: f64,
    /// Matching record count.
    pub count: usize,
    /// First matching records.
    pub preview: Vec<CleanedRecord>,
}

/// Number of records in [`SummaryStatistics::preview`].
pub const PREVIEW_ROWS: usize = 5;

/// Mean, median and count over all strata of `class` in `year`. `None` when nothing matches.
pub fn summary_statistics(
    table: &CleanedTable,
    year: Year,
    class: &str,
) -> Option<SummaryStatistics> {
    let filter = Filter::new().year(year).class(class);
    let overall = |reduction| {
        aggregate(table, &filter, &[], reduction)
            .rows()
            .first()
            .map(|row| (row.value, row.count))
    };
    let (mean, count) = overall(Reduction::Mean)?;
    let (median, _) = overall(Reduction::Median)?;

    Some(SummaryStatistics {
        mean,
        median,
        count,
        preview: filter
            .apply(table)
            .into_iter()
            .take(PREVIEW_ROWS)
            .cloned()
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::{record, stratified};

    const OBESITY: &str = "Obesity / Weight Status";
    const Q_OB: &str = "obesity";
    const Q_IN: &str = "inactivity";

    #[test]
    fn test_trend_lines_pivot() {
        let table = CleanedTable::new(vec![
            record(2021, "AL", OBESITY, Q_OB, 34.0),
            record(2020, "AL", OBESITY, Q_OB, 30.0),
            record(2020, "AK", OBESITY, Q_OB, 40.0),
            record(2020, "AL", "Physical Activity", Q_IN, 20.0),
        ]);
        let trend = temporal_trend(&table, TrendSeries::ByClass, None);
        let lines = trend_lines(&trend);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, OBESITY);
        assert_eq!(lines[0].points, vec![(Year(2020), 35.0), (Year(2021), 34.0)]);
        assert_eq!(lines[1].points, vec![(Year(2020), 20.0)]);
    }

    #[test]
    fn test_trend_by_question_within_class() {
        let table = CleanedTable::new(vec![
            record(2020, "AL", OBESITY, Q_OB, 30.0),
            record(2020, "AL", OBESITY, "overweight", 35.0),
            record(2020, "AL", "Physical Activity", Q_IN, 20.0),
        ]);
        let trend = temporal_trend(&table, TrendSeries::ByQuestion, Some(OBESITY));
        assert_eq!(trend.len(), 2);
        assert_eq!(trend.dimensions(), &[Dimension::Year, Dimension::Question]);
    }

    #[test]
    fn test_ranking_top_bottom_overlap() {
        let table = CleanedTable::new(
            ["AL", "AK", "AZ"]
                .iter()
                .enumerate()
                .map(|(i, abbr)| record(2022, abbr, OBESITY, Q_OB, 30.0 + i as f64))
                .collect(),
        );
        let ranking = geographic_ranking(&table, Year(2022), Some(OBESITY), Q_OB);

        assert_eq!(ranking.top(2).len(), 2);
        assert_eq!(ranking.top(2)[0].location_abbr, "AZ");
        assert_eq!(ranking.bottom(2)[1].location_abbr, "AL");
        let both = ranking.top_and_bottom(2);
        assert_eq!(both.len(), 4);
        assert_eq!(both[1].location_abbr, both[2].location_abbr);
    }

    #[test]
    fn test_demographic_breakdown_ascending() {
        let table = CleanedTable::new(vec![
            stratified(2020, "AL", OBESITY, Q_OB, "Income", "$15,000 - $24,999", 36.0),
            stratified(2021, "AL", OBESITY, Q_OB, "Income", "$15,000 - $24,999", 38.0),
            stratified(2020, "AL", OBESITY, Q_OB, "Income", "$75,000 or greater", 28.0),
            stratified(2020, "AL", OBESITY, Q_OB, "Sex", "Male", 31.0),
        ]);
        let query = DemographicQuery {
            class: Some(OBESITY),
            question: Q_OB,
            axis: "Income",
            year: None,
        };
        let result = demographic_breakdown(&table, &query, BreakdownOrder::ValueAscending);

        let labels: Vec<String> = result.rows().iter().map(|r| r.key[0].to_string()).collect();
        assert_eq!(labels, vec!["$75,000 or greater", "$15,000 - $24,999"]);
        assert_eq!(result.rows()[1].value, 37.0);

        let one_year = DemographicQuery {
            year: Some(Year(2021)),
            ..query
        };
        assert_eq!(
            demographic_breakdown(&table, &one_year, BreakdownOrder::Unordered).len(),
            1
        );
    }

    #[test]
    fn test_correlation_missing_metric() {
        let table = CleanedTable::new(vec![record(2022, "AL", OBESITY, Q_OB, 30.0)]);
        let outcome = metric_correlation(&table, Year(2022), Q_OB, Q_IN);
        assert_eq!(
            outcome,
            CorrelationOutcome::NotComputable {
                pairs: Vec::new(),
                reason: NotComputableReason::MissingMetric(Q_IN.to_string()),
            }
        );
    }

    #[test]
    fn test_correlation_single_pair_is_not_computable() {
        let table = CleanedTable::new(vec![
            record(2022, "AL", OBESITY, Q_OB, 30.0),
            record(2022, "AL", "Physical Activity", Q_IN, 25.0),
        ]);
        let outcome = metric_correlation(&table, Year(2022), Q_OB, Q_IN);
        assert!(!outcome.is_computable());
        assert_eq!(outcome.pairs().len(), 1);
        assert!(matches!(
            outcome,
            CorrelationOutcome::NotComputable {
                reason: NotComputableReason::InsufficientPairs(1),
                ..
            }
        ));
    }

    #[test]
    fn test_correlation_constant_metric_has_zero_variance() {
        let mut records = Vec::new();
        for (abbr, obesity) in [("AL", 39.0), ("CO", 25.0), ("TX", 35.0)] {
            records.push(record(2022, abbr, OBESITY, Q_OB, obesity));
            records.push(record(2022, abbr, "Physical Activity", Q_IN, 25.0));
        }
        let outcome = metric_correlation(&CleanedTable::new(records), Year(2022), Q_OB, Q_IN);
        assert_eq!(outcome.pairs().len(), 3);
        assert!(matches!(
            outcome,
            CorrelationOutcome::NotComputable {
                reason: NotComputableReason::ZeroVariance,
                ..
            }
        ));
    }

    #[test]
    fn test_substring_check() {
        let table = CleanedTable::new(vec![record(2022, "AL", OBESITY, Q_OB, 30.0)]);
        assert!(has_question_containing(&table, Year(2022), "obes"));
        assert!(!has_question_containing(&table, Year(2021), "obes"));
        assert!(!has_question_containing(&table, Year(2022), Q_IN));
    }

    #[test]
    fn test_summary_statistics() {
        let table = CleanedTable::new(vec![
            record(2022, "AL", OBESITY, Q_OB, 30.0),
            stratified(2022, "AL", OBESITY, Q_OB, "Sex", "Male", 34.0),
            record(2022, "AK", OBESITY, Q_OB, 20.0),
            record(2021, "AK", OBESITY, Q_OB, 99.0),
        ]);
        let summary = summary_statistics(&table, Year(2022), OBESITY).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, 28.0);
        assert_eq!(summary.median, 30.0);
        assert_eq!(summary.preview.len(), 3);

        assert!(summary_statistics(&table, Year(2019), OBESITY).is_none());
    }
}
