//! Parametrized filter → group → reduce over the cleaned table.
//!
//! Every analytical question is one call to [`aggregate`] (or
//! [`aggregate_by`] with an arbitrary predicate). Group keys are restricted to
//! [`Dimension`], which only names columns of the cleaned schema.

use crate::record::{CleanedRecord, CleanedTable};
use crate::stats;
use nutrigraph_common::{Year, TOTAL_STRATIFICATION};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A groupable column of the cleaned table.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Year,
    LocationAbbr,
    LocationDesc,
    Class,
    Topic,
    Question,
    StratificationCategory,
    Stratification,
}

impl Dimension {
    /// Column name in the cleaned schema.
    pub fn column(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::LocationAbbr => "LocationAbbr",
            Self::LocationDesc => "LocationDesc",
            Self::Class => "Class",
            Self::Topic => "Topic",
            Self::Question => "Question",
            Self::StratificationCategory => "StratificationCategory1",
            Self::Stratification => "Stratification1",
        }
    }

    fn value_of(self, record: &CleanedRecord) -> GroupValue {
        let text = match self {
            Self::Year => return GroupValue::Year(record.year),
            Self::LocationAbbr => &record.location_abbr,
            Self::LocationDesc => &record.location_desc,
            Self::Class => &record.class,
            Self::Topic => &record.topic,
            Self::Question => &record.question,
            Self::StratificationCategory => &record.stratification_category,
            Self::Stratification => &record.stratification,
        };
        GroupValue::Text(text.clone())
    }
}

/// One component of a group key.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    Year(Year),
    Text(String),
}

impl GroupValue {
    /// The year, if this component came from [`Dimension::Year`].
    pub fn as_year(&self) -> Option<Year> {
        match self {
            Self::Year(year) => Some(*year),
            Self::Text(_) => None,
        }
    }

    /// The text, if this component came from a text column.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Year(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// How the `Data_Value` samples of one group are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Arithmetic mean.
    Mean,
    /// Middle value, averaging the two central samples of an even group.
    Median,
}

impl Reduction {
    fn apply(self, values: &[f64]) -> f64 {
        match self {
            Self::Mean => stats::mean(values).unwrap_or_default(),
            Self::Median => stats::median(values).unwrap_or_default(),
        }
    }
}

/// Equality filter over the cleaned columns. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Survey year.
    pub year: Option<Year>,
    /// Top-level category.
    pub class: Option<String>,
    /// Exact question text.
    pub question: Option<String>,
    /// Demographic axis, `Total` for whole-population rows.
    pub stratification_category: Option<String>,
}

impl Filter {
    /// A filter matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to whole-population rows.
    pub fn total() -> Self {
        Self::new().stratification_category(TOTAL_STRATIFICATION)
    }

    /// Restricts to one year; `None` clears the restriction.
    pub fn year(mut self, year: impl Into<Option<Year>>) -> Self {
        self.year = year.into();
        self
    }

    /// Restricts to one class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Restricts to `class` when given.
    pub fn maybe_class(mut self, class: Option<&str>) -> Self {
        self.class = class.map(str::to_string);
        self
    }

    /// Restricts to one exact question.
    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Restricts to one demographic axis.
    pub fn stratification_category(mut self, category: impl Into<String>) -> Self {
        self.stratification_category = Some(category.into());
        self
    }

    /// Whether `record` satisfies every set field. Text fields compare exactly.
    pub fn matches(&self, record: &CleanedRecord) -> bool {
        self.year.map_or(true, |y| record.year == y)
            && self.class.as_deref().map_or(true, |c| record.class == c)
            && self.question.as_deref().map_or(true, |q| record.question == q)
            && self
                .stratification_category
                .as_deref()
                .map_or(true, |s| record.stratification_category == s)
    }

    /// Matching records in table order.
    pub fn apply<'t>(&self, table: &'t CleanedTable) -> Vec<&'t CleanedRecord> {
        table.iter().filter(|r| self.matches(r)).collect()
    }
}

/// One reduced group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedRow {
    /// Group key, one component per requested dimension.
    pub key: Vec<GroupValue>,
    /// Reduced `Data_Value`.
    pub value: f64,
    /// Number of records in the group.
    pub count: usize,
}

/// Result of one aggregation; built per query and discarded after rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedTable {
    dimensions: Vec<Dimension>,
    rows: Vec<AggregatedRow>,
}

impl AggregatedTable {
    /// Dimensions the rows are keyed by.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Rows in the current order.
    pub fn rows(&self) -> &[AggregatedRow] {
        &self.rows
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no record matched the filter.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reorders rows by value, breaking ties by key.
    pub fn sort_by_value(&mut self, ascending: bool) {
        self.rows.sort_by(|a, b| {
            let order = a.value.total_cmp(&b.value).then_with(|| a.key.cmp(&b.key));
            if ascending {
                order
            } else {
                order.reverse()
            }
        });
    }
}

/// Filters `table` with `filter`, groups by `keys` and reduces each group.
pub fn aggregate(
    table: &CleanedTable,
    filter: &Filter,
    keys: &[Dimension],
    reduction: Reduction,
) -> AggregatedTable {
    aggregate_by(table, |record| filter.matches(record), keys, reduction)
}

/// Like [`aggregate`] with an arbitrary predicate. Rows come back sorted by key.
pub fn aggregate_by<P>(
    table: &CleanedTable,
    predicate: P,
    keys: &[Dimension],
    reduction: Reduction,
) -> AggregatedTable
where
    P: Fn(&CleanedRecord) -> bool,
{
    let mut groups: BTreeMap<Vec<GroupValue>, Vec<f64>> = BTreeMap::new();
    for record in table.iter().filter(|&r| predicate(r)) {
        let key = keys.iter().map(|d| d.value_of(record)).collect();
        groups.entry(key).or_default().push(record.data_value);
    }

    let rows = groups
        .into_iter()
        .map(|(key, values)| AggregatedRow {
            value: reduction.apply(&values),
            count: values.len(),
            key,
        })
        .collect();

    AggregatedTable {
        dimensions: keys.to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::{record, stratified};

    fn table() -> CleanedTable {
        CleanedTable::new(vec![
            record(2021, "AL", "Obesity", "Q1", 40.0),
            record(2020, "AL", "Obesity", "Q1", 30.0),
            record(2020, "AK", "Obesity", "Q1", 20.0),
            record(2020, "AK", "Activity", "Q2", 10.0),
            stratified(2020, "AK", "Obesity", "Q1", "Sex", "Male", 99.0),
        ])
    }

    #[test]
    fn test_group_mean_sorted_by_key() {
        let result = aggregate(
            &table(),
            &Filter::total(),
            &[Dimension::Year, Dimension::Class],
            Reduction::Mean,
        );

        let keys: Vec<String> = result
            .rows()
            .iter()
            .map(|r| format!("{}/{}", r.key[0], r.key[1]))
            .collect();
        assert_eq!(keys, vec!["2020/Activity", "2020/Obesity", "2021/Obesity"]);
        assert_eq!(result.rows()[1].value, 25.0);
        assert_eq!(result.rows()[1].count, 2);
    }

    #[test]
    fn test_filter_matches_exactly() {
        let filter = Filter::total().question("Q");
        assert!(aggregate(&table(), &filter, &[Dimension::Year], Reduction::Mean).is_empty());

        let filter = Filter::new().year(Year(2020)).class("Obesity");
        assert_eq!(filter.apply(&table()).len(), 3);
    }

    #[test]
    fn test_reductions() {
        let filter = Filter::total().class("Obesity");
        let by = |reduction| aggregate(&table(), &filter, &[], reduction).rows()[0].value;
        assert_eq!(by(Reduction::Mean), 30.0);
        assert_eq!(by(Reduction::Median), 30.0);
    }

    #[test]
    fn test_sort_by_value() {
        let mut result = aggregate(
            &table(),
            &Filter::total(),
            &[Dimension::LocationAbbr],
            Reduction::Mean,
        );
        result.sort_by_value(false);
        let first = result.rows()[0].key[0].as_text().map(str::to_string);
        assert_eq!(first.as_deref(), Some("AL"));

        result.sort_by_value(true);
        assert_eq!(result.rows()[0].key[0].as_text(), Some("AK"));
    }

    #[test]
    fn test_group_value_accessors() {
        assert_eq!(GroupValue::Year(Year(2020)).as_year(), Some(Year(2020)));
        assert_eq!(GroupValue::Text("x".into()).as_year(), None);
        assert_eq!(GroupValue::Text("x".into()).to_string(), "x");
        assert_eq!(Dimension::Stratification.column(), "Stratification1");
    }
}
