//! # NutriGraph Data
//!
//! Cleaning pipeline and query layer for the nutrition, physical activity and
//! obesity survey extract.
//!
//! The raw extract is cleaned once into a fixed eleven-column table
//! ([`CleanedTable`]). Every analytical question is then a filter, group and
//! reduce over that table through [`query::aggregate`], wrapped by the
//! functions in [`analyses`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod analyses;
pub mod cleaning;
pub mod io;
pub mod query;
pub mod record;
pub mod schema;
pub mod session;
pub mod stats;

pub use analyses::{
    demographic_breakdown, geographic_ranking, has_question_containing, metric_correlation,
    summary_statistics, temporal_trend, trend_lines, BreakdownOrder, CorrelationOutcome,
    DemographicQuery, GeographicRanking, MetricPair, NotComputableReason, RankedLocation,
    SummaryStatistics, TrendLine, TrendSeries,
};
pub use cleaning::{clean, clean_file, CleaningReport};
pub use io::{read_cleaned, read_raw, write_cleaned};
pub use query::{
    aggregate, aggregate_by, AggregatedRow, AggregatedTable, Dimension, Filter, GroupValue,
    Reduction,
};
pub use record::{CleanedRecord, CleanedTable, RawTable};
pub use session::DataSession;
pub use stats::{linear_fit, pearson, LinearFit};
