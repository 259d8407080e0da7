//! Common type definitions and well-known survey values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A survey year (`YearStart` in the raw extract, `Year` once cleaned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(pub i32);

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Year {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// `StratificationCategory1` value for whole-population rows.
pub const TOTAL_STRATIFICATION: &str = "Total";

/// Survey class holding the obesity metrics.
pub const OBESITY_CLASS: &str = "Obesity / Weight Status";

/// Question text of the adult obesity prevalence metric.
pub const OBESITY_QUESTION: &str = "Percent of adults aged 18 years and older who have obesity";

/// Question text of the leisure-time physical inactivity metric.
pub const INACTIVITY_QUESTION: &str =
    "Percent of adults who engage in no leisure-time physical activity";

/// Demographic axes charted by the batch report.
pub const REPORT_DEMOGRAPHIC_AXES: [&str; 4] =
    ["Income", "Education", "Age (years)", "Race/Ethnicity"];

/// Demographic axes offered by the interactive dashboard.
pub const DASHBOARD_DEMOGRAPHIC_AXES: [&str; 5] =
    ["Income", "Education", "Age (years)", "Race/Ethnicity", "Sex"];
