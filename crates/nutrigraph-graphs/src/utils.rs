//! Graph utility functions and helpers.

use nutrigraph_common::{artifact_stem, Year};

/// Line chart of mean value per year and class.
pub const TEMPORAL_TRENDS_FILE: &str = "temporal_trends.png";

/// Top and bottom states by obesity rate.
pub const GEOGRAPHIC_RANKING_FILE: &str = "geographic_obesity_ranking.png";

/// Obesity against physical inactivity scatter.
pub const CORRELATION_FILE: &str = "correlation_obesity_inactivity.png";

/// Utility functions for graph generation.
pub struct GraphUtils;

impl GraphUtils {
    /// Image file name of the demographic chart for one axis.
    pub fn demographic_file_name(axis: &str) -> String {
        format!("demographic_{}.png", artifact_stem(axis))
    }

    /// Height that leaves room for one readable bar per item.
    pub fn bar_chart_height(base_height: u32, bars: usize) -> u32 {
        let needed = 120 + 32 * u32::try_from(bars).unwrap_or(u32::MAX / 64);
        base_height.max(needed)
    }

    /// `min..max` of `values` widened by 5% on each side.
    ///
    /// Empty input gives `0..1`; a single distinct value is widened by one unit.
    pub fn padded_range<I>(values: I) -> (f64, f64)
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        if (max - min).abs() < f64::EPSILON {
            return (min - 1.0, max + 1.0);
        }
        let padding = (max - min) * 0.05;
        (min - padding, max + padding)
    }

    /// `"2011-2023"`, or a single year when both ends agree.
    pub fn year_span(first: Year, last: Year) -> String {
        if first == last {
            first.to_string()
        } else {
            format!("{first}-{last}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demographic_file_names() {
        assert_eq!(
            GraphUtils::demographic_file_name("Race/Ethnicity"),
            "demographic_Race_Ethnicity.png"
        );
        assert_eq!(
            GraphUtils::demographic_file_name("Age (years)"),
            "demographic_Age_(years).png"
        );
    }

    #[test]
    fn test_bar_chart_height_grows_with_bars() {
        assert_eq!(GraphUtils::bar_chart_height(600, 4), 600);
        assert_eq!(GraphUtils::bar_chart_height(600, 20), 760);
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(GraphUtils::padded_range(Vec::new()), (0.0, 1.0));
        assert_eq!(GraphUtils::padded_range(vec![5.0, 5.0]), (4.0, 6.0));

        let (lo, hi) = GraphUtils::padded_range(vec![10.0, 20.0]);
        assert!((lo - 9.5).abs() < 1e-9);
        assert!((hi - 20.5).abs() < 1e-9);
    }

    #[test]
    fn test_year_span() {
        assert_eq!(GraphUtils::year_span(Year(2011), Year(2023)), "2011-2023");
        assert_eq!(GraphUtils::year_span(Year(2020), Year(2020)), "2020");
    }
}
