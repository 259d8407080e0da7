//! Dashboard pages.

use std::fmt;

/// One navigable dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Dataset background and motivation.
    Background,
    /// Cleaning steps and summary statistics for the current filters.
    CleaningStats,
    /// Yearly means per question of the selected class.
    TemporalTrends,
    /// States ranked by the selected metric.
    Geographic,
    /// Selected metric per stratum of a demographic axis.
    Demographic,
    /// Obesity against physical inactivity per state.
    Correlation,
    /// Anticipated questions with answers.
    QaPrep,
    /// Key findings.
    Summary,
}

impl View {
    /// Every page in navigation order.
    pub const ALL: [View; 8] = [
        View::Background,
        View::CleaningStats,
        View::TemporalTrends,
        View::Geographic,
        View::Demographic,
        View::Correlation,
        View::QaPrep,
        View::Summary,
    ];

    /// 1-based position in the navigation list.
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).map_or(0, |i| i + 1)
    }

    /// Navigation label.
    pub fn title(self) -> &'static str {
        match self {
            Self::Background => "Background & Intro",
            Self::CleaningStats => "Data Cleaning & Stats",
            Self::TemporalTrends => "Q1: Temporal Trends",
            Self::Geographic => "Q2: Geographic Analysis",
            Self::Demographic => "Q3: Demographic Analysis",
            Self::Correlation => "Correlation Analysis",
            Self::QaPrep => "Q&A Prep",
            Self::Summary => "Summary & Conclusion",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Background => &["background", "intro"],
            Self::CleaningStats => &["cleaning", "stats"],
            Self::TemporalTrends => &["trends", "temporal"],
            Self::Geographic => &["geographic", "geo", "states"],
            Self::Demographic => &["demographic", "demographics", "demo"],
            Self::Correlation => &["correlation", "corr"],
            Self::QaPrep => &["qa", "q&a"],
            Self::Summary => &["summary", "conclusion"],
        }
    }

    /// Resolves a page by number (`"3"`) or alias (`"trends"`), case-insensitively.
    pub fn from_selector(selector: &str) -> Option<Self> {
        let selector = selector.trim().to_lowercase();
        if let Ok(number) = selector.parse::<usize>() {
            return number.checked_sub(1).and_then(|i| Self::ALL.get(i).copied());
        }
        Self::ALL
            .into_iter()
            .find(|view| view.aliases().contains(&selector.as_str()))
    }

    /// Whether the page draws a chart.
    pub fn has_chart(self) -> bool {
        matches!(
            self,
            Self::TemporalTrends | Self::Geographic | Self::Demographic | Self::Correlation
        )
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}
