//! Fixed explanatory text shown by the narrative pages.

/// Dashboard heading.
pub const DASHBOARD_TITLE: &str = "Nutrition, Physical Activity, and Obesity Dashboard";

/// Page 1: dataset and public-health context.
pub const BACKGROUND: &str = "\
Dataset overview
  State-level data from the Nutrition, Physical Activity, and Obesity module of
  the Behavioral Risk Factor Surveillance System (BRFSS), covering health
  behaviours and status of adults in the United States.

Public health importance
  Obesity is linked to chronic diseases such as diabetes, heart disease and
  cancer. Knowing its trends, geography and demographic disparities helps with:
  * Policy making: targeting resources to high-need areas.
  * Intervention planning: designing programs for specific groups.
  * Health promotion: raising awareness of healthy behaviours.";

/// How to change the global filters.
pub const FILTER_HINT: &str =
    "Use 'year' and 'class' to filter the data, 'views' to list the pages.";

/// Page 2: what the cleaning step did.
pub const CLEANING_STEPS: &str = "\
Data cleaning process
  1. Missing values: rows without a Data_Value were removed.
  2. Column selection: only Year, location, Class, Topic, Question,
     Data_Value, unit, stratification and GeoLocation were kept.
  3. Standardisation: YearStart was renamed to Year.";

/// Page 7: anticipated questions with their answers.
pub const QA_PAIRS: [(&str, &str); 5] = [
    (
        "How was missing data handled?",
        "Rows whose primary metric (Data_Value) was missing were removed; no values were imputed.",
    ),
    (
        "Is there any bias in this dataset?",
        "Yes. BRFSS is a self-reported telephone survey, so social desirability bias \
         (under-reported weight, over-reported activity) and selection bias \
         (people without phones) are both possible.",
    ),
    (
        "Why correlate these specific variables?",
        "Obesity and physical inactivity share a well-documented energy-balance link, \
         and inactivity is a modifiable risk factor.",
    ),
    (
        "Were there any outliers?",
        "States such as West Virginia and Mississippi consistently sit well above the \
         national average obesity rate.",
    ),
    (
        "What are the limitations?",
        "The analysis is correlational, not causal, and state-level aggregates hide \
         local variation within states.",
    ),
];

/// Page 8: insights and conclusion.
pub const SUMMARY: &str = "\
Summary of insights
  1. Rising trends: obesity rates trend upward across the survey years.
  2. Geographic hotspots: the South and Midwest show higher obesity and
     physical inactivity.
  3. Socioeconomic link: lower income and education go with poorer outcomes.
  4. Behavioural connection: physical inactivity and obesity prevalence are
     strongly positively correlated.

Conclusion
  The obesity epidemic is multi-dimensional. Interventions should target
  individual behaviour as well as the socioeconomic and environmental
  determinants of health. County-level data would allow finer insights.";
