//! # NutriGraph Graphs
//!
//! Static chart rendering for the survey analyses.
//!
//! Charts are prepared from query results first and rendered with plotters
//! afterwards, so the preparation step can be tested without fonts or image
//! output. [`ReportGenerator`] drives the fixed batch report.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bar_chart;
pub mod manager;
pub mod scatter_chart;
pub mod traits;
pub mod trend_chart;
#[allow(missing_docs)]
pub mod types;
pub mod utils;

pub use bar_chart::*;
pub use manager::*;
pub use scatter_chart::*;
pub use traits::*;
pub use trend_chart::*;
pub use types::*;
pub use utils::*;
