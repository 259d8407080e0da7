//! Scatter plot of two metrics per state with a least-squares line.

use crate::{DataPoint, GraphConfig, GraphRenderer, GraphUtils};
use nutrigraph_common::{NutriGraphError, Result};
use nutrigraph_data::{linear_fit, CorrelationOutcome, LinearFit};
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

/// Second metric on x, first metric on y, one point per joined state.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationChart {
    points: Vec<DataPoint>,
    fit: Option<LinearFit>,
    coefficient: f64,
}

impl CorrelationChart {
    /// Chart for a computed correlation; `None` when no coefficient exists.
    pub fn from_outcome(outcome: &CorrelationOutcome) -> Option<Self> {
        let CorrelationOutcome::Computed { pairs, coefficient } = outcome else {
            return None;
        };

        let points: Vec<DataPoint> = pairs
            .iter()
            .map(|pair| DataPoint {
                x: pair.second,
                y: pair.first,
                label: Some(pair.location_abbr.clone()),
            })
            .collect();
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

        Some(Self {
            fit: linear_fit(&xs, &ys),
            points,
            coefficient: *coefficient,
        })
    }

    /// Plotted points.
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Pearson coefficient shown in the title.
    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// Regression line endpoints across the x range, if a fit exists.
    pub fn regression_segment(&self) -> Option<[(f64, f64); 2]> {
        let fit = self.fit?;
        let (x_min, x_max) = self.x_extent()?;
        Some([(x_min, fit.at(x_min)), (x_max, fit.at(x_max))])
    }

    fn x_extent(&self) -> Option<(f64, f64)> {
        let min = self.points.iter().map(|p| p.x).reduce(f64::min)?;
        let max = self.points.iter().map(|p| p.x).reduce(f64::max)?;
        Some((min, max))
    }
}

impl GraphRenderer for CorrelationChart {
    fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        if self.points.is_empty() {
            return Err(NutriGraphError::graph("No data available for correlation chart"));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&self.get_background_color(config))?;

        let (x_min, x_max) = GraphUtils::padded_range(self.points.iter().map(|p| p.x));
        let (y_min, y_max) = GraphUtils::padded_range(self.points.iter().map(|p| p.y));
        let title_font = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        );
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(config.x_label.as_deref().unwrap_or(""))
            .y_desc(config.y_label.as_deref().unwrap_or(""));
        if !config.style.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        let color = self.color_at(&config.style.color_scheme, 0);
        chart.draw_series(
            self.points
                .iter()
                .map(|p| Circle::new((p.x, p.y), 5, color.filled())),
        )?;

        if let Some(segment) = self.regression_segment() {
            chart.draw_series(LineSeries::new(segment, RED.stroke_width(2)))?;
        }

        root.present()?;
        debug!(chart = self.name(), points = self.points.len(), "rendered {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "correlation"
    }
}
