//! Multi-series line chart of yearly means.

use crate::{DataPoint, DataSet, GraphConfig, GraphRenderer, GraphUtils};
use nutrigraph_common::{NutriGraphError, Result, Year};
use nutrigraph_data::TrendLine;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

/// One line per class or question, x is the survey year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendChart {
    series: Vec<DataSet>,
}

impl TrendChart {
    /// Converts pivoted trend lines into plot series.
    pub fn from_lines(lines: &[TrendLine]) -> Self {
        let series = lines
            .iter()
            .map(|line| DataSet {
                name: line.name.clone(),
                data: line
                    .points
                    .iter()
                    .map(|(year, value)| DataPoint::new(f64::from(year.0), *value))
                    .collect(),
            })
            .collect();
        Self { series }
    }

    /// Plot series in legend order.
    pub fn series(&self) -> &[DataSet] {
        &self.series
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.data.is_empty())
    }

    /// First and last year covered by any series.
    pub fn year_bounds(&self) -> Option<(Year, Year)> {
        let years = self.points().map(|p| p.x as i32);
        let first = years.clone().min()?;
        let last = years.max()?;
        Some((Year(first), Year(last)))
    }

    fn points(&self) -> impl Iterator<Item = &DataPoint> + Clone {
        self.series.iter().flat_map(|s| s.data.iter())
    }

    /// Axis ranges `(x_min, x_max, y_min, y_max)` with padding.
    pub fn data_ranges(&self) -> (f64, f64, f64, f64) {
        let (x_min, x_max) = GraphUtils::padded_range(self.points().map(|p| p.x));
        let (y_min, y_max) = GraphUtils::padded_range(self.points().map(|p| p.y));
        (x_min, x_max, y_min, y_max)
    }
}

impl GraphRenderer for TrendChart {
    fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        if self.is_empty() {
            return Err(NutriGraphError::graph("No data available for trend chart"));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&self.get_background_color(config))?;

        let (x_min, x_max, y_min, y_max) = self.data_ranges();
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

        let year_label = |x: &f64| format!("{x:.0}");
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(config.x_label.as_deref().unwrap_or("Year"))
            .y_desc(config.y_label.as_deref().unwrap_or(""))
            .x_label_formatter(&year_label);
        if !config.style.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        for (index, dataset) in self.series.iter().enumerate() {
            let color = self.color_at(&config.style.color_scheme, index);
            let points: Vec<(f64, f64)> = dataset.data.iter().map(|p| (p.x, p.y)).collect();

            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                .label(dataset.name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
                });
            chart.draw_series(
                points
                    .into_iter()
                    .map(|point| Circle::new(point, 4, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        debug!(chart = self.name(), series = self.series.len(), "rendered {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "temporal_trends"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<TrendLine> {
        vec![
            TrendLine {
                name: "Obesity / Weight Status".to_string(),
                points: vec![(Year(2011), 28.0), (Year(2013), 30.0)],
            },
            TrendLine {
                name: "Physical Activity".to_string(),
                points: vec![(Year(2012), 40.0)],
            },
        ]
    }

    #[test]
    fn test_from_lines_keeps_series_order() {
        let chart = TrendChart::from_lines(&lines());
        assert_eq!(chart.series().len(), 2);
        assert_eq!(chart.series()[0].name, "Obesity / Weight Status");
        assert_eq!(chart.series()[0].data[1], DataPoint::new(2013.0, 30.0));
        assert_eq!(chart.year_bounds(), Some((Year(2011), Year(2013))));
    }

    #[test]
    fn test_data_ranges_are_padded() {
        let (x_min, x_max, y_min, y_max) = TrendChart::from_lines(&lines()).data_ranges();
        assert!(x_min < 2011.0 && x_max > 2013.0);
        assert!(y_min < 28.0 && y_max > 40.0);
    }

    #[test]
    fn test_empty_chart_refuses_to_render() {
        let chart = TrendChart::default();
        assert!(chart.is_empty());
        assert_eq!(chart.year_bounds(), None);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.png");
        assert!(chart.render_to_file(&GraphConfig::default(), &path).is_err());
        assert!(!path.exists());
    }
}
