//! Horizontal bar chart used for state rankings and demographic breakdowns.

use crate::{GraphConfig, GraphRenderer};
use nutrigraph_common::{format_value, truncate_string, NutriGraphError, Result};
use nutrigraph_data::{AggregatedTable, RankedLocation};
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

/// One labelled bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarItem {
    /// Category label drawn on the y axis.
    pub label: String,
    /// Bar length.
    pub value: f64,
}

/// Bars drawn top to bottom in item order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HorizontalBarChart {
    items: Vec<BarItem>,
}

impl HorizontalBarChart {
    /// Maximum label length before truncation.
    const LABEL_WIDTH: usize = 28;

    /// Bars from arbitrary items.
    pub fn new(items: Vec<BarItem>) -> Self {
        Self { items }
    }

    /// One bar per ranked state, labelled with the state name.
    pub fn from_ranking(entries: &[RankedLocation]) -> Self {
        Self::new(
            entries
                .iter()
                .map(|entry| BarItem {
                    label: entry.location_desc.clone(),
                    value: entry.value,
                })
                .collect(),
        )
    }

    /// One bar per aggregated row, labelled with its key.
    pub fn from_aggregate(table: &AggregatedTable) -> Self {
        Self::new(
            table
                .rows()
                .iter()
                .map(|row| BarItem {
                    label: row
                        .key
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" / "),
                    value: row.value,
                })
                .collect(),
        )
    }

    /// Bars in drawing order.
    pub fn items(&self) -> &[BarItem] {
        &self.items
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Upper bound of the value axis, 10% past the longest bar.
    pub fn value_axis_max(&self) -> f64 {
        let max = self.items.iter().map(|i| i.value).fold(0.0, f64::max);
        if max <= 0.0 {
            1.0
        } else {
            max * 1.1
        }
    }

    /// Segment index of the `index`-th item; the first item sits at the top.
    fn row_of(&self, index: usize) -> usize {
        self.items.len() - 1 - index
    }

    fn label_for_row(&self, row: usize) -> String {
        self.items
            .len()
            .checked_sub(row + 1)
            .and_then(|index| self.items.get(index))
            .map(|item| truncate_string(&item.label, Self::LABEL_WIDTH))
            .unwrap_or_default()
    }
}

impl GraphRenderer for HorizontalBarChart {
    fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        if self.is_empty() {
            return Err(NutriGraphError::graph("No data available for bar chart"));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&self.get_background_color(config))?;

        let max_value = self.value_axis_max();
        let rows = self.items.len();
        let title_font = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        );
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left * 3)
            .build_cartesian_2d(0.0..max_value, (0..rows).into_segmented())?;

        let row_label = |value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(row) => self.label_for_row(*row),
            _ => String::new(),
        };
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(config.x_label.as_deref().unwrap_or(""))
            .y_desc(config.y_label.as_deref().unwrap_or(""))
            .y_labels(rows)
            .y_label_formatter(&row_label)
            .disable_y_mesh();
        if !config.style.show_grid {
            mesh.disable_x_mesh();
        }
        mesh.draw()?;

        for (index, item) in self.items.iter().enumerate() {
            let row = self.row_of(index);
            let color = self.color_at(&config.style.color_scheme, index);

            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(row)),
                    (item.value, SegmentValue::Exact(row + 1)),
                ],
                color.filled(),
            );
            bar.set_margin(3, 3, 0, 0);
            chart.draw_series(std::iter::once(bar))?;

            chart.draw_series(std::iter::once(Text::new(
                format_value(item.value, 1),
                (item.value + max_value * 0.01, SegmentValue::CenterOf(row)),
                ("sans-serif", 12).into_font().color(&BLACK),
            )))?;
        }

        root.present()?;
        debug!(chart = self.name(), bars = rows, "rendered {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "horizontal_bar"
    }
}
