//! Chart configuration and plot data structures.

use nutrigraph_config::GraphsConfig;
use serde::{Deserialize, Serialize};

/// Per-chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: "Graph".to_string(),
            width: 1000,
            height: 600,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Base configuration from the `[graphs]` settings.
    pub fn from_settings(settings: &GraphsConfig) -> Self {
        let color_scheme = if settings.palette.is_empty() {
            ColorScheme::Default
        } else {
            ColorScheme::Custom(settings.palette.clone())
        };

        Self {
            width: settings.width,
            height: settings.height,
            style: StyleConfig {
                color_scheme,
                background_color: Some(settings.background_color.clone()),
                title_font: FontConfig {
                    size: settings.title_font_size,
                    ..FontConfig::default()
                },
                show_grid: settings.enable_grid,
                ..StyleConfig::default()
            },
            ..Self::default()
        }
    }

    /// Copy of this configuration with a new title and axis labels.
    pub fn titled(&self, title: impl Into<String>, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.into(),
            x_label: Some(x_label.to_string()),
            y_label: Some(y_label.to_string()),
            ..self.clone()
        }
    }
}

/// Data point for graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
}

impl DataPoint {
    /// Unlabelled point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, label: None }
    }
}

/// A named series of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    pub name: String,
    pub data: Vec<DataPoint>,
}

/// Color scheme for graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColorScheme {
    Default,
    Viridis,
    Magma,
    Custom(Vec<String>),
}

/// Font configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Margin configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 30,
            bottom: 50,
            left: 70,
        }
    }
}

/// Styling shared by all chart kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub color_scheme: ColorScheme,
    pub background_color: Option<String>,
    pub title_font: FontConfig,
    pub axis_font: FontConfig,
    pub margins: MarginConfig,
    pub show_grid: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Default,
            background_color: Some("#FFFFFF".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 22,
            },
            axis_font: FontConfig::default(),
            margins: MarginConfig::default(),
            show_grid: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_uses_palette_when_given() {
        let mut settings = GraphsConfig::default();
        assert_eq!(
            GraphConfig::from_settings(&settings).style.color_scheme,
            ColorScheme::Default
        );

        settings.palette = vec!["#112233".to_string()];
        settings.width = 640;
        settings.enable_grid = false;
        let config = GraphConfig::from_settings(&settings);
        assert_eq!(config.width, 640);
        assert!(!config.style.show_grid);
        assert_eq!(
            config.style.color_scheme,
            ColorScheme::Custom(vec!["#112233".to_string()])
        );
    }

    #[test]
    fn test_titled_keeps_style() {
        let base = GraphConfig::from_settings(&GraphsConfig::default());
        let titled = base.titled("Trends", "Year", "Percentage (%)");
        assert_eq!(titled.title, "Trends");
        assert_eq!(titled.y_label.as_deref(), Some("Percentage (%)"));
        assert_eq!(titled.style, base.style);
    }
}
