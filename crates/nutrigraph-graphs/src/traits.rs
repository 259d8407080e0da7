//! Graph rendering trait shared by every chart kind.

use crate::{ColorScheme, GraphConfig};
use nutrigraph_common::Result;
use plotters::prelude::*;
use std::path::Path;

/// Trait for charts that render themselves to an image file.
pub trait GraphRenderer {
    /// Render the chart as a PNG at `path`.
    fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Get colors from color scheme
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),
                RGBColor(255, 127, 14),
                RGBColor(44, 160, 44),
                RGBColor(214, 39, 40),
                RGBColor(148, 103, 189),
                RGBColor(140, 86, 75),
                RGBColor(227, 119, 194),
                RGBColor(127, 127, 127),
            ],
            ColorScheme::Viridis => vec![
                RGBColor(68, 1, 84),
                RGBColor(72, 40, 120),
                RGBColor(62, 74, 137),
                RGBColor(49, 104, 142),
                RGBColor(38, 130, 142),
                RGBColor(31, 158, 137),
                RGBColor(53, 183, 121),
                RGBColor(109, 205, 89),
                RGBColor(180, 222, 44),
                RGBColor(253, 231, 37),
            ],
            ColorScheme::Magma => vec![
                RGBColor(0, 0, 4),
                RGBColor(28, 16, 68),
                RGBColor(79, 18, 123),
                RGBColor(129, 37, 129),
                RGBColor(181, 54, 122),
                RGBColor(229, 80, 100),
                RGBColor(251, 135, 97),
                RGBColor(254, 194, 135),
                RGBColor(252, 253, 191),
            ],
            ColorScheme::Custom(colors) => colors
                .iter()
                .map(|color_str| self.parse_color(color_str))
                .collect(),
        }
    }

    /// Parse a `#RRGGBB` string; anything else is black.
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        BLACK
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map_or(WHITE, |color| self.parse_color(color))
    }

    /// Color for the `index`-th series or bar, cycling through the scheme.
    fn color_at(&self, scheme: &ColorScheme, index: usize) -> RGBColor {
        let colors = self.get_colors(scheme);
        if colors.is_empty() {
            return BLACK;
        }
        colors[index % colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRenderer;

    impl GraphRenderer for MockRenderer {
        fn render_to_file(&self, _config: &GraphConfig, _path: &Path) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    #[test]
    fn test_color_schemes() {
        let renderer = MockRenderer;
        let default_colors = renderer.get_colors(&ColorScheme::Default);
        assert_eq!(default_colors[0], RGBColor(31, 119, 180));
        assert_eq!(renderer.get_colors(&ColorScheme::Viridis).len(), 10);

        let custom = ColorScheme::Custom(vec!["#FF0000".to_string(), "#00FF00".to_string()]);
        let colors = renderer.get_colors(&custom);
        assert_eq!(colors, vec![RGBColor(255, 0, 0), RGBColor(0, 255, 0)]);
        assert_eq!(renderer.color_at(&custom, 3), RGBColor(0, 255, 0));
        assert_eq!(renderer.color_at(&ColorScheme::Custom(Vec::new()), 0), BLACK);
    }

    #[test]
    fn test_color_parsing() {
        let renderer = MockRenderer;
        assert_eq!(renderer.parse_color("#0000FF"), RGBColor(0, 0, 255));
        assert_eq!(renderer.parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(renderer.parse_color("#ZZ0000"), RGBColor(0, 0, 0));
        assert_eq!(renderer.parse_color("#ééé"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_background_color() {
        let renderer = MockRenderer;
        let mut config = GraphConfig::default();
        assert_eq!(renderer.get_background_color(&config), RGBColor(255, 255, 255));

        config.style.background_color = None;
        assert_eq!(renderer.get_background_color(&config), WHITE);

        config.style.background_color = Some("#FF0000".to_string());
        assert_eq!(renderer.get_background_color(&config), RGBColor(255, 0, 0));
    }
}
