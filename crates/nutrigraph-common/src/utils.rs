//! Shared string helpers.

/// Turns a label such as `"Race/Ethnicity"` into a file-name fragment.
///
/// Only `/` and spaces are replaced, so `"Age (years)"` becomes `"Age_(years)"`.
pub fn artifact_stem(label: &str) -> String {
    label.replace(['/', ' '], "_")
}

/// Truncates a string to a maximum number of characters with an ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Formats a percentage value with a fixed number of decimals.
pub fn format_value(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_stem() {
        assert_eq!(artifact_stem("Income"), "Income");
        assert_eq!(artifact_stem("Age (years)"), "Age_(years)");
        assert_eq!(artifact_stem("Race/Ethnicity"), "Race_Ethnicity");
    }

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        assert_eq!(truncate_string(input, 20), "This is a very lo...");
        assert_eq!(truncate_string("Short", 20), "Short");
    }

    #[test]
    fn test_truncate_string_respects_char_boundaries() {
        assert_eq!(truncate_string("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.98765, 2), "0.99");
        assert_eq!(format_value(31.26, 1), "31.3");
    }
}
