//! Error types and utilities for NutriGraph

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for NutriGraph operations
pub type Result<T> = std::result::Result<T, NutriGraphError>;

/// Main error type for NutriGraph operations
#[derive(Error, Debug)]
pub enum NutriGraphError {
    /// An input file (raw extract or cleaned table) does not exist
    #[error("Input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    /// Required columns are absent from a table header
    #[error("Schema validation failed, missing columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A cell could not be parsed into its column type
    #[error("Parse error at line {line}, column '{column}': {message}")]
    Parse {
        line: u64,
        column: String,
        message: String,
    },

    /// CSV reader/writer errors
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or configuration values
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl NutriGraphError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing-input error for the given path
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    /// Create a schema error listing the absent columns
    pub fn schema<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Schema {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a parse error for a cell
    pub fn parse(line: u64, column: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column: column.into(),
            message: msg.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error reports an absent input file
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput { .. })
    }

    /// Whether this error reports a header/schema mismatch
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

// Error conversion implementations for external types

/// Convert from csv::Error to NutriGraphError
impl From<csv::Error> for NutriGraphError {
    fn from(err: csv::Error) -> Self {
        let message = match err.position() {
            Some(pos) => format!("malformed record at line {}", pos.line()),
            None => "CSV processing failed".to_string(),
        };
        Self::Csv {
            message,
            source: Some(Box::new(err)),
        }
    }
}

/// Convert from toml::de::Error to NutriGraphError
impl From<toml::de::Error> for NutriGraphError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to NutriGraphError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for NutriGraphError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = NutriGraphError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = NutriGraphError::config("config issue");
        assert_eq!(config_error.to_string(), "Configuration error: config issue");

        let validation_error = NutriGraphError::validation_field("must be positive", "ranking_size");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("must be positive"));
    }

    #[test]
    fn test_schema_error_lists_columns() {
        let error = NutriGraphError::schema(["GeoLocation", "Topic"]);
        assert!(error.is_schema());
        assert!(!error.is_missing_input());
        assert_eq!(
            error.to_string(),
            "Schema validation failed, missing columns: GeoLocation, Topic"
        );
    }

    #[test]
    fn test_missing_input_error() {
        let error = NutriGraphError::missing_input("cleaned_data.csv");
        assert!(error.is_missing_input());
        assert_eq!(error.to_string(), "Input file not found: cleaned_data.csv");
    }

    #[test]
    fn test_parse_error_display() {
        let error = NutriGraphError::parse(12, "Data_Value", "invalid float literal");
        assert_eq!(
            error.to_string(),
            "Parse error at line 12, column 'Data_Value': invalid float literal"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error: NutriGraphError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let error: NutriGraphError = toml_error.into();

        assert!(error.to_string().contains("Configuration error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = NutriGraphError::config_with_source("Middle layer", root_error);
        let top_error = NutriGraphError::with_source("Top layer", middle_error);

        let mut current_error: &dyn Error = &top_error;
        let mut depth = 0;
        while let Some(source) = current_error.source() {
            current_error = source;
            depth += 1;
        }

        assert_eq!(depth, 2);
    }
}
