//! Parsing of dashboard input lines.

use thiserror::Error;

/// A parsed dashboard command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    /// List commands.
    Help,
    /// List pages.
    Views,
    /// Switch page by number or name.
    View(String),
    /// List years.
    Years,
    /// Select a year.
    Year(String),
    /// List classes.
    Classes,
    /// Select a class by number or name.
    Class(String),
    /// List questions of the selected class.
    Metrics,
    /// Select a question by number or exact text.
    Metric(String),
    /// List demographic axes.
    Axes,
    /// Select a demographic axis by number or name.
    Axis(String),
    /// Render the current page again.
    Show,
    /// Leave the session.
    Quit,
}

/// Why an input line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("Unknown command '{0}'. Type 'help' for the list of commands.")]
    Unknown(String),

    /// A command that needs an argument got none.
    #[error("'{command}' needs an argument: {command} <{expected}>")]
    MissingArgument {
        /// Command name.
        command: &'static str,
        /// Argument placeholder.
        expected: &'static str,
    },
}

impl Command {
    /// Parses one input line. The first word is case-insensitive; the rest is kept verbatim.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let argument = |command: &'static str, expected: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument { command, expected })
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word.to_lowercase().as_str() {
            "" => Self::Empty,
            "help" | "?" => Self::Help,
            "views" => Self::Views,
            "view" | "go" => Self::View(argument("view", "number|name")?),
            "years" => Self::Years,
            "year" => Self::Year(argument("year", "year")?),
            "classes" | "categories" => Self::Classes,
            "class" | "category" => Self::Class(argument("class", "number|name")?),
            "metrics" => Self::Metrics,
            "metric" => Self::Metric(argument("metric", "number|question")?),
            "axes" => Self::Axes,
            "axis" => Self::Axis(argument("axis", "number|name")?),
            "show" => Self::Show,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// One line per command, shown by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  help                    show this list
  views                   list pages
  view <number|name>      open a page
  years                   list survey years
  year <year>             select the year filter
  classes                 list categories
  class <number|name>     select the category filter
  metrics                 list metrics of the selected category
  metric <number|text>    select the metric
  axes                    list demographic axes
  axis <number|name>      select the demographic axis
  show                    render the current page again
  quit                    leave the dashboard";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_argument_text() {
        assert_eq!(
            Command::parse("class Obesity / Weight Status").unwrap(),
            Command::Class("Obesity / Weight Status".to_string())
        );
        assert_eq!(Command::parse("  VIEW   3 ").unwrap(), Command::View("3".to_string()));
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("   ").unwrap(), Command::Empty);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("year").unwrap_err(),
            CommandError::MissingArgument {
                command: "year",
                expected: "year"
            }
        );
        let err = Command::parse("plot everything").unwrap_err();
        assert_eq!(err, CommandError::Unknown("plot".to_string()));
        assert!(err.to_string().contains("help"));
    }
}
