//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use diming_domain::ExtractionResult;
use diming_extractor::ParseError;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format extracted mentions.
    pub fn format_mentions(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_mentions_table(result)),
            OutputFormat::Quiet => Ok(self.format_mentions_quiet(result)),
        }
    }

    /// Format mentions as a table.
    fn format_mentions_table(&self, result: &ExtractionResult) -> String {
        if result.is_empty() {
            return self.colorize("No place names found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Place", "Count"]);

        for (idx, mention) in result.iter().enumerate() {
            builder.push_record([
                (idx + 1).to_string(),
                mention.place_name.clone(),
                mention.count.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format mentions in quiet mode (names only).
    fn format_mentions_quiet(&self, result: &ExtractionResult) -> String {
        let names: Vec<&str> = result.iter().map(|m| m.place_name.as_str()).collect();
        names.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format an unparseable model reply: a warning line, then the raw output.
    pub fn parse_failure(&self, err: &ParseError) -> String {
        format!(
            "{}\n{}",
            self.warning("Model output could not be parsed:"),
            err.raw_output
        )
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diming_domain::PlaceMention;

    fn sample() -> ExtractionResult {
        ExtractionResult::from(vec![
            PlaceMention::new("花果山", 1),
            PlaceMention::new("东海龙宫", 2),
        ])
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_mentions(&sample()).unwrap();

        let parsed: Vec<PlaceMention> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, sample().into_mentions());
    }

    #[test]
    fn test_json_empty_is_array() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_mentions(&ExtractionResult::new()).unwrap();
        assert_eq!(output, "[]");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_mentions(&sample()).unwrap();

        assert!(output.contains("Place"));
        assert!(output.contains("花果山"));
        assert!(output.contains("东海龙宫"));
    }

    #[test]
    fn test_table_empty() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_mentions(&ExtractionResult::new()).unwrap();
        assert_eq!(output, "No place names found.");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_mentions(&sample()).unwrap();
        assert_eq!(output, "花果山\n东海龙宫");
    }

    #[test]
    fn test_messages_without_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }

    #[test]
    fn test_parse_failure_includes_raw_output() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let err = ParseError::new("  地名：东海  ", "no JSON array found");

        assert_eq!(
            formatter.parse_failure(&err),
            "⚠ Model output could not be parsed:\n  地名：东海  "
        );
    }
}
