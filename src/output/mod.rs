//! Output formatting for the CLI.
//!
//! Results go to stdout in the selected format:
//! - `table` - aligned columns for humans (default)
//! - `json` - pretty-printed JSON
//! - `yaml` - YAML documents
//! - `jsonl` - one compact JSON object per line
//!
//! Status lines (progress, warnings) always go to stderr so that piped
//! output stays machine-readable.

mod table;

pub use table::TableFormatter;

use std::io::IsTerminal;

use serde::Serialize;

use crate::error::{Error, Result};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned table.
    #[default]
    Table,
    /// Pretty JSON.
    Json,
    /// YAML.
    Yaml,
    /// JSON Lines.
    JsonLines,
}

impl OutputFormat {
    /// Parse an output format name.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "jsonl" | "jsonlines" => Ok(Self::JsonLines),
            _ => Err(Error::invalid_arg(format!(
                "Unknown output format '{s}'. Use: table, json, yaml, jsonl"
            ))),
        }
    }
}

/// Rows that can be shown in a table.
pub trait Displayable {
    /// Cells of this row.
    fn table_row(&self) -> Vec<String>;

    /// Column headers.
    fn table_headers() -> Vec<&'static str>;
}

#[derive(Debug, Clone, Copy)]
enum Status {
    Success,
    Warning,
}

impl Status {
    fn marker(self) -> &'static str {
        match self {
            Status::Success => "✓",
            Status::Warning => "⚠",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Status::Success => "\x1b[32m",
            Status::Warning => "\x1b[33m",
        }
    }
}

/// Writes command results and status lines.
#[derive(Debug)]
pub struct Output {
    format: OutputFormat,
    color: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output writer.
    pub fn new(format: OutputFormat, color: bool, quiet: bool) -> Self {
        Self { format, color, quiet }
    }

    /// Create an output writer from CLI options.
    ///
    /// Status markers are colored when stderr is a terminal.
    pub fn from_cli(format: &str, quiet: bool) -> Result<Self> {
        Ok(Self::new(OutputFormat::parse(format)?, std::io::stderr().is_terminal(), quiet))
    }

    /// Write a single result.
    ///
    /// In table mode a plain string is printed as-is and anything else as
    /// pretty JSON.
    pub fn value<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        if self.format == OutputFormat::Table {
            return match serde_json::to_value(value)? {
                serde_json::Value::String(text) => {
                    println!("{text}");
                    Ok(())
                },
                other => print_json(&other, true),
            };
        }
        self.serialized(value)
    }

    /// Write a list of rows.
    pub fn table<T: Displayable + Serialize>(&self, rows: &[T]) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                let mut formatter = TableFormatter::new();
                formatter.headers(T::table_headers());
                for row in rows {
                    formatter.row(row.table_row());
                }
                print!("{}", formatter.render());
                Ok(())
            },
            OutputFormat::JsonLines => rows.iter().try_for_each(|row| print_json(row, false)),
            OutputFormat::Json | OutputFormat::Yaml => self.serialized(rows),
        }
    }

    fn serialized<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        match self.format {
            OutputFormat::Yaml => {
                print!("{}", serde_yaml::to_string(value)?);
                Ok(())
            },
            OutputFormat::JsonLines => print_json(value, false),
            OutputFormat::Json | OutputFormat::Table => print_json(value, true),
        }
    }

    /// Print an informational line to stderr.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    /// Print a success line to stderr.
    pub fn success(&self, message: &str) {
        self.status(Status::Success, message);
    }

    /// Print a warning line to stderr.
    pub fn warn(&self, message: &str) {
        self.status(Status::Warning, message);
    }

    fn status(&self, status: Status, message: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{}{}\x1b[0m {message}", status.color(), status.marker());
        } else {
            eprintln!("{} {message}", status.marker());
        }
    }

    /// Check if status lines are suppressed.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(OutputFormat::Table, false, false)
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json =
        if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("yml").unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::parse("jsonl").unwrap(), OutputFormat::JsonLines);
        assert!(OutputFormat::parse("xml").is_err());
    }

    #[test]
    fn test_from_cli() {
        let output = Output::from_cli("yaml", true).unwrap();
        assert_eq!(output.format(), OutputFormat::Yaml);
        assert!(output.is_quiet());
    }
}
