//! Output formatting and writing utilities
//!
//! Results are written as JSON, YAML or human-readable text. Validation
//! errors, transformation statistics and catalog reports have dedicated
//! human renderings; everything else falls back to pretty JSON.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use schemadoc_core::{CatalogReport, ReportMetadata, TransformStats};
use schemadoc_schemas::{ValidationError, ValidationErrors};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use tracing::trace;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format validation errors with detailed violation reporting
    fn format_validation_errors(&self, errors: &ValidationErrors) -> Result<String>;

    /// Format a single validation error
    fn format_validation_error(&self, error: &ValidationError) -> Result<String>;

    /// Format transformation statistics
    fn format_stats(&self, stats: &TransformStats) -> Result<String>;

    /// Format the summary of a catalog run, without the routes themselves
    fn format_catalog_summary(&self, report: &CatalogReport) -> Result<String>;
}

impl OutputFormat {
    fn serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        self.serialize(value)
    }

    fn format_validation_errors(&self, errors: &ValidationErrors) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_errors_human(errors)),
            _ => self.serialize(errors),
        }
    }

    fn format_validation_error(&self, error: &ValidationError) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_error_human(error)),
            _ => self.serialize(error),
        }
    }

    fn format_stats(&self, stats: &TransformStats) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_stats_human(stats)),
            _ => self.serialize(stats),
        }
    }

    fn format_catalog_summary(&self, report: &CatalogReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_catalog_summary_human(report)),
            _ => self.serialize(&CatalogSummary {
                metadata: &report.metadata,
                stats: &report.stats,
                errors: &report.errors,
            }),
        }
    }
}

/// Machine-readable catalog summary; the routes go to `data`
#[derive(Serialize)]
struct CatalogSummary<'a> {
    metadata: &'a ReportMetadata,
    stats: &'a TransformStats,
    errors: &'a ValidationErrors,
}

/// Output writer that handles different output formats and colors
///
/// Results go to the data writer (stdout). Status messages, section headers
/// and tables go to the status writer (stderr) so redirected output stays a
/// single document.
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
    status: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
            status: Box::new(io::stderr()),
        }
    }

    /// Create an output writer with a custom data writer; status output is discarded
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self::with_writers(format, use_color, quiet, writer, Box::new(io::sink()))
    }

    /// Create an output writer with custom data and status writers
    pub fn with_writers(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
        status: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
            status,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Turn progress indicators off, e.g. when the config says so
    pub fn disable_progress(&mut self) {
        self.show_progress = false;
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    fn status_line(&mut self, content: &str) -> Result<()> {
        writeln!(self.status, "{}", content)?;
        self.status.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.status_line(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.status_line(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.status_line(&message.green().to_string())
        } else {
            self.status_line(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.status_line(&message.yellow().to_string())
        } else {
            self.status_line(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.status_line(&message.red().to_string())
        } else {
            self.status_line(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.status_line("")?;
        if self.use_color {
            self.status_line(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.status_line(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "writing data");

        if self.format == OutputFormat::Human || self.format == OutputFormat::Yaml {
            self.write(&formatted)?;
            if !formatted.ends_with('\n') {
                self.writeln("")?;
            }
            Ok(())
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write validation errors with specialized formatting
    pub fn validation_errors(&mut self, errors: &ValidationErrors) -> Result<()> {
        let formatted = self.format.format_validation_errors(errors)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a single validation error
    pub fn validation_error(&mut self, error: &ValidationError) -> Result<()> {
        let formatted = self.format.format_validation_error(error)?;
        self.writeln(formatted.trim_end())
    }

    /// Write transformation statistics
    pub fn stats(&mut self, stats: &TransformStats) -> Result<()> {
        let formatted = self.format.format_stats(stats)?;
        self.writeln(formatted.trim_end())
    }

    /// Write the summary of a catalog run
    pub fn catalog_summary(&mut self, report: &CatalogReport) -> Result<()> {
        let formatted = self.format.format_catalog_summary(report)?;
        self.writeln(formatted.trim_end())
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.len()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.status_line(&header_row.bold().to_string())?;
        } else {
            self.status_line(&header_row)?;
        }

        let separator = widths.iter().map(|w| "─".repeat(*w)).collect::<Vec<_>>().join("─┼─");
        self.status_line(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(width) => format!("{:width$}", cell, width = *width),
                    None => cell.clone(),
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.status_line(&row_str)?;
        }

        Ok(())
    }
}

/// Progress bar style for catalog runs
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Spinner style for single documents
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Rows of a statistics table
pub fn stats_rows(stats: &TransformStats) -> Vec<Vec<String>> {
    [
        ("Nodes visited", stats.nodes_visited),
        ("Identifiers removed", stats.identifiers_removed),
        ("Identifiers annotated", stats.identifiers_annotated),
        ("Internal keywords stripped", stats.internal_keywords_stripped),
        ("Nullable rewrites", stats.nullable_rewrites),
    ]
    .into_iter()
    .map(|(label, count)| vec![label.to_string(), count.to_string()])
    .collect()
}

fn format_stats_human(stats: &TransformStats) -> String {
    let mut output = String::from("Transformation Statistics:\n");
    for row in stats_rows(stats) {
        output.push_str(&format!("  {:<28}{}\n", format!("{}:", row[0]), row[1]));
    }
    output
}

fn format_catalog_summary_human(report: &CatalogReport) -> String {
    let metadata = &report.metadata;
    let mut output = String::new();

    output.push_str(&format!(
        "Routes: {} transformed, {} failed of {}\n",
        metadata.route_count.saturating_sub(metadata.failed_count),
        metadata.failed_count,
        metadata.route_count
    ));
    output.push_str(&format!("Generated: {} (schemadoc {})\n", metadata.generated_at, metadata.version));

    if !report.errors.is_empty() {
        output.push('\n');
        output.push_str(&format_validation_errors_human(&report.errors));
    }

    output
}

/// Format validation errors for human reading
fn format_validation_errors_human(errors: &ValidationErrors) -> String {
    let mut output = format!("❌ Validation Failed - {} Error(s)\n\n", errors.len());

    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, format_validation_error_human(error)));
    }

    output
}

/// Format a single validation error for human reading
fn format_validation_error_human(error: &ValidationError) -> String {
    let mut output = String::new();

    output.push_str(&format!("📍 Path: {}\n", error.path));
    output.push_str(&format!("💬 Message: {}\n", error.message));

    if !error.schema_violations.is_empty() {
        output.push_str("🔍 Schema Violations:\n");

        for violation in &error.schema_violations {
            output.push_str(&format!("  • Rule: {}\n", violation.rule));
            output.push_str(&format!("    Expected: {}\n", violation.expected));
            output.push_str(&format!("    Actual: {}\n", violation.actual));
        }
    }

    output
}
