//! Output formatting module

use anyhow::Result;
use linesync_engine::{LineReport, Request, SyncReport};
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Summary of a completed sync run
    fn sync_report(&mut self, report: &SyncReport) -> Result<()>;

    /// Per-line formatting report
    fn line_reports(&mut self, lines: &[LineReport]) -> Result<()>;

    /// Batch of edit requests
    fn requests(&mut self, requests: &[Request]) -> Result<()>;

    /// Finalize output
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable text
    Text,
    /// JSON
    Json,
}

/// Formatter for `format` writing to `writer`
pub fn formatter<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
    pretty_json: bool,
) -> Box<dyn OutputFormatter + 'w> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
    }
}
