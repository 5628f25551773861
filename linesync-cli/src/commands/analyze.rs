//! Analyze command implementation

use super::Context;
use crate::output::{formatter, OutputFormat};
use anyhow::Result;
use clap::Args;
use linesync_engine::inspect;
use std::io;

/// Arguments for the analyze command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Document to inspect (path, id or document URL)
    #[arg(value_name = "DOCUMENT")]
    pub document: String,

    /// Number of lines to report
    #[arg(short = 'n', long, value_name = "N")]
    pub max_lines: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub fn execute(&self, context: &Context) -> Result<()> {
        let (_, document) = context.store.load(&self.document)?;
        let max_lines = self.max_lines.unwrap_or(context.config.analyze.max_lines);

        let lines = inspect(&document, max_lines);
        log::info!(
            "Reporting {} lines of '{}'",
            lines.len(),
            document.document_id
        );

        let stdout = io::stdout();
        let mut out = formatter(self.format, stdout.lock(), context.config.output.pretty_json);
        out.line_reports(&lines)?;
        out.finish()
    }
}
