//! Maintenance command implementations
//!
//! `add-spacing`, `bullets`, `center` and `indent` share their arguments and
//! differ only in the pass they run.

use super::Context;
use crate::output::{formatter, OutputFormat};
use anyhow::{Context as _, Result};
use clap::Args;
use linesync_engine::{DocumentEditor, MaintenancePass};
use std::io;
use std::path::PathBuf;

/// Arguments shared by the maintenance commands
#[derive(Debug, Args)]
pub struct MaintenanceArgs {
    /// Document to edit (path, id or document URL)
    #[arg(value_name = "DOCUMENT")]
    pub document: String,

    /// Write the result here instead of overwriting the document
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the edit requests without changing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --dry-run
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl MaintenanceArgs {
    /// Run `pass` over the document
    pub fn execute(&self, context: &Context, pass: MaintenancePass) -> Result<()> {
        let (path, document) = context.store.load(&self.document)?;
        let requests = pass.requests(&document);
        log::info!(
            "{}: {} requests for '{}'",
            pass.name(),
            requests.len(),
            document.document_id
        );

        if self.dry_run {
            let stdout = io::stdout();
            let mut out = formatter(self.format, stdout.lock(), context.config.output.pretty_json);
            out.requests(&requests)?;
            return out.finish();
        }

        if requests.is_empty() {
            println!("Nothing to do for {}.", pass.name());
            return Ok(());
        }

        let mut editor = DocumentEditor::new(document);
        let applied = editor
            .apply_all(&requests)
            .with_context(|| format!("Failed to apply {} edits", pass.name()))?;

        let output = self.output.as_deref().unwrap_or(&path);
        context.store.save(output, editor.document())?;

        println!("✓ {}: applied {applied} edits to {}", pass.name(), output.display());
        Ok(())
    }
}
