//! Sync command implementation

use super::Context;
use crate::output::{formatter, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context as _, Result};
use clap::Args;
use linesync_engine::{
    Document, DocumentCursor, DocumentEditor, EngineError, FormatSink, RecordingSink, SinkError,
    StyleSnapshot, SyncOptions, SyncReport, Synchronizer, TextRange,
};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Arguments for the sync command
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Monolingual source document (path, id or document URL)
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Bilingual target document (path, id or document URL)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Resume at this loop; earlier loops are replayed without edits
    #[arg(long, value_name = "N")]
    pub start_loop: Option<usize>,

    /// Write the edited target here instead of overwriting it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the edit requests without changing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the leading tab insertion pass
    #[arg(long)]
    pub no_tabs: bool,

    /// Save every edit request to this file as JSON
    #[arg(long, value_name = "FILE")]
    pub requests: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Applies edits to the document and keeps a copy of every successful request
struct JournalSink<'a> {
    editor: &'a mut DocumentEditor,
    journal: &'a mut RecordingSink,
}

impl FormatSink for JournalSink<'_> {
    fn apply_style(
        &mut self,
        range: TextRange,
        snapshot: &StyleSnapshot,
    ) -> Result<(), SinkError> {
        self.editor.apply_style(range, snapshot)?;
        self.journal.apply_style(range, snapshot)
    }

    fn insert_text(&mut self, index: i64, text: &str) -> Result<(), SinkError> {
        self.editor.insert_text(index, text)?;
        self.journal.insert_text(index, text)
    }
}

fn run<K: FormatSink>(
    sink: K,
    source: &Document,
    target: &Document,
    options: SyncOptions,
) -> linesync_engine::Result<SyncReport> {
    Synchronizer::new(sink, options).run(
        &mut DocumentCursor::new(source),
        &mut DocumentCursor::new(target),
    )
}

impl SyncArgs {
    /// Options after merging flags over configuration
    pub fn options(&self, context: &Context) -> SyncOptions {
        SyncOptions::default()
            .with_start_loop(self.start_loop.unwrap_or(context.config.sync.start_loop))
            .with_insert_tabs(context.config.sync.insert_tabs && !self.no_tabs)
    }

    /// Execute the sync command
    pub fn execute(&self, context: &Context) -> Result<()> {
        let (_, source) = context
            .store
            .load(&self.source)
            .context("Failed to load source document")?;
        let (target_path, target) = context
            .store
            .load(&self.target)
            .context("Failed to load target document")?;

        let options = self.options(context);
        log::info!(
            "Synchronizing '{}' onto '{}' from loop {}",
            source.document_id,
            target.document_id,
            options.start_loop
        );

        let mut progress = ProgressReporter::new(context.quiet);
        progress.start(&format!(
            "Synchronizing {} -> {}",
            source.document_id, target.document_id
        ));

        let mut journal = RecordingSink::new();
        let (outcome, edited) = if self.dry_run {
            (run(&mut journal, &source, &target, options), None)
        } else {
            let mut editor = DocumentEditor::new(target.clone());
            let sink = JournalSink {
                editor: &mut editor,
                journal: &mut journal,
            };
            let outcome = run(sink, &source, &target, options);
            (outcome, Some(editor.into_document()))
        };

        if let Some(path) = &self.requests {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "requests": journal.requests()
            }))?;
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write requests: {}", path.display()))?;
        }

        let output_path = self.output.as_deref().unwrap_or(&target_path);
        let report = match outcome {
            Ok(report) => {
                progress.finish("Synchronization complete");
                report
            }
            Err(error) => {
                progress.abandon();
                if let (EngineError::Mismatch(mismatch), Some(document)) = (&error, &edited) {
                    context.store.save(output_path, document)?;
                    log::warn!(
                        "Edits made before the mismatch were saved to {}; fix the target and \
                         resume with --start-loop {}",
                        output_path.display(),
                        mismatch.target_line
                    );
                }
                return Err(anyhow::Error::new(error).context("Synchronization failed"));
            }
        };

        if let Some(document) = &edited {
            context.store.save(output_path, document)?;
        }

        let stdout = io::stdout();
        let mut out = formatter(self.format, stdout.lock(), context.config.output.pretty_json);
        if self.dry_run {
            out.requests(journal.requests())?;
        } else {
            out.sync_report(&report)?;
        }
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;

    fn args(start_loop: Option<usize>, no_tabs: bool) -> SyncArgs {
        SyncArgs {
            source: "source.json".to_string(),
            target: "target.json".to_string(),
            start_loop,
            output: None,
            dry_run: false,
            no_tabs,
            requests: None,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_options_from_config() {
        let mut config = CliConfig::default();
        config.sync.start_loop = 7;
        config.sync.insert_tabs = true;
        let context = Context::new(config, true);

        let options = args(None, false).options(&context);
        assert_eq!(options.start_loop, 7);
        assert!(options.insert_tabs);
    }

    #[test]
    fn test_flags_override_config() {
        let context = Context::new(CliConfig::default(), true);

        let options = args(Some(3), true).options(&context);
        assert_eq!(options.start_loop, 3);
        assert!(!options.insert_tabs);
    }

    #[test]
    fn test_journal_records_only_successful_edits() {
        let mut editor = DocumentEditor::new(Document::from_plain_text("doc", "Line"));
        let mut journal = RecordingSink::new();
        let mut sink = JournalSink {
            editor: &mut editor,
            journal: &mut journal,
        };

        sink.insert_text(1, "\t").unwrap();
        assert!(sink.insert_text(99, "\t").is_err());

        assert_eq!(journal.requests().len(), 1);
        assert_eq!(editor.applied(), 1);
    }
}
