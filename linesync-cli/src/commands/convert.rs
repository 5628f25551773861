//! Import and export between plain text and documents

use super::Context;
use crate::error::CliError;
use anyhow::{Context as _, Result};
use clap::Args;
use linesync_engine::Document;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments for the import command
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Plain text file, one paragraph per line
    #[arg(value_name = "TEXT")]
    pub input: PathBuf,

    /// Document file to create
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Document id, defaults to the output file name
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

impl ImportArgs {
    /// Execute the import command
    pub fn execute(&self, context: &Context) -> Result<()> {
        if self.output.exists() && !self.force {
            return Err(CliError::OutputExists(self.output.display().to_string()).into());
        }

        let text = fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read file: {}", self.input.display()))?;
        let id = self.id.clone().unwrap_or_else(|| {
            self.output
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        let document = Document::from_plain_text(id, &text);
        context.store.save(&self.output, &document)?;

        println!(
            "✓ Imported {} paragraphs into {}",
            document.body.content.len(),
            self.output.display()
        );
        Ok(())
    }
}

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Document to export (path, id or document URL)
    #[arg(value_name = "DOCUMENT")]
    pub document: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, context: &Context) -> Result<()> {
        let (_, document) = context.store.load(&self.document)?;
        let text = plain_text(&document);

        match &self.output {
            Some(path) => fs::write(path, text)
                .with_context(|| format!("Failed to write file: {}", path.display()))?,
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

/// Concatenated paragraph text of `document`
pub fn plain_text(document: &Document) -> String {
    document
        .paragraphs()
        .map(|(_, paragraph)| paragraph.text())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_import_then_export_text() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("sermon.txt");
        let output = temp_dir.path().join("sermon.json");
        fs::write(&input, "Heritage\n遗产\n").unwrap();

        let context = Context::new(CliConfig::default(), true);
        ImportArgs {
            input,
            output: output.clone(),
            id: None,
            force: false,
        }
        .execute(&context)
        .unwrap();

        let (_, document) = context.store.load(output.to_str().unwrap()).unwrap();
        assert_eq!(document.document_id, "sermon");
        assert_eq!(plain_text(&document), "Heritage\n遗产\n");
    }

    #[test]
    fn test_import_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.txt");
        let output = temp_dir.path().join("out.json");
        fs::write(&input, "Line").unwrap();
        fs::write(&output, "{}").unwrap();

        let context = Context::new(CliConfig::default(), true);
        let error = ImportArgs {
            input,
            output,
            id: None,
            force: false,
        }
        .execute(&context)
        .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::OutputExists(_))
        ));
    }
}
