//! File-backed document store
//!
//! Documents live as JSON exports on disk. A reference on the command line
//! may be a path to such a file, a bare document id, or a document URL
//! containing `/document/d/<id>`; ids are resolved to `<id>.json` inside the
//! store directory.

use crate::error::CliError;
use anyhow::{Context, Result};
use linesync_engine::Document;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn url_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"/document/d/([a-zA-Z0-9_-]+)").ok())
        .as_ref()
}

fn is_bare_id(reference: &str) -> bool {
    !reference.is_empty()
        && reference
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

/// Document id embedded in a URL
pub fn extract_document_id(url: &str) -> Option<&str> {
    url_pattern()?
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// Loads and saves documents
#[derive(Debug, Clone)]
pub struct DocumentStore {
    directory: PathBuf,
    pretty: bool,
}

impl DocumentStore {
    /// Store rooted at `directory`, or the working directory
    pub fn new(directory: Option<PathBuf>, pretty: bool) -> Self {
        Self {
            directory: directory.unwrap_or_else(|| PathBuf::from(".")),
            pretty,
        }
    }

    /// File backing `reference`
    pub fn resolve(&self, reference: &str) -> Result<PathBuf, CliError> {
        if let Some(id) = extract_document_id(reference) {
            return Ok(self.directory.join(format!("{id}.json")));
        }
        if reference.contains("://") {
            return Err(CliError::InvalidReference(reference.to_string()));
        }

        let path = Path::new(reference);
        if path.exists() || path.extension().is_some() || path.components().count() > 1 {
            return Ok(path.to_path_buf());
        }
        if is_bare_id(reference) {
            return Ok(self.directory.join(format!("{reference}.json")));
        }
        Err(CliError::InvalidReference(reference.to_string()))
    }

    /// Load the document behind `reference`
    pub fn load(&self, reference: &str) -> Result<(PathBuf, Document)> {
        let path = self.resolve(reference)?;
        if !path.is_file() {
            return Err(CliError::DocumentNotFound(path.display().to_string()).into());
        }

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?;
        let mut document = Document::from_json(&json)
            .with_context(|| format!("Malformed document: {}", path.display()))?;

        if document.document_id.is_empty() {
            document.document_id = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        log::info!(
            "Loaded document '{}' from {} ({} elements)",
            document.document_id,
            path.display(),
            document.body.content.len()
        );
        Ok((path, document))
    }

    /// Write `document` to `path`
    pub fn save(&self, path: &Path, document: &Document) -> Result<()> {
        let json = document.to_json(self.pretty)?;
        fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write document: {}", path.display()))?;
        log::info!("Saved document '{}' to {}", document.document_id, path.display());
        Ok(())
    }
}
