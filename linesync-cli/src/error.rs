//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Document file missing for a reference
    DocumentNotFound(String),
    /// Reference is neither a path, a bare id nor a document URL
    InvalidReference(String),
    /// Configuration error
    ConfigError(String),
    /// Output file exists and overwriting was not requested
    OutputExists(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::DocumentNotFound(path) => write!(f, "Document not found: {path}"),
            CliError::InvalidReference(reference) => {
                write!(f, "Invalid document reference: {reference}")
            }
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::OutputExists(path) => {
                write!(f, "Output file already exists: {path} (use --force to overwrite)")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
