//! linesync CLI library
//!
//! Command-line interface for keeping the formatting of a bilingual document
//! in sync with its monolingual source.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod store;

pub use commands::Cli;
pub use error::{CliError, CliResult};
