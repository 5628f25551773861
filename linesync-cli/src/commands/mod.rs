//! CLI command implementations

use crate::config::CliConfig;
use crate::store::DocumentStore;
use anyhow::Result;
use clap::{Parser, Subcommand};
use linesync_engine::MaintenancePass;
use std::path::PathBuf;

pub mod analyze;
pub mod convert;
pub mod generate_config;
pub mod maintenance;
pub mod sync;

/// Keep a bilingual document's formatting in sync with its source
#[derive(Debug, Parser)]
#[command(name = "linesync", version, about, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file
    #[arg(short, long, global = true, value_name = "FILE", env = "LINESYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output and logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Copy formatting from a source document onto a bilingual target
    Sync(sync::SyncArgs),

    /// Show the formatting of each line of a document
    Analyze(analyze::AnalyzeArgs),

    /// Add an empty line after every line starting with Chinese characters
    AddSpacing(maintenance::MaintenanceArgs),

    /// Turn lines starting with '·' into checkbox bullets
    Bullets(maintenance::MaintenanceArgs),

    /// Center every paragraph
    Center(maintenance::MaintenanceArgs),

    /// Insert a tab at the start of every non-blank line
    Indent(maintenance::MaintenanceArgs),

    /// Create a document from a plain text file
    Import(convert::ImportArgs),

    /// Write the text of a document as plain text
    Export(convert::ExportArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration
    pub config: CliConfig,
    /// Document store built from the configuration
    pub store: DocumentStore,
    /// Suppress progress output
    pub quiet: bool,
}

impl Context {
    /// Context for `config`
    pub fn new(config: CliConfig, quiet: bool) -> Self {
        let store = DocumentStore::new(config.store.directory.clone(), config.output.pretty_json);
        Self {
            config,
            store,
            quiet,
        }
    }
}

impl Cli {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::debug!("Arguments: {:?}", self);

        if let Commands::GenerateConfig(args) = &self.command {
            return args.execute();
        }

        let config = CliConfig::load(self.config.as_deref())?;
        let context = Context::new(config, self.quiet);

        match &self.command {
            Commands::Sync(args) => args.execute(&context),
            Commands::Analyze(args) => args.execute(&context),
            Commands::AddSpacing(args) => args.execute(&context, MaintenancePass::AddSpacing),
            Commands::Bullets(args) => args.execute(&context, MaintenancePass::Bullets),
            Commands::Center(args) => args.execute(&context, MaintenancePass::Center),
            Commands::Indent(args) => args.execute(&context, MaintenancePass::Indent),
            Commands::Import(args) => args.execute(&context),
            Commands::Export(args) => args.execute(&context),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        // A logger may already be installed when commands run in-process
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .format_timestamp(None)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sync_command() {
        let cli = Cli::try_parse_from([
            "linesync",
            "-vv",
            "sync",
            "source.json",
            "target.json",
            "--start-loop",
            "12",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Sync(args) => {
                assert_eq!(args.source, "source.json");
                assert_eq!(args.target, "target.json");
                assert_eq!(args.start_loop, Some(12));
                assert!(args.dry_run);
                assert!(!args.no_tabs);
            }
            other => panic!("expected sync, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["linesync", "analyze", "doc.json", "-q", "-c", "cfg.toml"])
            .unwrap();

        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("cfg.toml")));
        assert!(matches!(cli.command, Commands::Analyze(_)));
    }

    #[test]
    fn test_maintenance_commands_share_args() {
        for name in ["add-spacing", "bullets", "center", "indent"] {
            let cli = Cli::try_parse_from(["linesync", name, "doc.json", "-o", "out.json"]).unwrap();
            let args = match cli.command {
                Commands::AddSpacing(args)
                | Commands::Bullets(args)
                | Commands::Center(args)
                | Commands::Indent(args) => args,
                other => panic!("unexpected command {other:?}"),
            };
            assert_eq!(args.output, Some(PathBuf::from("out.json")));
        }
    }

    #[test]
    fn test_sync_requires_two_documents() {
        assert!(Cli::try_parse_from(["linesync", "sync", "only-one.json"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
