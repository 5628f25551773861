//! Generate config command implementation

use crate::error::CliError;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            return Err(CliError::OutputExists(self.output.display().to_string()).into());
        }

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, Self::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to set your defaults");
        println!("2. Use it for syncing:");
        println!(
            "   linesync --config {} sync source.json target.json",
            self.output.display()
        );

        Ok(())
    }

    /// Template configuration content
    pub fn template() -> &'static str {
        r#"# linesync configuration

[sync]
# First loop whose edits are applied. Earlier loops are replayed without
# edits, which resumes a run that stopped on a mismatch.
start_loop = 1

# Insert the leading tabs of source lines once the walk has finished
insert_tabs = true

[analyze]
# Number of lines reported by `linesync analyze`
max_lines = 100

[output]
# Pretty print JSON documents and reports
pretty_json = true

[store]
# Directory holding <id>.json documents for bare ids and document URLs.
# Defaults to the working directory.
# directory = "documents"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = CliConfig::from_toml(GenerateConfigArgs::template()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_execute_writes_template() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("linesync.toml");

        let args = GenerateConfigArgs {
            output: output.clone(),
            force: false,
        };
        args.execute().unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("[sync]"));
        assert!(content.contains("start_loop = 1"));
    }

    #[test]
    fn test_execute_refuses_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("linesync.toml");
        fs::write(&output, "# mine").unwrap();

        let args = GenerateConfigArgs {
            output: output.clone(),
            force: false,
        };
        assert!(args.execute().is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "# mine");

        let args = GenerateConfigArgs {
            output: output.clone(),
            force: true,
        };
        args.execute().unwrap();
        assert!(fs::read_to_string(&output).unwrap().contains("[analyze]"));
    }

    #[test]
    fn test_execute_invalid_directory() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("/nonexistent/dir/linesync.toml"),
            force: false,
        };
        let error = args.execute().unwrap_err();
        assert!(error.to_string().contains("Failed to write to"));
    }
}
