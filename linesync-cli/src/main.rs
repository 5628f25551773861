//! linesync command-line entry point

use clap::Parser;
use linesync_cli::Cli;
use linesync_engine::EngineError;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            // Drift between the documents is reported apart from other failures
            match error.downcast_ref::<EngineError>() {
                Some(EngineError::Mismatch(_)) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
