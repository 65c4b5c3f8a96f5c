//! colframe - command-line front end for the colframe table engine
//!
//! Loads CSV files into in-memory tables, runs one table operation per
//! invocation and prints the result to stdout.
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments
//! 2. Build the application configuration
//! 3. Initialize logging (stderr; `-v` or `RUST_LOG` raise the level)
//! 4. Load the input files and run the requested operation
//! 5. Print the result

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use colframe::cli;
use colframe::commands::CommandRunner;
use colframe::config::AppConfig;

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence; otherwise verbose mode logs at debug level
/// and normal mode only reports warnings.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn main() -> Result<()> {
    let args = cli::parse_args();

    let config = AppConfig::from_args(&args).context("Invalid command-line options")?;
    init_logging(config.verbose());
    debug!(?args, "parsed arguments");

    let runner = CommandRunner::new(&config);
    let stdout = std::io::stdout();
    runner
        .execute(&args.command, stdout.lock())
        .with_context(|| format!("Failed to run {:?}", args.command))?;

    Ok(())
}
