mod cli;
mod error;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let context = cli.context()?;

    let report = tradeconv_pipeline::run_context(&context)?;
    if report.has_problems() {
        warn!(
            unrecognized = report.files_unrecognized,
            failed = report.files_failed,
            write_failures = report.write_failures,
            "some inputs or outputs were skipped"
        );
    }
    Ok(())
}
