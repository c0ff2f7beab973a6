//! alembic-splice
//!
//! Creates an Alembic revision and fills it with the tables and foreign keys
//! described in a YAML file.

use clap::Parser;
use splice_cli::Cli;
use splice_cli::output::{disable_color, format_error, format_summary};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.no_color {
        disable_color();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let summary = splice_cli::run(cli)?;
    print!("{}", format_summary(&summary));
    Ok(())
}
