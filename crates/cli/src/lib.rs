//! # Splice CLI
//!
//! Command-line pipeline for alembic-splice.
//!
//! ```text
//! alembic-splice [OPTIONS] <ALEMBIC_DIR> <REVISION_FILE>
//! ```
//!
//! 1. Load and check the YAML revision description
//! 2. Run `alembic revision -m <message>` inside `ALEMBIC_DIR`
//! 3. Splice imports, tables and foreign keys into the new script
//! 4. Write the script once and print a summary
//!
//! Re-running against an already annotated script duplicates every block;
//! always start from a fresh revision.
//!

pub mod output;
pub mod revision;

// Re-export dependencies for use in main.rs
pub use splice_codegen;
pub use splice_core;
pub use splice_ir;

pub use revision::{DEFAULT_ALEMBIC_BIN, GeneratingOutput, RevisionInvoker, parse_generating_output};

use anyhow::Context;
use clap::{ArgAction, Parser};
use splice_codegen::{GenerationSummary, Generator, SpliceConfig};
use splice_ir::{check_revision, is_revision_file, load_revision};
use std::path::PathBuf;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

/// Create an Alembic revision and fill it from a YAML description
#[derive(Parser, Debug, Clone)]
#[command(name = "alembic-splice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing alembic.ini
    #[arg(value_name = "ALEMBIC_DIR")]
    pub alembic_dir: PathBuf,

    /// YAML file describing the tables and foreign keys
    #[arg(value_name = "REVISION_FILE")]
    pub revision_file: PathBuf,

    /// Executable used to create the revision
    #[arg(long, env = "ALEMBIC_BIN", default_value = DEFAULT_ALEMBIC_BIN, value_name = "PATH")]
    pub alembic_bin: String,

    /// Increase log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Default log filter for the verbosity flag
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Run the whole pipeline
///
/// The revision description is loaded and checked before the revision tool
/// runs, so a bad description never leaves an empty script behind. The
/// script is written once, after every block has been generated.
pub fn run(cli: &Cli) -> anyhow::Result<GenerationSummary> {
    run_with_config(cli, SpliceConfig::default())
}

/// Run the pipeline with explicit generator configuration
pub fn run_with_config(cli: &Cli, config: SpliceConfig) -> anyhow::Result<GenerationSummary> {
    if !is_revision_file(&cli.revision_file) {
        tracing::warn!(
            path = %cli.revision_file.display(),
            "Revision file does not have a .yaml or .yml extension"
        );
    }

    // ── 1. Load and check ────────────────────────────────────────────────
    let spec = load_revision(&cli.revision_file)
        .with_context(|| format!("Loading {}", cli.revision_file.display()))?;

    let check = check_revision(&spec);
    for warning in &check.warnings {
        tracing::warn!("{}", warning);
    }
    let preflight_warnings: Vec<String> = check.warnings.iter().map(ToString::to_string).collect();
    check
        .to_result()
        .with_context(|| format!("Checking {}", cli.revision_file.display()))?;

    // ── 2. Create the revision ───────────────────────────────────────────
    let invoker = RevisionInvoker::new(&cli.alembic_bin, &cli.alembic_dir);
    let script = invoker
        .create_revision(&spec.revision_message)
        .context("Creating revision")?;

    // ── 3. Annotate ──────────────────────────────────────────────────────
    let mut summary = Generator::new(config)
        .apply_to_file(&spec, &script)
        .with_context(|| format!("Annotating {}", script.display()))?;

    let mut warnings = preflight_warnings;
    warnings.append(&mut summary.warnings);
    summary.warnings = warnings;

    Ok(summary)
}

// ============================================================================
// Tests
// ============================================================================
