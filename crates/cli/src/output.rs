//! Terminal output for a finished run

use colored::Colorize;
use splice_codegen::GenerationSummary;
use std::fmt::Write;

/// Turn off ANSI colors for everything rendered afterwards
pub fn disable_color() {
    colored::control::set_override(false);
}

/// Render the run summary shown on stdout
pub fn format_summary(summary: &GenerationSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        "Annotated".green().bold(),
        summary.script.display()
    );

    if summary.imports_added {
        let _ = writeln!(out, "  {:<18} added", "imports");
    }
    let _ = writeln!(out, "  {:<18} {}", "tables", summary.tables);
    let _ = writeln!(out, "  {:<18} {}", "columns", summary.columns);
    let _ = writeln!(out, "  {:<18} {}", "primary keys", summary.primary_keys);
    let _ = writeln!(out, "  {:<18} {}", "check constraints", summary.check_constraints);
    let _ = writeln!(out, "  {:<18} {}", "foreign keys", summary.foreign_keys);

    for warning in &summary.warnings {
        let _ = writeln!(out, "{} {}", "warning:".yellow().bold(), warning);
    }

    out
}

/// Render a fatal error for stderr
pub fn format_error(err: &anyhow::Error) -> String {
    let mut out = format!("{} {}", "error:".red().bold(), err);
    for cause in err.chain().skip(1) {
        let _ = write!(out, "\n  caused by: {}", cause);
    }
    out
}
