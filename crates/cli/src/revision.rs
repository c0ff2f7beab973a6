//! # Revision Invoker
//!
//! Runs `alembic revision -m <message>` in the Alembic directory and works
//! out which script it generated. Alembic announces the new file on one
//! stdout line:
//!
//! ```text
//!   Generating /srv/app/alembic/versions/1a2b3c4d5e6f_create_users.py ...  done
//! ```
//!
//! The output is parsed into a [`GeneratingOutput`]; anything other than a
//! single well-formed `Generating` line is an error.

use regex::Regex;
use splice_core::{SpliceError, SpliceResult};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

/// Default executable for the revision call
pub const DEFAULT_ALEMBIC_BIN: &str = "alembic";

const GENERATING_KEYWORD: &str = "Generating";

static GENERATING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Generating\s+(?P<path>\S.*?)\s*\.\.\.(?:\s*done)?\s*$")
        .expect("Generating pattern is a valid regex")
});

// ============================================================================
// Output parsing
// ============================================================================

/// What the revision tool's stdout says about the generated script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratingOutput {
    /// Exactly one well-formed `Generating <path> ...` line
    Found(PathBuf),

    /// No line mentions `Generating`
    NotFound,

    /// A `Generating` line that does not parse, or more than one
    Malformed(String),
}

impl GeneratingOutput {
    /// Turn anything but `Found` into an error
    pub fn into_path(self) -> SpliceResult<PathBuf> {
        match self {
            GeneratingOutput::Found(path) => Ok(path),
            GeneratingOutput::NotFound => Err(SpliceError::RevisionOutput(
                "no 'Generating' line in revision tool output".to_string(),
            )),
            GeneratingOutput::Malformed(reason) => Err(SpliceError::RevisionOutput(reason)),
        }
    }
}

/// Parse the revision tool's stdout
pub fn parse_generating_output(stdout: &str) -> GeneratingOutput {
    let candidates: Vec<&str> = stdout
        .lines()
        .filter(|line| line.contains(GENERATING_KEYWORD))
        .collect();

    match candidates.as_slice() {
        [] => GeneratingOutput::NotFound,
        [line] => match GENERATING_LINE.captures(line) {
            Some(caps) => GeneratingOutput::Found(PathBuf::from(&caps["path"])),
            None => GeneratingOutput::Malformed(format!(
                "could not read a script path from '{}'",
                line.trim()
            )),
        },
        lines => GeneratingOutput::Malformed(format!(
            "expected one 'Generating' line, found {}",
            lines.len()
        )),
    }
}

// ============================================================================
// RevisionInvoker
// ============================================================================

/// Creates empty revision scripts with the external tool
#[derive(Debug, Clone)]
pub struct RevisionInvoker {
    /// Executable to run
    program: String,

    /// Directory containing `alembic.ini`
    alembic_dir: PathBuf,
}

impl RevisionInvoker {
    /// Create an invoker for `program`, run inside `alembic_dir`
    pub fn new(program: impl Into<String>, alembic_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            alembic_dir: alembic_dir.into(),
        }
    }

    /// The executable
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The working directory for the call
    pub fn alembic_dir(&self) -> &Path {
        &self.alembic_dir
    }

    /// Run `<program> revision -m <message>` and return the script path
    ///
    /// Relative paths in the tool's output are resolved against the Alembic
    /// directory.
    pub fn create_revision(&self, message: &str) -> SpliceResult<PathBuf> {
        tracing::info!(
            program = %self.program,
            dir = %self.alembic_dir.display(),
            "Creating revision"
        );

        let output = Command::new(&self.program)
            .args(["revision", "-m", message])
            .current_dir(&self.alembic_dir)
            .output()
            .map_err(|e| SpliceError::tool_failed(&self.program, format!("could not start: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        for line in stdout.lines() {
            tracing::debug!(target: "alembic", "{}", line);
        }
        for line in stderr.lines().filter(|line| !line.trim().is_empty()) {
            tracing::warn!(target: "alembic", "{}", line);
        }

        if !output.status.success() {
            let detail = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("no error output");
            return Err(SpliceError::tool_failed(
                &self.program,
                format!("{} ({})", output.status, detail.trim()),
            ));
        }

        let path = parse_generating_output(&stdout).into_path()?;
        let path = if path.is_relative() {
            self.alembic_dir.join(path)
        } else {
            path
        };

        tracing::info!(script = %path.display(), "Revision script generated");
        Ok(path)
    }
}

// ============================================================================
// Tests
// ============================================================================
