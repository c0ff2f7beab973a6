//! # Generator Orchestrator
//!
//! The `Generator` runs the block generators over a [`ScriptBuffer`] in a
//! fixed order and reports what was added.
//!
//! ## Pipeline
//!
//! ```text
//! RevisionSpec + SpliceConfig
//!         │
//!         ▼
//!   ScriptBuffer::load()
//!         │
//!         ├──► add_imports()        → import line
//!         ├──► add_tables()         → upgrade / downgrade table blocks
//!         ├──► add_foreign_keys()   → upgrade / downgrade foreign key blocks
//!         │
//!         ▼
//!   ScriptBuffer::flush()  (once, only if every step succeeded)
//! ```

use crate::blocks::{add_foreign_keys, add_imports, add_tables};
use crate::script::ScriptBuffer;
use crate::SpliceConfig;
use splice_core::SpliceResult;
use splice_ir::RevisionSpec;
use std::path::{Path, PathBuf};

// ============================================================================
// GenerationSummary
// ============================================================================

/// What one run added to a revision script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Script that was annotated
    pub script: PathBuf,

    /// Whether the import block was inserted
    pub imports_added: bool,

    /// Tables emitted
    pub tables: usize,

    /// Columns emitted
    pub columns: usize,

    /// Primary keys emitted
    pub primary_keys: usize,

    /// Check constraints emitted
    pub check_constraints: usize,

    /// Foreign keys emitted
    pub foreign_keys: usize,

    /// Non-fatal problems found while generating
    pub warnings: Vec<String>,
}

impl GenerationSummary {
    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Runs the import, table and foreign key generators
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: SpliceConfig,
}

impl Generator {
    /// Create a new generator with the given configuration.
    pub fn new(config: SpliceConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SpliceConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &SpliceConfig {
        &self.config
    }

    /// Annotate a script buffer in memory.
    ///
    /// # Steps
    ///
    /// 1. **Imports** after the import anchor (unless disabled).
    /// 2. **Tables** after the upgrade and downgrade anchors.
    /// 3. **Foreign keys** after the same anchors (unless disabled or none
    ///    are declared).
    ///
    /// # Errors
    ///
    /// The first missing anchor or out-of-range insertion stops the run.
    /// The buffer may then hold a partial edit; callers must not flush it.
    pub fn generate(
        &self,
        spec: &RevisionSpec,
        buffer: &mut ScriptBuffer,
    ) -> SpliceResult<GenerationSummary> {
        let mut summary = GenerationSummary {
            script: buffer.path().to_path_buf(),
            ..Default::default()
        };

        // ── 1. Imports ───────────────────────────────────────────────────
        if !self.config.skip_imports {
            add_imports(buffer, spec, &self.config)?;
            summary.imports_added = true;
        }

        // ── 2. Tables ────────────────────────────────────────────────────
        let report = add_tables(buffer, spec, &self.config)?;
        summary.tables = report.tables;
        summary.columns = report.columns;
        summary.primary_keys = report.primary_keys;
        summary.check_constraints = report.check_constraints;
        summary.warnings.extend(report.warnings);

        // ── 3. Foreign keys ──────────────────────────────────────────────
        if !self.config.skip_foreign_keys {
            summary.foreign_keys = add_foreign_keys(buffer, spec, &self.config)?;
        } else if spec.foreign_key_count() > 0 {
            summary.warnings.push(format!(
                "{} foreign key(s) declared but foreign key generation is disabled",
                spec.foreign_key_count()
            ));
        }

        Ok(summary)
    }

    /// Load a script, annotate it, and write it back once.
    ///
    /// Nothing is written if any generator fails.
    pub fn apply_to_file(
        &self,
        spec: &RevisionSpec,
        path: impl AsRef<Path>,
    ) -> SpliceResult<GenerationSummary> {
        let mut buffer = ScriptBuffer::load(path)?;
        let summary = self.generate(spec, &mut buffer)?;
        buffer.flush()?;
        tracing::info!(
            script = %summary.script.display(),
            tables = summary.tables,
            foreign_keys = summary.foreign_keys,
            "Revision script annotated"
        );
        Ok(summary)
    }
}

// ============================================================================
// Tests
// ============================================================================
