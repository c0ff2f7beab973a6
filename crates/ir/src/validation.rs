//! Pre-flight checks for revision descriptions
//!
//! [`check_revision`] runs before the revision tool is invoked, so a bad
//! description never leaves an empty revision script behind. Hard errors
//! come from [`Validatable`]; everything else is a warning.

use crate::revision::RevisionSpec;
use splice_core::{SpliceError, SpliceResult, Validatable};

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of checking a revision description
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the check passed
    pub valid: bool,

    /// List of errors (empty if valid)
    pub errors: Vec<ValidationIssue>,

    /// List of warnings (non-fatal issues)
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: ValidationIssue) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: ValidationIssue) {
        self.warnings.push(warning);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert to SpliceResult (fails if any errors)
    pub fn to_result(self) -> SpliceResult<()> {
        if self.valid {
            Ok(())
        } else {
            let msg = self
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            Err(SpliceError::validation(msg))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// ValidationIssue
// ============================================================================

/// A single error or warning, with the YAML path it concerns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path to the problematic element (e.g., "tables.users.primary_key")
    pub path: Option<String>,

    /// Human-readable message
    pub message: String,
}

impl ValidationIssue {
    /// Create a new issue
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
        }
    }

    /// Add a path to the issue
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path, self.message),
            None => f.write_str(&self.message),
        }
    }
}

// ============================================================================
// Checks
// ============================================================================

/// Check a revision description before anything is generated
pub fn check_revision(spec: &RevisionSpec) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if let Err(e) = spec.validate() {
        result.add_error(ValidationIssue::new(e.to_string()));
    }

    if spec.table_count() == 0 && spec.foreign_key_count() == 0 {
        result.add_warning(ValidationIssue::new(
            "No tables or foreign keys declared; only the import line will be added",
        ));
    }

    for table in spec.tables() {
        if let Some(pk) = &table.primary_key {
            for column in pk.columns.names() {
                if !table.columns.contains_key(column) {
                    result.add_warning(
                        ValidationIssue::new(format!(
                            "Primary key column '{}' is not declared on table '{}'",
                            column, table.name
                        ))
                        .with_path(format!("tables.{}.primary_key", table.name)),
                    );
                }
            }
        }
    }

    // Foreign keys land directly under `def upgrade():`, above the tables.
    if spec.table_count() > 0 && spec.foreign_key_count() > 0 {
        result.add_warning(
            ValidationIssue::new(
                "Foreign keys are inserted above the table blocks in upgrade(); \
                 create tables and foreign keys in separate revisions",
            )
            .with_path("foreign_keys"),
        );
    }

    for fk in spec.foreign_keys() {
        if fk.local_cols.len() != fk.remote_cols.len() {
            result.add_warning(
                ValidationIssue::new(format!(
                    "local_cols has {} columns but remote_cols has {}",
                    fk.local_cols.len(),
                    fk.remote_cols.len()
                ))
                .with_path(format!("foreign_keys.{}", fk.name)),
            );
        }
    }

    result
}

// ============================================================================
// Tests
// ============================================================================
