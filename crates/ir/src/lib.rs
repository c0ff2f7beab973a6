//! # Splice IR
//!
//! Typed form of the YAML revision description consumed by alembic-splice.
//!
//! ## Core Concepts
//!
//! - **RevisionSpec**: the root document (message, imports, tables, foreign keys)
//! - **TableDef**: a table with its columns, primary key and check constraints
//! - **ForeignKeyDef**: a foreign key, checked for completeness on load
//!
//! All mappings keep their declaration order, so the generated script is
//! deterministic.
//!

// Module declarations
pub mod foreign_key;
pub mod revision;
pub mod serialization;
pub mod table;
pub mod validation;

// Re-export commonly used types at crate root
pub use foreign_key::{ForeignKeyDef, REQUIRED_FIELDS, RawForeignKey};
pub use revision::{RawRevisionSpec, RevisionSpec};
pub use serialization::{is_revision_file, load_revision, load_revision_from_str};
pub use table::{CheckConstraintDef, ColumnDef, PrimaryKeyDef, TableDef};
pub use validation::{ValidationIssue, ValidationResult, check_revision};

// Re-export core types that are commonly used with IR
pub use splice_core::{ColumnList, SpliceError, SpliceResult, Validatable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
