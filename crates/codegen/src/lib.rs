//! # Splice Codegen
//!
//! Script editing and code generation for alembic-splice.
//!
//! This crate takes a loaded [`RevisionSpec`](splice_ir::RevisionSpec) and
//! splices Python into an Alembic revision script held in a
//! [`ScriptBuffer`].
//!
//! ## Features
//!
//! - **Line Locator**: first-match anchor search over the script lines
//! - **Statement Builder**: one constructor per generated statement kind
//! - **Import Block**: extra imports after the import anchor
//! - **Table Block**: tables, columns, primary keys and check constraints
//! - **Foreign Key Block**: foreign keys and their drops
//!

// ============================================================================
// Modules
// ============================================================================

pub mod blocks;
pub mod generator;
pub mod script;
pub mod statements;

// ============================================================================
// Re-exports
// ============================================================================

pub use blocks::{
    TableReport, add_foreign_keys, add_imports, add_tables, render_foreign_keys, render_tables,
};
pub use generator::{GenerationSummary, Generator};
pub use script::{ScriptBuffer, find_line_num};
pub use statements::{Block, Statement};

// ============================================================================
// Anchors
// ============================================================================

/// Anchor after which the extra imports are inserted
pub const IMPORT_ANCHOR: &str = "from alembic_addons.table_classes import *";

/// Anchor after which the upgrade body is inserted
pub const UPGRADE_ANCHOR: &str = "def upgrade():";

/// Anchor after which the downgrade body is inserted
pub const DOWNGRADE_ANCHOR: &str = "def downgrade():";

/// The three phrases that mark insertion points in a revision script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchors {
    /// End of the fixed import block
    pub imports: String,

    /// Start of the `upgrade()` body
    pub upgrade: String,

    /// Start of the `downgrade()` body
    pub downgrade: String,
}

impl Default for Anchors {
    fn default() -> Self {
        Self {
            imports: IMPORT_ANCHOR.to_string(),
            upgrade: UPGRADE_ANCHOR.to_string(),
            downgrade: DOWNGRADE_ANCHOR.to_string(),
        }
    }
}

// ============================================================================
// SpliceConfig
// ============================================================================

/// Configuration for the generators
#[derive(Debug, Clone, Default)]
pub struct SpliceConfig {
    /// Insertion points in the revision script
    pub anchors: Anchors,

    /// Skip the import block
    pub skip_imports: bool,

    /// Skip the foreign key block
    pub skip_foreign_keys: bool,
}

impl SpliceConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all anchors
    pub fn with_anchors(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }

    /// Set the import anchor
    pub fn with_import_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchors.imports = anchor.into();
        self
    }

    /// Set the upgrade anchor
    pub fn with_upgrade_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchors.upgrade = anchor.into();
        self
    }

    /// Set the downgrade anchor
    pub fn with_downgrade_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchors.downgrade = anchor.into();
        self
    }

    /// Do not insert the import block
    pub fn without_imports(mut self) -> Self {
        self.skip_imports = true;
        self
    }

    /// Do not insert foreign keys
    pub fn without_foreign_keys(mut self) -> Self {
        self.skip_foreign_keys = true;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
