//! The revision description: the root of a loaded YAML file

use crate::foreign_key::{ForeignKeyDef, RawForeignKey};
use crate::table::TableDef;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use splice_core::{SpliceError, SpliceResult, Validatable};

// ============================================================================
// RawRevisionSpec
// ============================================================================

/// Top-level YAML document before foreign keys are checked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRevisionSpec {
    pub revision_message: String,

    pub imports: String,

    #[serde(default)]
    pub tables: IndexMap<String, TableDef>,

    #[serde(default)]
    pub foreign_keys: IndexMap<String, RawForeignKey>,
}

// ============================================================================
// RevisionSpec
// ============================================================================

/// Everything one run splices into a revision script
///
/// Tables and foreign keys keep the order they were declared in; the
/// generated script follows that order.
#[derive(Debug, Clone, PartialEq)]
pub struct RevisionSpec {
    /// Message passed to `alembic revision -m`
    pub revision_message: String,

    /// Text inserted after the import anchor
    pub imports: String,

    /// Tables keyed by name
    pub tables: IndexMap<String, TableDef>,

    /// Foreign keys keyed by entry name
    pub foreign_keys: IndexMap<String, ForeignKeyDef>,
}

impl RevisionSpec {
    /// Create an empty revision with a message and import line
    pub fn new(revision_message: impl Into<String>, imports: impl Into<String>) -> Self {
        Self {
            revision_message: revision_message.into(),
            imports: imports.into(),
            tables: IndexMap::new(),
            foreign_keys: IndexMap::new(),
        }
    }

    /// Builder: add a table
    pub fn with_table(mut self, table: TableDef) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }

    /// Builder: add a foreign key
    pub fn with_foreign_key(mut self, fk: ForeignKeyDef) -> Self {
        self.foreign_keys.insert(fk.name.clone(), fk);
        self
    }

    /// Tables in declaration order
    pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
        self.tables.values()
    }

    /// Foreign keys in declaration order
    pub fn foreign_keys(&self) -> impl Iterator<Item = &ForeignKeyDef> {
        self.foreign_keys.values()
    }

    /// Number of tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Number of foreign keys
    pub fn foreign_key_count(&self) -> usize {
        self.foreign_keys.len()
    }
}

impl TryFrom<RawRevisionSpec> for RevisionSpec {
    type Error = SpliceError;

    fn try_from(raw: RawRevisionSpec) -> SpliceResult<Self> {
        let mut tables = raw.tables;
        for (name, table) in tables.iter_mut() {
            table.attach_names(name);
        }

        // Every entry is checked before any of them is used.
        let foreign_keys = raw
            .foreign_keys
            .into_iter()
            .map(|(name, fk)| Ok((name.clone(), ForeignKeyDef::from_raw(name, fk)?)))
            .collect::<SpliceResult<IndexMap<_, _>>>()?;

        Ok(Self {
            revision_message: raw.revision_message,
            imports: raw.imports,
            tables,
            foreign_keys,
        })
    }
}

impl Validatable for RevisionSpec {
    fn validate(&self) -> SpliceResult<()> {
        if self.revision_message.trim().is_empty() {
            return Err(SpliceError::validation("revision_message cannot be empty"));
        }

        for table in self.tables.values() {
            table.validate()?;
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
